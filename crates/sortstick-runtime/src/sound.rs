// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Stands in for the audio layer: drains sound events on its own thread.

use sortstick_core::SoundEvent;
use std::thread::{self, JoinHandle};

/// Counts of each event the consumer received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoundTally {
    pub compares: u64,
    pub completes: u64,
    pub interrupts: u64,
}

impl SoundTally {
    fn record(&mut self, event: SoundEvent) {
        match event {
            SoundEvent::Compare => self.compares += 1,
            SoundEvent::Complete => self.completes += 1,
            SoundEvent::Interrupted => self.interrupts += 1,
        }
    }
}

/// Background consumer for a [`ChannelSoundSink`](sortstick_core::ChannelSoundSink).
///
/// The thread exits once every sender has been dropped.
pub struct SoundConsumer {
    handle: JoinHandle<SoundTally>,
}

impl SoundConsumer {
    /// Starts draining `events`.
    pub fn spawn(events: flume::Receiver<SoundEvent>) -> std::io::Result<Self> {
        let handle = thread::Builder::new()
            .name("sound-consumer".into())
            .spawn(move || {
                let mut tally = SoundTally::default();
                for event in events.iter() {
                    log::trace!("Sound: {event:?}");
                    tally.record(event);
                }
                tally
            })?;
        Ok(Self { handle })
    }

    /// Waits for the channel to close and returns what was heard.
    pub fn finish(self) -> SoundTally {
        self.handle.join().unwrap_or_else(|_| {
            log::warn!("Sound consumer panicked; its tally is lost.");
            SoundTally::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortstick_core::{ChannelSoundSink, SoundSink};

    #[test]
    fn tallies_until_the_sink_is_dropped() {
        let (sink, events) = ChannelSoundSink::bounded(16);
        let consumer = SoundConsumer::spawn(events).unwrap();

        sink.play(SoundEvent::Compare);
        sink.play(SoundEvent::Compare);
        sink.play(SoundEvent::Interrupted);
        drop(sink);

        assert_eq!(
            consumer.finish(),
            SoundTally {
                compares: 2,
                completes: 0,
                interrupts: 1,
            }
        );
    }
}
