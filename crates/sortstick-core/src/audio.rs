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

//! Defines the abstract `SoundSink` contract toward the audio collaborator.

use serde::{Deserialize, Serialize};

/// The kind of feedback sound a sort step asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEvent {
    /// A comparison step, or one tick of the completion wave.
    Compare,
    /// The completion wave reached the last stick.
    Complete,
    /// Cancellation cut the completion wave short.
    Interrupted,
}

/// The boundary between the sort engine and whatever plays sounds.
///
/// Notifications are fire-and-forget: `play` must not block the worker and
/// any failure on the audio side is swallowed by the implementation. The
/// engine never learns whether a sound was actually played.
pub trait SoundSink: Send + Sync {
    /// Requests feedback for `event`.
    fn play(&self, event: SoundEvent);
}

/// A sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl SoundSink for SilentSink {
    fn play(&self, _event: SoundEvent) {}
}

/// Forwards events over a bounded `flume` channel.
///
/// When the queue is full or the receiver is gone the event is dropped.
#[derive(Debug, Clone)]
pub struct ChannelSoundSink {
    sender: flume::Sender<SoundEvent>,
}

impl ChannelSoundSink {
    /// Creates a sink and the receiver the audio side should drain.
    pub fn bounded(capacity: usize) -> (Self, flume::Receiver<SoundEvent>) {
        let (sender, receiver) = flume::bounded(capacity);
        log::info!("Sound channel initialized (capacity {capacity}).");
        (Self { sender }, receiver)
    }
}

impl SoundSink for ChannelSoundSink {
    fn play(&self, event: SoundEvent) {
        if self.sender.try_send(event).is_err() {
            log::trace!("Dropped sound event {event:?}.");
        }
    }
}
