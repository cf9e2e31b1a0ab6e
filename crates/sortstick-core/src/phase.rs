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

//! The coarse run state machine shared between the control thread and the worker.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Duration;

/// Whether a worker is currently permuting the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortPhase {
    /// Idle; commands that mutate the collection are allowed.
    NotSorting,
    /// A worker owns the collection order.
    Sorting,
}

impl SortPhase {
    fn to_raw(self) -> u8 {
        match self {
            SortPhase::NotSorting => 0,
            SortPhase::Sorting => 1,
        }
    }

    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => SortPhase::Sorting,
            _ => SortPhase::NotSorting,
        }
    }
}

/// A cross-thread phase cell with an interruptible sleep.
///
/// Reads are a single atomic load, so the presentation thread can poll it
/// every frame. Writers go through [`begin`](Self::begin) and
/// [`halt`](Self::halt); `halt` also wakes any worker blocked in
/// [`sleep`](Self::sleep), bounding cancellation latency by the time the
/// worker needs to reach its next check rather than by a full step delay.
#[derive(Debug)]
pub struct PhaseFlag {
    state: AtomicU8,
    gate: Mutex<()>,
    wake: Condvar,
}

impl PhaseFlag {
    /// Creates a flag in [`SortPhase::NotSorting`].
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(SortPhase::NotSorting.to_raw()),
            gate: Mutex::new(()),
            wake: Condvar::new(),
        }
    }

    /// Current phase.
    pub fn get(&self) -> SortPhase {
        SortPhase::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Shorthand for `get() == SortPhase::Sorting`.
    pub fn is_sorting(&self) -> bool {
        self.get() == SortPhase::Sorting
    }

    /// Transitions `NotSorting -> Sorting`.
    ///
    /// Returns `false` (and changes nothing) if the flag already reads
    /// `Sorting`.
    pub fn begin(&self) -> bool {
        self.state
            .compare_exchange(
                SortPhase::NotSorting.to_raw(),
                SortPhase::Sorting.to_raw(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Forces the phase to `NotSorting` and wakes sleeping workers.
    pub fn halt(&self) {
        self.state
            .store(SortPhase::NotSorting.to_raw(), Ordering::Release);
        // Notify under the gate so a worker between its check and its wait
        // cannot miss the wake-up.
        let _guard = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        self.wake.notify_all();
    }

    /// Blocks for up to `duration`, returning early if the phase leaves
    /// `Sorting`.
    ///
    /// Returns `true` if the phase still reads `Sorting` afterwards.
    pub fn sleep(&self, duration: Duration) -> bool {
        if duration.is_zero() || !self.is_sorting() {
            return self.is_sorting();
        }

        let guard = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = self
            .wake
            .wait_timeout_while(guard, duration, |_| self.is_sorting())
            .unwrap_or_else(PoisonError::into_inner);
        self.is_sorting()
    }
}

impl Default for PhaseFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn starts_not_sorting() {
        let flag = PhaseFlag::new();
        assert_eq!(flag.get(), SortPhase::NotSorting);
        assert!(!flag.is_sorting());
    }

    #[test]
    fn begin_only_succeeds_once() {
        let flag = PhaseFlag::new();
        assert!(flag.begin());
        assert!(!flag.begin(), "A second begin must be rejected");
        flag.halt();
        assert!(flag.begin(), "A fresh run may begin after halt");
    }

    #[test]
    fn sleep_returns_immediately_when_idle() {
        let flag = PhaseFlag::new();
        let start = Instant::now();
        assert!(!flag.sleep(Duration::from_secs(5)));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn sleep_runs_full_duration_while_sorting() {
        let flag = PhaseFlag::new();
        flag.begin();
        let start = Instant::now();
        assert!(flag.sleep(Duration::from_millis(30)));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn halt_wakes_a_sleeping_worker() {
        let flag = Arc::new(PhaseFlag::new());
        flag.begin();

        let worker_flag = Arc::clone(&flag);
        let handle = thread::spawn(move || {
            let start = Instant::now();
            let still_sorting = worker_flag.sleep(Duration::from_secs(10));
            (still_sorting, start.elapsed())
        });

        thread::sleep(Duration::from_millis(20));
        flag.halt();

        let (still_sorting, elapsed) = handle.join().expect("Sleeper panicked");
        assert!(!still_sorting);
        assert!(
            elapsed < Duration::from_secs(2),
            "Halt should interrupt the sleep, took {elapsed:?}"
        );
    }
}
