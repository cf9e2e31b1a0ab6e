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

//! The primitive operations a lane is allowed to perform on the shared collection.

use sortstick_core::{Highlight, PhaseFlag, SortResult, SoundEvent, SoundSink};
use sortstick_data::StickCollection;
use sortstick_telemetry::SortMetrics;
use std::cmp::Ordering;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::lane::LaneOutcome;

/// How much one comparison or swap adds to the counters.
///
/// Each lane fixes its convention once; the numbers are displayed to users as
/// an educational aid and are not derived from the code path taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    /// Comparisons recorded per `compare`.
    pub comparisons_per_compare: u64,
    /// Accesses recorded per `compare`.
    pub accesses_per_compare: u64,
    /// Accesses recorded per `swap`.
    pub accesses_per_swap: u64,
}

impl Tally {
    /// Bubble sort's historical convention: two comparisons and one access
    /// per comparison step, swaps free.
    pub const BUBBLE: Tally = Tally {
        comparisons_per_compare: 2,
        accesses_per_compare: 1,
        accesses_per_swap: 0,
    };

    /// One comparison reading two sticks; a swap touches two sticks.
    pub const STANDARD: Tally = Tally {
        comparisons_per_compare: 1,
        accesses_per_compare: 2,
        accesses_per_swap: 2,
    };
}

/// Shared handles a lane runs against.
///
/// Every method takes the collection lock only for the duration of one
/// primitive, so a presenter reading between steps sees a whole permutation
/// with consistent value/highlight pairs.
#[derive(Clone)]
pub struct StepContext {
    collection: Arc<RwLock<StickCollection>>,
    metrics: Arc<SortMetrics>,
    phase: Arc<PhaseFlag>,
    sound: Arc<dyn SoundSink>,
    step_delay: Duration,
    color_delay: Duration,
}

impl StepContext {
    /// Creates a context with zero delays.
    pub fn new(
        collection: Arc<RwLock<StickCollection>>,
        metrics: Arc<SortMetrics>,
        phase: Arc<PhaseFlag>,
        sound: Arc<dyn SoundSink>,
    ) -> Self {
        Self {
            collection,
            metrics,
            phase,
            sound,
            step_delay: Duration::ZERO,
            color_delay: Duration::ZERO,
        }
    }

    /// Sets the pause after each step and between completion-wave ticks.
    pub fn with_delays(mut self, step_delay: Duration, color_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self.color_delay = color_delay;
        self
    }

    /// `false` once cancellation has been requested.
    pub fn is_sorting(&self) -> bool {
        self.phase.is_sorting()
    }

    /// Collection length; constant for the whole run.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Marks `a` and `b` as processing, records one comparison under `tally`,
    /// emits a compare sound, and orders the two values.
    pub fn compare(&self, a: usize, b: usize, tally: Tally) -> SortResult<Ordering> {
        let (left, right) = {
            let mut collection = self.write();
            collection.set_highlight(a, Highlight::Processing)?;
            collection.set_highlight(b, Highlight::Processing)?;
            (collection.get(a)?.value(), collection.get(b)?.value())
        };

        self.metrics.record_comparison(tally.comparisons_per_compare);
        self.metrics.record_access(tally.accesses_per_compare);
        self.sound.play(SoundEvent::Compare);

        Ok(left.cmp(&right))
    }

    /// Exchanges two sticks and records the swap under `tally`.
    ///
    /// Returns `Ok(false)` without touching the collection once cancellation
    /// has been requested, so no reorder can follow a cancel.
    pub fn swap(&self, a: usize, b: usize, tally: Tally) -> SortResult<bool> {
        {
            let mut collection = self.write();
            if !self.is_sorting() {
                return Ok(false);
            }
            collection.swap(a, b)?;
            collection.set_highlight(a, Highlight::Processing)?;
            collection.set_highlight(b, Highlight::Processing)?;
        }
        self.metrics.record_access(tally.accesses_per_swap);
        Ok(true)
    }

    /// Suspends for the step delay. Returns `false` if cancelled meanwhile.
    pub fn pause(&self) -> bool {
        self.phase.sleep(self.step_delay)
    }

    /// Ends a step: pauses, then returns `indices` to normal.
    ///
    /// Returns `Ok(false)` if the run was cancelled at any point during the
    /// step; the lane must then return [`LaneOutcome::Cancelled`] at once.
    pub fn settle(&self, indices: &[usize]) -> SortResult<bool> {
        let resumed = self.pause();
        self.release(indices)?;
        Ok(resumed)
    }

    /// Returns processing sticks at `indices` to normal.
    pub fn release(&self, indices: &[usize]) -> SortResult<()> {
        let mut collection = self.write();
        for &index in indices {
            collection.release(index)?;
        }
        Ok(())
    }

    /// Marks the stick at `index` as being in its final position.
    pub fn place(&self, index: usize) -> SortResult<()> {
        self.write().set_highlight(index, Highlight::Placed)
    }

    /// Sweeps `Placed` across the collection from left to right.
    ///
    /// Stops at the first tick that finds the run cancelled, emitting
    /// [`SoundEvent::Interrupted`]; otherwise ends with
    /// [`SoundEvent::Complete`].
    pub fn completion_wave(&self) -> SortResult<LaneOutcome> {
        let len = {
            let mut collection = self.write();
            if self.is_sorting() {
                collection.clear_highlights();
            }
            collection.len()
        };

        for index in 0..len {
            if !self.is_sorting() {
                log::debug!("Completion wave interrupted at stick {index} of {len}.");
                self.sound.play(SoundEvent::Interrupted);
                return Ok(LaneOutcome::Cancelled);
            }
            self.sound.play(SoundEvent::Compare);
            self.place(index)?;
            self.phase.sleep(self.color_delay);
        }

        self.sound.play(SoundEvent::Complete);
        Ok(LaneOutcome::Completed)
    }

    fn read(&self) -> RwLockReadGuard<'_, StickCollection> {
        self.collection.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StickCollection> {
        self.collection.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for StepContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepContext")
            .field("phase", &self.phase.get())
            .field("step_delay", &self.step_delay)
            .field("color_delay", &self.color_delay)
            .finish()
    }
}
