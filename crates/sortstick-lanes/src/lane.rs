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

//! # Sort Lane Abstraction
//!
//! A **lane** is one sorting strategy expressed as a sequence of primitive
//! steps over a [`StepContext`]. The coordinator looks lanes up by
//! [`SortAlgorithm`] in a [`LaneRegistry`] and runs the chosen one on its
//! worker through [`run_lane`]; it never matches on the algorithm itself.
//!
//! ## Step contract
//!
//! Every lane follows the same shape:
//!
//! ```text
//! check phase → compare (highlight + counters + sound) → [swap] → settle (pause + release)
//! ```
//!
//! A refused [`StepContext::swap`] or a `false` from [`StepContext::settle`]
//! means cancellation was requested mid-step; the lane returns
//! [`LaneOutcome::Cancelled`] immediately, leaving the collection in whatever
//! order it had reached. Lanes that know a final position early mark it
//! `Placed`; the others rely on the completion wave.

use sortstick_core::{SortAlgorithm, SortResult};
use std::collections::HashMap;
use std::sync::Arc;

use crate::context::{StepContext, Tally};
use crate::sort_lane::{
    BubbleSortLane, InPlaceMergeSortLane, InsertionSortLane, QuickSortLane, SelectionSortLane,
};

/// How a lane (or the completion wave) finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneOutcome {
    /// Every step ran.
    Completed,
    /// Cancellation was observed and the remaining steps were abandoned.
    Cancelled,
}

/// Base trait for every sorting strategy.
pub trait SortLane: Send + Sync {
    /// Human-readable name used in logs.
    fn strategy_name(&self) -> &'static str;

    /// The algorithm this lane implements; also its registry key.
    fn algorithm(&self) -> SortAlgorithm;

    /// The counter convention this lane records under.
    fn tally(&self) -> Tally {
        Tally::STANDARD
    }

    /// Sorts the collection behind `ctx` step by step.
    ///
    /// Must check [`StepContext::is_sorting`] before every step and must not
    /// run the completion wave; [`run_lane`] does that.
    fn execute(&self, ctx: &StepContext) -> SortResult<LaneOutcome>;
}

/// Runs `lane` to completion or cancellation, followed by the completion wave.
///
/// Collections of fewer than two sticks finish immediately with zero steps.
pub fn run_lane(lane: &dyn SortLane, ctx: &StepContext) -> SortResult<LaneOutcome> {
    let len = ctx.len();
    if len < 2 {
        log::debug!(
            "{} skipped: {len} stick(s) are already sorted.",
            lane.strategy_name()
        );
        return Ok(LaneOutcome::Completed);
    }

    log::debug!("{} starting on {len} sticks.", lane.strategy_name());
    match lane.execute(ctx)? {
        LaneOutcome::Completed => ctx.completion_wave(),
        LaneOutcome::Cancelled => {
            log::debug!("{} cancelled mid-run.", lane.strategy_name());
            Ok(LaneOutcome::Cancelled)
        }
    }
}

/// Lanes keyed by the algorithm they implement.
#[derive(Clone, Default)]
pub struct LaneRegistry {
    lanes: HashMap<SortAlgorithm, Arc<dyn SortLane>>,
}

impl LaneRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding one lane for every [`SortAlgorithm`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(BubbleSortLane::new()));
        registry.register(Arc::new(SelectionSortLane::new()));
        registry.register(Arc::new(InsertionSortLane::new()));
        registry.register(Arc::new(InPlaceMergeSortLane::new()));
        registry.register(Arc::new(QuickSortLane::new()));
        registry
    }

    /// Registers `lane` under its algorithm, returning the lane it replaced.
    pub fn register(&mut self, lane: Arc<dyn SortLane>) -> Option<Arc<dyn SortLane>> {
        self.lanes.insert(lane.algorithm(), lane)
    }

    /// The lane for `algorithm`, if registered.
    pub fn get(&self, algorithm: SortAlgorithm) -> Option<Arc<dyn SortLane>> {
        self.lanes.get(&algorithm).cloned()
    }

    /// Returns the number of registered lanes.
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Returns `true` if no lanes are registered.
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}

impl std::fmt::Debug for LaneRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.lanes.values().map(|l| l.strategy_name()).collect();
        names.sort_unstable();
        f.debug_struct("LaneRegistry").field("lanes", &names).finish()
    }
}
