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

//! Quick sort with Lomuto partitioning.

use sortstick_core::{SortAlgorithm, SortResult};
use std::cmp::Ordering;

use crate::context::StepContext;
use crate::lane::{LaneOutcome, SortLane};

/// Partitions around the last stick of each range, then recurses into the
/// smaller side and loops on the larger, keeping recursion depth logarithmic.
///
/// Every pivot is marked `Placed` as soon as its partition finishes.
#[derive(Debug, Default)]
pub struct QuickSortLane;

impl QuickSortLane {
    /// Creates a new `QuickSortLane`.
    pub fn new() -> Self {
        Self
    }

    /// Sorts the half-open range `lo..hi`.
    fn sort_range(&self, ctx: &StepContext, mut lo: usize, mut hi: usize) -> SortResult<LaneOutcome> {
        while hi - lo > 1 {
            let Some(pivot) = self.partition(ctx, lo, hi)? else {
                return Ok(LaneOutcome::Cancelled);
            };
            ctx.place(pivot)?;

            if pivot - lo < hi - (pivot + 1) {
                if self.sort_range(ctx, lo, pivot)? == LaneOutcome::Cancelled {
                    return Ok(LaneOutcome::Cancelled);
                }
                lo = pivot + 1;
            } else {
                if self.sort_range(ctx, pivot + 1, hi)? == LaneOutcome::Cancelled {
                    return Ok(LaneOutcome::Cancelled);
                }
                hi = pivot;
            }
        }

        if hi - lo == 1 {
            ctx.place(lo)?;
        }
        Ok(LaneOutcome::Completed)
    }

    /// Partitions `lo..hi` around the stick at `hi - 1`.
    ///
    /// Returns the pivot's final position, or `None` if cancelled.
    fn partition(&self, ctx: &StepContext, lo: usize, hi: usize) -> SortResult<Option<usize>> {
        let tally = self.tally();
        let pivot = hi - 1;
        let mut store = lo;

        for j in lo..pivot {
            if !ctx.is_sorting() {
                return Ok(None);
            }

            let target = store;
            if ctx.compare(j, pivot, tally)? == Ordering::Less {
                if store != j && !ctx.swap(store, j, tally)? {
                    return Ok(None);
                }
                store += 1;
            }
            if !ctx.settle(&[target, j, pivot])? {
                return Ok(None);
            }
        }

        if !ctx.is_sorting() {
            return Ok(None);
        }
        if store != pivot {
            if !ctx.swap(store, pivot, tally)? || !ctx.settle(&[store, pivot])? {
                return Ok(None);
            }
        }
        Ok(Some(store))
    }
}

impl SortLane for QuickSortLane {
    fn strategy_name(&self) -> &'static str {
        "QuickSort"
    }

    fn algorithm(&self) -> SortAlgorithm {
        SortAlgorithm::QuickSort
    }

    fn execute(&self, ctx: &StepContext) -> SortResult<LaneOutcome> {
        self.sort_range(ctx, 0, ctx.len())
    }
}
