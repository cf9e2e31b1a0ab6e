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

//! Top-down merge sort with an in-place, rotation-based merge.

use sortstick_core::{SortAlgorithm, SortResult};
use std::cmp::Ordering;

use crate::context::{StepContext, Tally};
use crate::lane::{LaneOutcome, SortLane};

/// Merge sort that never copies sticks out of the collection.
///
/// When the head of the right run is smaller than the head of the left run,
/// it is rotated into place one adjacent swap per step, so the collection
/// remains the only source of truth throughout the merge.
///
/// A merged run can still shift when a later merge rotates into it, so no
/// stick is marked placed here; the completion wave does that.
#[derive(Debug, Default)]
pub struct InPlaceMergeSortLane;

impl InPlaceMergeSortLane {
    /// Creates a new `InPlaceMergeSortLane`.
    pub fn new() -> Self {
        Self
    }

    /// Sorts the inclusive range `left..=right`.
    fn sort_range(&self, ctx: &StepContext, left: usize, right: usize) -> SortResult<LaneOutcome> {
        if left >= right {
            return Ok(LaneOutcome::Completed);
        }

        let mid = left + (right - left) / 2;
        if self.sort_range(ctx, left, mid)? == LaneOutcome::Cancelled {
            return Ok(LaneOutcome::Cancelled);
        }
        if self.sort_range(ctx, mid + 1, right)? == LaneOutcome::Cancelled {
            return Ok(LaneOutcome::Cancelled);
        }
        self.merge(ctx, left, mid, right)
    }

    /// Merges the sorted runs `left..=mid` and `mid + 1..=right`.
    fn merge(
        &self,
        ctx: &StepContext,
        left: usize,
        mid: usize,
        right: usize,
    ) -> SortResult<LaneOutcome> {
        let tally = self.tally();
        let (mut i, mut mid, mut j) = (left, mid, mid + 1);

        while i <= mid && j <= right {
            if !ctx.is_sorting() {
                return Ok(LaneOutcome::Cancelled);
            }

            let ordering = ctx.compare(i, j, tally)?;
            if !ctx.settle(&[i, j])? {
                return Ok(LaneOutcome::Cancelled);
            }

            if ordering != Ordering::Greater {
                i += 1;
                continue;
            }

            if rotate_down(ctx, j, i, tally)? == LaneOutcome::Cancelled {
                return Ok(LaneOutcome::Cancelled);
            }
            i += 1;
            mid += 1;
            j += 1;
        }

        Ok(LaneOutcome::Completed)
    }
}

/// Moves the stick at `from` down to `to` through adjacent swaps, shifting
/// the sticks in between one position right.
fn rotate_down(ctx: &StepContext, from: usize, to: usize, tally: Tally) -> SortResult<LaneOutcome> {
    let mut k = from;
    while k > to {
        if !ctx.is_sorting() {
            return Ok(LaneOutcome::Cancelled);
        }
        if !ctx.swap(k - 1, k, tally)? || !ctx.settle(&[k - 1, k])? {
            return Ok(LaneOutcome::Cancelled);
        }
        k -= 1;
    }
    Ok(LaneOutcome::Completed)
}

impl SortLane for InPlaceMergeSortLane {
    fn strategy_name(&self) -> &'static str {
        "InPlaceMergeSort"
    }

    fn algorithm(&self) -> SortAlgorithm {
        SortAlgorithm::InPlaceMergeSort
    }

    fn execute(&self, ctx: &StepContext) -> SortResult<LaneOutcome> {
        match ctx.len() {
            0 | 1 => Ok(LaneOutcome::Completed),
            n => self.sort_range(ctx, 0, n - 1),
        }
    }
}
