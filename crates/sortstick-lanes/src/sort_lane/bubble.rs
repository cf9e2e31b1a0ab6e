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

//! Bubble sort with the already-sorted early exit.

use sortstick_core::{SortAlgorithm, SortResult};
use std::cmp::Ordering;

use crate::context::{StepContext, Tally};
use crate::lane::{LaneOutcome, SortLane};

/// Adjacent compare-and-swap passes; each pass bubbles the largest remaining
/// stick to the end of the unsorted prefix.
#[derive(Debug, Default)]
pub struct BubbleSortLane;

impl BubbleSortLane {
    /// Creates a new `BubbleSortLane`.
    pub fn new() -> Self {
        Self
    }
}

impl SortLane for BubbleSortLane {
    fn strategy_name(&self) -> &'static str {
        "BubbleSort"
    }

    fn algorithm(&self) -> SortAlgorithm {
        SortAlgorithm::BubbleSort
    }

    /// Two comparisons and one access per step; the swap itself is free.
    fn tally(&self) -> Tally {
        Tally::BUBBLE
    }

    fn execute(&self, ctx: &StepContext) -> SortResult<LaneOutcome> {
        let tally = self.tally();
        let n = ctx.len();

        for i in 0..n {
            if !ctx.is_sorting() {
                return Ok(LaneOutcome::Cancelled);
            }
            let mut swapped = false;

            for j in 1..n - i {
                if !ctx.is_sorting() {
                    return Ok(LaneOutcome::Cancelled);
                }

                if ctx.compare(j - 1, j, tally)? == Ordering::Greater {
                    if !ctx.swap(j - 1, j, tally)? {
                        return Ok(LaneOutcome::Cancelled);
                    }
                    swapped = true;
                }

                if !ctx.settle(&[j - 1, j])? {
                    return Ok(LaneOutcome::Cancelled);
                }
            }

            if !ctx.is_sorting() {
                return Ok(LaneOutcome::Cancelled);
            }
            ctx.place(n - 1 - i)?;
            if !swapped {
                break;
            }
        }

        Ok(LaneOutcome::Completed)
    }
}
