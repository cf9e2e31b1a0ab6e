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

//! Insertion sort by adjacent swaps.

use sortstick_core::{SortAlgorithm, SortResult};
use std::cmp::Ordering;

use crate::context::StepContext;
use crate::lane::{LaneOutcome, SortLane};

/// Grows a sorted prefix by sinking each new stick left until it meets a
/// smaller-or-equal neighbour.
///
/// No position is final until the last stick has sunk, so placement is left
/// to the completion wave.
#[derive(Debug, Default)]
pub struct InsertionSortLane;

impl InsertionSortLane {
    /// Creates a new `InsertionSortLane`.
    pub fn new() -> Self {
        Self
    }
}

impl SortLane for InsertionSortLane {
    fn strategy_name(&self) -> &'static str {
        "InsertionSort"
    }

    fn algorithm(&self) -> SortAlgorithm {
        SortAlgorithm::InsertionSort
    }

    fn execute(&self, ctx: &StepContext) -> SortResult<LaneOutcome> {
        let tally = self.tally();
        let n = ctx.len();

        for i in 1..n {
            let mut j = i;
            while j > 0 {
                if !ctx.is_sorting() {
                    return Ok(LaneOutcome::Cancelled);
                }

                let sinks = ctx.compare(j - 1, j, tally)? == Ordering::Greater;
                if sinks && !ctx.swap(j - 1, j, tally)? {
                    return Ok(LaneOutcome::Cancelled);
                }
                if !ctx.settle(&[j - 1, j])? {
                    return Ok(LaneOutcome::Cancelled);
                }

                if !sinks {
                    break;
                }
                j -= 1;
            }
        }

        Ok(LaneOutcome::Completed)
    }
}
