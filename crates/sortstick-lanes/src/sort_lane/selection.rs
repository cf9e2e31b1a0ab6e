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

//! Selection sort.

use sortstick_core::{SortAlgorithm, SortResult};
use std::cmp::Ordering;

use crate::context::StepContext;
use crate::lane::{LaneOutcome, SortLane};

/// Scans the unsorted suffix for its minimum and swaps it into place.
///
/// The running minimum stays highlighted while the scan moves past it.
#[derive(Debug, Default)]
pub struct SelectionSortLane;

impl SelectionSortLane {
    /// Creates a new `SelectionSortLane`.
    pub fn new() -> Self {
        Self
    }
}

impl SortLane for SelectionSortLane {
    fn strategy_name(&self) -> &'static str {
        "SelectionSort"
    }

    fn algorithm(&self) -> SortAlgorithm {
        SortAlgorithm::SelectionSort
    }

    fn execute(&self, ctx: &StepContext) -> SortResult<LaneOutcome> {
        let tally = self.tally();
        let n = ctx.len();

        for i in 0..n.saturating_sub(1) {
            if !ctx.is_sorting() {
                return Ok(LaneOutcome::Cancelled);
            }
            let mut min = i;

            for j in i + 1..n {
                if !ctx.is_sorting() {
                    return Ok(LaneOutcome::Cancelled);
                }

                let ordering = ctx.compare(min, j, tally)?;
                let resumed = ctx.pause();

                if ordering == Ordering::Greater {
                    ctx.release(&[min])?;
                    min = j;
                } else {
                    ctx.release(&[j])?;
                }
                if !resumed {
                    return Ok(LaneOutcome::Cancelled);
                }
            }

            if min != i {
                if !ctx.swap(i, min, tally)? || !ctx.settle(&[i, min])? {
                    return Ok(LaneOutcome::Cancelled);
                }
            } else {
                ctx.release(&[i])?;
            }

            if !ctx.is_sorting() {
                return Ok(LaneOutcome::Cancelled);
            }
            ctx.place(i)?;
        }

        if n > 0 {
            ctx.place(n - 1)?;
        }
        Ok(LaneOutcome::Completed)
    }
}
