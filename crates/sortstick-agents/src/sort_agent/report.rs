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

use sortstick_core::SortAlgorithm;
use sortstick_lanes::LaneOutcome;
use std::fmt;
use std::time::Duration;

/// Summary of one run, produced when the coordinator reclaims its worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// The algorithm that ran.
    pub algorithm: SortAlgorithm,
    /// Whether the lane finished or observed cancellation.
    pub outcome: LaneOutcome,
    /// Comparisons recorded by the time the worker exited.
    pub comparisons: u64,
    /// Accesses recorded by the time the worker exited.
    pub accesses: u64,
    /// Wall time from spawn to reclaim.
    pub elapsed: Duration,
    /// Whether the collection was in order when reclaimed.
    pub sorted: bool,
}

impl RunReport {
    /// `true` if the lane ran to the end of its completion wave.
    pub fn is_completed(&self) -> bool {
        self.outcome == LaneOutcome::Completed
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self.outcome {
            LaneOutcome::Completed => "completed",
            LaneOutcome::Cancelled => "cancelled",
        };
        write!(
            f,
            "{} {status} in {:.2?}: {} comparisons, {} accesses, sorted={}",
            self.algorithm, self.elapsed, self.comparisons, self.accesses, self.sorted
        )
    }
}
