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

//! Instrumentation counters for a sort run.

use std::sync::atomic::{AtomicU64, Ordering};

/// A point-in-time copy of the counters.
///
/// The two fields are loaded separately, so they may come from adjacent steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Comparisons recorded so far.
    pub comparisons: u64,
    /// Element accesses recorded so far.
    pub accesses: u64,
}

/// Monotonic comparison and access counters.
///
/// The worker is the only writer during a run; any thread may read. Weights
/// are chosen by the lane according to its fixed accounting convention.
#[derive(Debug, Default)]
pub struct SortMetrics {
    comparisons: AtomicU64,
    accesses: AtomicU64,
}

impl SortMetrics {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes both counters.
    pub fn reset(&self) {
        self.comparisons.store(0, Ordering::Relaxed);
        self.accesses.store(0, Ordering::Relaxed);
    }

    /// Adds `weight` comparisons.
    pub fn record_comparison(&self, weight: u64) {
        self.comparisons.fetch_add(weight, Ordering::Relaxed);
    }

    /// Adds `weight` element accesses.
    pub fn record_access(&self, weight: u64) {
        self.accesses.fetch_add(weight, Ordering::Relaxed);
    }

    /// Comparisons recorded since the last reset.
    pub fn comparisons(&self) -> u64 {
        self.comparisons.load(Ordering::Relaxed)
    }

    /// Accesses recorded since the last reset.
    pub fn accesses(&self) -> u64 {
        self.accesses.load(Ordering::Relaxed)
    }

    /// Reads both counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            comparisons: self.comparisons(),
            accesses: self.accesses(),
        }
    }
}
