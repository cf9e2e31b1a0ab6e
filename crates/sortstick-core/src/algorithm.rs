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

//! The closed set of sorting strategies the engine knows how to animate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one classic comparison sort.
///
/// Each variant maps to exactly one lane in `sortstick-lanes`. Adding an
/// algorithm means adding a variant here and a lane there; the coordinator
/// never switches on this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAlgorithm {
    /// Adjacent compare-and-swap passes with early exit.
    BubbleSort,
    /// Repeatedly selects the minimum of the unsorted suffix.
    SelectionSort,
    /// Sinks each element into the sorted prefix by adjacent swaps.
    InsertionSort,
    /// Top-down merge sort whose merge rotates elements in place.
    InPlaceMergeSort,
    /// Lomuto-partition quick sort.
    QuickSort,
}

impl SortAlgorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::BubbleSort,
        SortAlgorithm::SelectionSort,
        SortAlgorithm::InsertionSort,
        SortAlgorithm::InPlaceMergeSort,
        SortAlgorithm::QuickSort,
    ];

    /// Human-readable name for labels.
    pub fn display_name(self) -> &'static str {
        match self {
            SortAlgorithm::BubbleSort => "Bubble Sort",
            SortAlgorithm::SelectionSort => "Selection Sort",
            SortAlgorithm::InsertionSort => "Insertion Sort",
            SortAlgorithm::InPlaceMergeSort => "In-Place Merge Sort",
            SortAlgorithm::QuickSort => "Quick Sort",
        }
    }

    /// Short identifier used on the command line and in thread names.
    pub fn slug(self) -> &'static str {
        match self {
            SortAlgorithm::BubbleSort => "bubble",
            SortAlgorithm::SelectionSort => "selection",
            SortAlgorithm::InsertionSort => "insertion",
            SortAlgorithm::InPlaceMergeSort => "merge",
            SortAlgorithm::QuickSort => "quick",
        }
    }

    /// Time-complexity label shown next to the counters.
    ///
    /// The in-place merge rotates elements one adjacent swap at a time, so its
    /// element movement is quadratic even though comparisons are `n log n`.
    pub fn complexity_label(self) -> &'static str {
        match self {
            SortAlgorithm::BubbleSort
            | SortAlgorithm::SelectionSort
            | SortAlgorithm::InsertionSort
            | SortAlgorithm::InPlaceMergeSort => "O(n²)",
            SortAlgorithm::QuickSort => "O(n log n)",
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Returned when a string names no known algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown sort algorithm '{}' (expected one of: bubble, selection, insertion, merge, quick)",
            self.0
        )
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for SortAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        SortAlgorithm::ALL
            .into_iter()
            .find(|a| a.slug() == needle || a.display_name().eq_ignore_ascii_case(&needle))
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}
