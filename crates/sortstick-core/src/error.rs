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

//! Defines the error taxonomy for sort runs.

use crate::algorithm::SortAlgorithm;
use std::fmt;

/// A failure that aborts a sort run.
///
/// Invalid command sequencing is deliberately absent: a `run` issued while
/// sorting is ignored, not reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// A lane addressed a position outside the collection.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The collection length at the time.
        len: usize,
    },
    /// No lane is registered for the requested algorithm.
    LaneMissing(SortAlgorithm),
    /// The operating system refused to start the worker thread.
    WorkerSpawn(String),
    /// The worker panicked mid-run; collection order is unspecified.
    WorkerPanicked {
        /// The algorithm that was running.
        algorithm: SortAlgorithm,
        /// The panic payload, if it was a string.
        message: String,
    },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortError::IndexOutOfRange { index, len } => {
                write!(f, "Stick index {index} out of range for collection of {len}")
            }
            SortError::LaneMissing(algorithm) => {
                write!(f, "No lane registered for {algorithm}")
            }
            SortError::WorkerSpawn(reason) => {
                write!(f, "Failed to spawn sort worker: {reason}")
            }
            SortError::WorkerPanicked { algorithm, message } => {
                write!(f, "{algorithm} worker panicked: {message}")
            }
        }
    }
}

impl std::error::Error for SortError {}

/// Shorthand for results carrying a [`SortError`].
pub type SortResult<T> = Result<T, SortError>;
