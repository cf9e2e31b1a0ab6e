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

//! # Sortstick Lanes
//!
//! The algorithm step engine: each sorting algorithm as a lane of primitive,
//! instrumented, cancellable steps over the shared collection.

#![warn(missing_docs)]

pub mod context;
pub mod lane;
pub mod sort_lane;

pub use context::{StepContext, Tally};
pub use lane::{run_lane, LaneOutcome, LaneRegistry, SortLane};
pub use sort_lane::*;
