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

//! # Sortstick Agents
//!
//! The coordinator that owns the shared collection, launches sort lanes on a
//! background worker, and answers the presentation thread's per-frame polls.

#![warn(missing_docs)]

pub mod sort_agent;

pub use sort_agent::{RunReport, SortCoordinator};
