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

//! # Sortstick Core
//!
//! Foundational crate containing the shared vocabulary of the stick sorter:
//! algorithm identities, the run phase state machine, per-stick view types,
//! the error taxonomy, and the contracts for external collaborators (sound).
//!
//! Nothing here owns a collection or spawns a thread; higher-level crates
//! (`sortstick-data`, `sortstick-lanes`, `sortstick-agents`) build on these
//! types without depending on each other's internals.

#![warn(missing_docs)]

pub mod algorithm;
pub mod audio;
pub mod config;
pub mod error;
pub mod phase;
pub mod stick;

pub use algorithm::SortAlgorithm;
pub use audio::{ChannelSoundSink, SilentSink, SoundEvent, SoundSink};
pub use config::{InvalidConfig, LayoutConfig, SortConfig};
pub use error::{SortError, SortResult};
pub use phase::{PhaseFlag, SortPhase};
pub use stick::{Highlight, StickId, StickView};
