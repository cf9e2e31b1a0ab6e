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

//! Per-stick identity, highlight state, and the read-only view handed to presenters.

use serde::{Deserialize, Serialize};

/// Stable identity of a stick, assigned at creation and never reused within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StickId(pub u32);

/// The role a stick plays in the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Highlight {
    /// Not involved in the current step.
    #[default]
    Normal,
    /// Being compared or moved right now.
    Processing,
    /// Known to be at its final position.
    Placed,
}

/// A value copy of one stick, safe to hand across threads.
///
/// Presenters receive a `Vec<StickView>` in collection order; value and
/// highlight are always read together under the collection lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickView {
    /// Stable identity.
    pub id: StickId,
    /// Height-equivalent value.
    pub value: u32,
    /// Current highlight.
    pub highlight: Highlight,
}
