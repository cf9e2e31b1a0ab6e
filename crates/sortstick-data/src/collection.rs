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

//! The ordered store of sticks that every sort lane permutes.

use rand::seq::SliceRandom;
use rand::Rng;
use sortstick_core::{Highlight, SortError, SortResult, StickId, StickView};

/// How values are assigned to positions at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueDistribution {
    /// Position `i` gets value `i`.
    #[default]
    Ascending,
    /// Position `i` gets value `n - 1 - i`.
    Descending,
}

/// One orderable item. The value is fixed at creation; only the highlight changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stick {
    id: StickId,
    value: u32,
    highlight: Highlight,
}

impl Stick {
    fn new(id: StickId, value: u32) -> Self {
        Self {
            id,
            value,
            highlight: Highlight::Normal,
        }
    }

    /// Stable identity.
    pub fn id(&self) -> StickId {
        self.id
    }

    /// Height-equivalent value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Current highlight.
    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    fn view(&self) -> StickView {
        StickView {
            id: self.id,
            value: self.value,
            highlight: self.highlight,
        }
    }
}

/// The collection: a fixed-length, reorderable sequence of sticks.
///
/// Length never changes after construction. [`swap`](Self::swap) and
/// [`get`](Self::get) are the only ways to observe or change order
/// position-by-position, so every reorder a lane performs passes through one
/// choke point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StickCollection {
    sticks: Vec<Stick>,
}

impl StickCollection {
    /// Creates `n` sticks with values from `distribution`, all `Normal`.
    ///
    /// Collections of fewer than two sticks are valid and always sorted.
    /// Values past `u32::MAX` saturate; configured collections stay far below
    /// that because `SortConfig` caps the element count.
    pub fn initialize(n: usize, distribution: ValueDistribution) -> Self {
        if n < 2 {
            log::debug!("Initializing a trivial collection of {n} stick(s).");
        }
        let values = (0..n).map(|i| match distribution {
            ValueDistribution::Ascending => saturating_u32(i),
            ValueDistribution::Descending => saturating_u32(n - 1 - i),
        });
        Self::from_values(values)
    }

    /// Creates sticks with the given values, in order. Identities follow
    /// creation order and saturate at `u32::MAX`.
    pub fn from_values(values: impl IntoIterator<Item = u32>) -> Self {
        let sticks = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Stick::new(StickId(saturating_u32(i)), value))
            .collect();
        Self { sticks }
    }

    /// Number of sticks.
    pub fn len(&self) -> usize {
        self.sticks.len()
    }

    /// Returns `true` if the collection holds no sticks.
    pub fn is_empty(&self) -> bool {
        self.sticks.is_empty()
    }

    /// The stick at position `index`.
    pub fn get(&self, index: usize) -> SortResult<&Stick> {
        self.sticks.get(index).ok_or(SortError::IndexOutOfRange {
            index,
            len: self.sticks.len(),
        })
    }

    /// Exchanges the sticks at two positions.
    pub fn swap(&mut self, a: usize, b: usize) -> SortResult<()> {
        let len = self.sticks.len();
        for index in [a, b] {
            if index >= len {
                return Err(SortError::IndexOutOfRange { index, len });
            }
        }
        self.sticks.swap(a, b);
        Ok(())
    }

    /// Applies a uniformly random permutation.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.sticks.shuffle(rng);
    }

    /// Returns `true` iff values are non-decreasing in position order.
    pub fn is_sorted(&self) -> bool {
        self.sticks.windows(2).all(|w| w[0].value <= w[1].value)
    }

    /// Sets the highlight of the stick at `index`.
    pub fn set_highlight(&mut self, index: usize, highlight: Highlight) -> SortResult<()> {
        let len = self.sticks.len();
        let stick = self
            .sticks
            .get_mut(index)
            .ok_or(SortError::IndexOutOfRange { index, len })?;
        stick.highlight = highlight;
        Ok(())
    }

    /// Returns a `Processing` stick to `Normal`, leaving `Placed` sticks alone.
    pub fn release(&mut self, index: usize) -> SortResult<()> {
        if self.get(index)?.highlight == Highlight::Processing {
            self.set_highlight(index, Highlight::Normal)?;
        }
        Ok(())
    }

    /// Resets every stick to `Normal`.
    pub fn clear_highlights(&mut self) {
        for stick in &mut self.sticks {
            stick.highlight = Highlight::Normal;
        }
    }

    /// Iterates over sticks in position order.
    pub fn iter(&self) -> impl Iterator<Item = &Stick> {
        self.sticks.iter()
    }

    /// Values in position order.
    pub fn values(&self) -> Vec<u32> {
        self.sticks.iter().map(Stick::value).collect()
    }

    /// Largest value, if any.
    pub fn max_value(&self) -> Option<u32> {
        self.sticks.iter().map(Stick::value).max()
    }

    /// Copies every stick into a presenter-facing view, in position order.
    pub fn snapshot(&self) -> Vec<StickView> {
        self.sticks.iter().map(Stick::view).collect()
    }
}

fn saturating_u32(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}
