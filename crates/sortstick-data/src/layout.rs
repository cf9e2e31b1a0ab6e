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

//! Screen geometry for sticks, derived from the layout configuration.
//!
//! Positions depend only on collection order, so a presenter recomputes them
//! from each frame's snapshot instead of the lanes tracking coordinates.

use sortstick_core::LayoutConfig;

/// An axis-aligned rectangle in window coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickRect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

/// Precomputed widths and spacing for a collection of a given size.
#[derive(Debug, Clone, PartialEq)]
pub struct StickLayout {
    stick_width: f32,
    spacing: f32,
    max_height: f32,
    baseline: f32,
}

impl StickLayout {
    /// Splits `config.window_width` between `count` sticks and `count - 1` gaps.
    pub fn new(config: &LayoutConfig, count: usize) -> Self {
        let total_space = config.window_width;
        let total_spacing = config.space_percentage * total_space;

        let spacing = if count > 1 {
            total_spacing / (count - 1) as f32
        } else {
            0.0
        };
        let stick_width = if count > 0 {
            (total_space - total_spacing) / count as f32
        } else {
            0.0
        };

        Self {
            stick_width,
            spacing,
            max_height: config.max_element_height,
            baseline: config.element_y_position,
        }
    }

    /// Width shared by every stick.
    pub fn stick_width(&self) -> f32 {
        self.stick_width
    }

    /// Gap between neighbouring sticks.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Height for `value` when the largest value in the collection is `max_value`.
    pub fn height_for(&self, value: u32, max_value: u32) -> f32 {
        (value as f32 + 1.0) / (max_value as f32 + 1.0) * self.max_height
    }

    /// Rectangle for a stick of `value` standing at `position`.
    pub fn rect_at(&self, position: usize, value: u32, max_value: u32) -> StickRect {
        let height = self.height_for(value, max_value);
        StickRect {
            x: position as f32 * self.stick_width + (position + 1) as f32 * self.spacing,
            y: self.baseline - height,
            width: self.stick_width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config() -> LayoutConfig {
        LayoutConfig {
            window_width: 1000.0,
            space_percentage: 0.1,
            max_element_height: 500.0,
            element_y_position: 600.0,
        }
    }

    #[test]
    fn width_and_spacing_split_the_window() {
        let layout = StickLayout::new(&config(), 11);
        assert_relative_eq!(layout.spacing(), 10.0);
        assert_relative_eq!(layout.stick_width(), 900.0 / 11.0);
    }

    #[test]
    fn tallest_stick_reaches_max_height() {
        let layout = StickLayout::new(&config(), 4);
        assert_relative_eq!(layout.height_for(3, 3), 500.0);
        assert_relative_eq!(layout.height_for(0, 3), 125.0);
    }

    #[test]
    fn rects_stand_on_the_baseline() {
        let layout = StickLayout::new(&config(), 4);
        let rect = layout.rect_at(2, 1, 3);
        assert_relative_eq!(rect.y + rect.height, 600.0);
        assert_relative_eq!(rect.x, 2.0 * layout.stick_width() + 3.0 * layout.spacing());
    }

    #[test]
    fn single_stick_has_no_gaps() {
        let layout = StickLayout::new(&config(), 1);
        assert_relative_eq!(layout.spacing(), 0.0);
        assert_relative_eq!(layout.stick_width(), 900.0);
    }

    #[test]
    fn empty_collection_does_not_divide_by_zero() {
        let layout = StickLayout::new(&config(), 0);
        assert_relative_eq!(layout.stick_width(), 0.0);
    }
}
