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

//! Construction-time configuration for a sort coordinator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Upper bound on `element_count`; beyond this the animation is unreadable.
pub const MAX_ELEMENT_COUNT: usize = 10_000;

/// Geometry inputs used only to lay sticks out on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of the drawing surface.
    pub window_width: f32,
    /// Fraction of the width spent on gaps between sticks.
    pub space_percentage: f32,
    /// Height of the tallest stick.
    pub max_element_height: f32,
    /// Baseline the sticks stand on.
    pub element_y_position: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            window_width: 1920.0,
            space_percentage: 0.1,
            max_element_height: 820.0,
            element_y_position: 1020.0,
        }
    }
}

/// Settings captured when a coordinator is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Number of sticks in the collection.
    pub element_count: usize,
    /// Pause after each primitive step, in milliseconds.
    pub operation_delay_ms: u64,
    /// Pause between completion-wave ticks, in milliseconds.
    pub color_delay_ms: u64,
    /// Seed for shuffles; `None` draws from OS entropy.
    pub shuffle_seed: Option<u64>,
    /// Screen geometry.
    pub layout: LayoutConfig,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            element_count: 150,
            operation_delay_ms: 20,
            color_delay_ms: 8,
            shuffle_seed: None,
            layout: LayoutConfig::default(),
        }
    }
}

impl SortConfig {
    /// Step delay as a `Duration`.
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.operation_delay_ms)
    }

    /// Completion-wave delay as a `Duration`.
    pub fn color_delay(&self) -> Duration {
        Duration::from_millis(self.color_delay_ms)
    }

    /// Checks ranges that would make the collection or layout meaningless.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.element_count > MAX_ELEMENT_COUNT {
            return Err(InvalidConfig(format!(
                "element_count {} exceeds the maximum of {MAX_ELEMENT_COUNT}",
                self.element_count
            )));
        }
        let layout = &self.layout;
        if !(0.0..1.0).contains(&layout.space_percentage) {
            return Err(InvalidConfig(format!(
                "layout.space_percentage must be in [0, 1), got {}",
                layout.space_percentage
            )));
        }
        if layout.window_width <= 0.0 || layout.max_element_height <= 0.0 {
            return Err(InvalidConfig(
                "layout.window_width and layout.max_element_height must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// A configuration value outside its accepted range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidConfig(pub String);

impl fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid configuration: {}", self.0)
    }
}

impl std::error::Error for InvalidConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SortConfig::default().validate(), Ok(()));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: SortConfig =
            serde_json::from_str(r#"{ "element_count": 12, "layout": { "window_width": 640.0 } }"#)
                .expect("Partial config should deserialize");

        assert_eq!(config.element_count, 12);
        assert_eq!(config.operation_delay_ms, 20);
        assert_eq!(config.layout.window_width, 640.0);
        assert_eq!(config.layout.max_element_height, 820.0);
    }

    #[test]
    fn oversized_collections_are_rejected() {
        let config = SortConfig {
            element_count: MAX_ELEMENT_COUNT + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn spacing_must_leave_room_for_sticks() {
        let mut config = SortConfig::default();
        config.layout.space_percentage = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn delays_convert_to_durations() {
        let config = SortConfig {
            operation_delay_ms: 5,
            color_delay_ms: 2,
            ..Default::default()
        };
        assert_eq!(config.step_delay(), Duration::from_millis(5));
        assert_eq!(config.color_delay(), Duration::from_millis(2));
    }
}
