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

//! Terminal rendering of coordinator snapshots.

use sortstick_agents::SortCoordinator;
use sortstick_core::{Highlight, LayoutConfig, StickView};
use sortstick_data::{StickLayout, StickRect};
use std::fmt::Write;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const BAR: char = '█';

/// Draws sticks as columns of block characters, coloured by highlight.
///
/// Each stick goes into the text column under the centre of its
/// [`StickLayout`] rectangle, and its height is scaled from window units to
/// `rows` text rows, so the text frame keeps the proportions of the windowed
/// one. When sticks outnumber columns, neighbours share a column and the
/// rightmost one is drawn.
#[derive(Debug, Clone)]
pub struct TextPresenter {
    config: LayoutConfig,
    rows: usize,
    columns: usize,
}

impl TextPresenter {
    /// Creates a presenter for `count` sticks drawn `rows` rows tall, one
    /// column per stick.
    pub fn new(config: &LayoutConfig, count: usize, rows: usize) -> Self {
        Self {
            config: config.clone(),
            rows: rows.max(1),
            columns: count,
        }
    }

    /// Fits the frame into `columns` text columns.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Number of text rows a stick `height` window units tall fills.
    fn rows_for_height(&self, height: f32) -> usize {
        let fraction = height / self.config.max_element_height;
        ((fraction * self.rows as f32).round() as usize).clamp(1, self.rows)
    }

    /// Number of text rows the stick with `value` fills.
    pub fn rows_for(&self, value: u32, max_value: u32) -> usize {
        let layout = StickLayout::new(&self.config, 1);
        self.rows_for_height(layout.height_for(value, max_value))
    }

    /// Text column for a rectangle, given the right edge of the last stick.
    fn column_for(&self, rect: StickRect, extent: f32) -> usize {
        let centre = rect.x + rect.width / 2.0;
        let column = (centre / extent * self.columns as f32).floor().max(0.0) as usize;
        column.min(self.columns.saturating_sub(1))
    }

    /// Renders one frame, top row first.
    pub fn render(&self, sticks: &[StickView]) -> String {
        let layout = StickLayout::new(&self.config, sticks.len());
        let max_value = sticks.iter().map(|s| s.value).max().unwrap_or(0);
        let rects: Vec<StickRect> = sticks
            .iter()
            .enumerate()
            .map(|(position, s)| layout.rect_at(position, s.value, max_value))
            .collect();

        // (highlight, rows) per text column.
        let mut cells: Vec<Option<(Highlight, usize)>> = vec![None; self.columns];
        if let Some(last) = rects.last() {
            let extent = last.x + last.width;
            if extent > 0.0 && self.columns > 0 {
                for (stick, rect) in sticks.iter().zip(&rects) {
                    cells[self.column_for(*rect, extent)] =
                        Some((stick.highlight, self.rows_for_height(rect.height)));
                }
            }
        }

        let mut frame = String::new();
        for row in (1..=self.rows).rev() {
            for cell in &cells {
                match cell {
                    Some((highlight, height)) if *height >= row => {
                        let _ = write!(frame, "{}{BAR}{RESET}", colour(*highlight));
                    }
                    _ => frame.push(' '),
                }
            }
            frame.push('\n');
        }
        frame
    }

    /// One-line summary of the coordinator's counters and labels.
    pub fn status_line(coordinator: &SortCoordinator) -> String {
        let algorithm = coordinator
            .current_algorithm()
            .map_or_else(|| "-".to_string(), |a| a.to_string());
        format!(
            "{algorithm} {} | {} sticks | {} comparisons | {} accesses | {} ms delay | {:?}",
            coordinator.complexity_label().unwrap_or(""),
            coordinator.element_count(),
            coordinator.comparisons(),
            coordinator.accesses(),
            coordinator.current_delay_ms(),
            coordinator.phase(),
        )
    }
}

fn colour(highlight: Highlight) -> &'static str {
    match highlight {
        Highlight::Normal => "",
        Highlight::Processing => RED,
        Highlight::Placed => GREEN,
    }
}
