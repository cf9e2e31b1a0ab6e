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

use clap::Parser;
use sortstick_core::SortAlgorithm;
use std::path::PathBuf;

use crate::config::Overrides;

/// Animate a sort over a collection of sticks in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// TOML file with a `SortConfig`; missing fields keep their defaults.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Algorithm to run: bubble, selection, insertion, merge or quick.
    #[arg(short, long, default_value = "bubble")]
    pub algorithm: SortAlgorithm,

    /// Run every algorithm in turn, reshuffling between runs.
    #[arg(long, conflicts_with = "algorithm")]
    pub all: bool,

    /// Number of sticks.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Pause after each step, in milliseconds.
    #[arg(short, long)]
    pub delay_ms: Option<u64>,

    /// Pause between completion-wave ticks, in milliseconds.
    #[arg(long)]
    pub color_delay_ms: Option<u64>,

    /// Seed for reproducible shuffles.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Cancel the run this long after it starts.
    #[arg(long, value_name = "MS")]
    pub cancel_after_ms: Option<u64>,

    /// Presentation frame interval, in milliseconds.
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,
}

impl Cli {
    /// The algorithms this invocation should run, in order.
    pub fn algorithms(&self) -> Vec<SortAlgorithm> {
        if self.all {
            SortAlgorithm::ALL.to_vec()
        } else {
            vec![self.algorithm]
        }
    }

    /// Command-line values that take precedence over the config file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            element_count: self.count,
            operation_delay_ms: self.delay_ms,
            color_delay_ms: self.color_delay_ms,
            shuffle_seed: self.seed,
        }
    }
}
