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

//! Headless stick sorter.
//!
//! Plays the presentation layer against a [`SortCoordinator`]: polls it once
//! per frame, draws the sticks to the log, and drains sound notifications on
//! a separate thread.

mod cli;
mod config;
mod presenter;
mod sound;

use anyhow::{bail, Context, Result};
use clap::Parser;
use sortstick_agents::{RunReport, SortCoordinator};
use sortstick_core::ChannelSoundSink;
use sortstick_telemetry::init_logging;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::cli::Cli;
use crate::presenter::TextPresenter;
use crate::sound::SoundConsumer;

const FRAME_ROWS: usize = 16;
const FRAME_COLUMNS: usize = 120;
const SOUND_QUEUE: usize = 4096;

fn main() -> Result<()> {
    init_logging("info");
    let cli = Cli::parse();

    let config = config::load(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")?;
    log::debug!("Effective configuration: {config:?}");

    let (sink, events) = ChannelSoundSink::bounded(SOUND_QUEUE);
    let sound = SoundConsumer::spawn(events).context("Failed to start the sound consumer")?;

    let presenter = TextPresenter::new(&config.layout, config.element_count, FRAME_ROWS)
        .with_columns(config.element_count.min(FRAME_COLUMNS));
    let frame = Duration::from_millis(cli.frame_ms);
    let cancel_after = cli.cancel_after_ms.map(Duration::from_millis);
    let mut coordinator = SortCoordinator::new(config, Arc::new(sink));

    for algorithm in cli.algorithms() {
        coordinator.reset();
        if !coordinator.run(algorithm)? {
            bail!("The coordinator refused to start {algorithm}");
        }

        let report = drive(&mut coordinator, &presenter, frame, cancel_after)?;
        print!("{}", presenter.render(&coordinator.snapshot()));
        println!("{report}");
    }

    // Dropping the coordinator releases the last sound sender.
    drop(coordinator);
    let tally = sound.finish();
    log::info!(
        "Sound events: {} compare, {} complete, {} interrupted.",
        tally.compares,
        tally.completes,
        tally.interrupts
    );
    Ok(())
}

/// Polls the coordinator once per frame until its worker is reclaimed.
fn drive(
    coordinator: &mut SortCoordinator,
    presenter: &TextPresenter,
    frame: Duration,
    cancel_after: Option<Duration>,
) -> Result<RunReport> {
    let started = Instant::now();

    loop {
        if let Some(report) = coordinator.poll_completion()? {
            return Ok(report);
        }

        if let Some(limit) = cancel_after.filter(|limit| started.elapsed() >= *limit) {
            log::info!("Cancelling after {limit:?}.");
            return coordinator
                .cancel()?
                .context("The worker vanished before it could be cancelled");
        }

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "{}\n{}",
                TextPresenter::status_line(coordinator),
                presenter.render(&coordinator.snapshot())
            );
        }
        thread::sleep(frame);
    }
}
