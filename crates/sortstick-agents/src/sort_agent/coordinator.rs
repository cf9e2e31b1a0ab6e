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

//! The agent that owns a sort run from command to reclaimed worker.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sortstick_core::{
    PhaseFlag, SortAlgorithm, SortConfig, SortError, SortPhase, SortResult, SoundSink, StickView,
};
use sortstick_data::{StickCollection, ValueDistribution};
use sortstick_lanes::{run_lane, LaneOutcome, LaneRegistry, StepContext};
use sortstick_telemetry::{MetricsSnapshot, SortMetrics};
use std::any::Any;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use super::report::RunReport;

/// The background execution of one lane.
struct SortWorker {
    algorithm: SortAlgorithm,
    handle: JoinHandle<SortResult<LaneOutcome>>,
    started: Instant,
}

/// Coordinates sort runs over one shared stick collection.
///
/// At most one worker exists at any time: [`run`](Self::run) is ignored while
/// one is held, and [`reset`](Self::reset), [`cancel`](Self::cancel) and
/// `Drop` all join it before returning. A worker that finishes on its own is
/// reclaimed by [`poll_completion`](Self::poll_completion), which the
/// presentation loop calls once per frame.
///
/// Mutating commands take `&mut self`; callers that issue commands from
/// several threads wrap the coordinator in a `Mutex`. Read accessors only
/// touch the shared collection, counters and phase, so they observe the
/// worker's progress without waiting for it.
pub struct SortCoordinator {
    config: SortConfig,
    collection: Arc<RwLock<StickCollection>>,
    metrics: Arc<SortMetrics>,
    phase: Arc<PhaseFlag>,
    sound: Arc<dyn SoundSink>,
    lanes: LaneRegistry,
    worker: Option<SortWorker>,
    algorithm: Option<SortAlgorithm>,
    current_delay_ms: u64,
    rng: StdRng,
}

impl SortCoordinator {
    /// Creates a coordinator over `config.element_count` ascending sticks.
    ///
    /// The collection starts in order; call [`reset`](Self::reset) to shuffle.
    pub fn new(config: SortConfig, sound: Arc<dyn SoundSink>) -> Self {
        let collection =
            StickCollection::initialize(config.element_count, ValueDistribution::Ascending);
        Self::with_collection(config, collection, sound)
    }

    /// Creates a coordinator over an existing collection.
    ///
    /// `config.element_count` is ignored in favour of the collection's length.
    pub fn with_collection(
        mut config: SortConfig,
        collection: StickCollection,
        sound: Arc<dyn SoundSink>,
    ) -> Self {
        config.element_count = collection.len();
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            config,
            collection: Arc::new(RwLock::new(collection)),
            metrics: Arc::new(SortMetrics::new()),
            phase: Arc::new(PhaseFlag::new()),
            sound,
            lanes: LaneRegistry::with_defaults(),
            worker: None,
            algorithm: None,
            current_delay_ms: 0,
            rng,
        }
    }

    /// Replaces the lanes runs are looked up in.
    pub fn with_lanes(mut self, lanes: LaneRegistry) -> Self {
        self.lanes = lanes;
        self
    }

    /// Starts `algorithm` on a fresh worker.
    ///
    /// Returns `Ok(false)` without touching any state if a worker is already
    /// held, including one that has finished but not yet been reclaimed by
    /// [`poll_completion`](Self::poll_completion).
    pub fn run(&mut self, algorithm: SortAlgorithm) -> SortResult<bool> {
        if self.worker.is_some() || self.phase.is_sorting() {
            log::debug!("Ignoring run({algorithm}): a sort is already in progress.");
            return Ok(false);
        }

        let lane = self
            .lanes
            .get(algorithm)
            .ok_or(SortError::LaneMissing(algorithm))?;

        if !self.phase.begin() {
            log::debug!("Ignoring run({algorithm}): phase changed concurrently.");
            return Ok(false);
        }

        self.metrics.reset();
        self.write_collection().clear_highlights();
        self.algorithm = Some(algorithm);
        self.current_delay_ms = self.config.operation_delay_ms;

        let ctx = StepContext::new(
            Arc::clone(&self.collection),
            Arc::clone(&self.metrics),
            Arc::clone(&self.phase),
            Arc::clone(&self.sound),
        )
        .with_delays(self.config.step_delay(), self.config.color_delay());

        let spawned = thread::Builder::new()
            .name(format!("sort-{}", algorithm.slug()))
            .spawn(move || run_lane(lane.as_ref(), &ctx));

        match spawned {
            Ok(handle) => {
                log::info!(
                    "{algorithm} started on {} sticks with a {} ms step delay.",
                    self.config.element_count,
                    self.current_delay_ms
                );
                self.worker = Some(SortWorker {
                    algorithm,
                    handle,
                    started: Instant::now(),
                });
                Ok(true)
            }
            Err(err) => {
                log::error!("Failed to spawn the {algorithm} worker: {err}");
                self.phase.halt();
                Err(SortError::WorkerSpawn(err.to_string()))
            }
        }
    }

    /// Reclaims the worker if it has exited, forcing the phase back to
    /// `NotSorting`.
    ///
    /// Returns `Ok(None)` while the worker is still running or when there is
    /// none. A worker that failed or panicked is reported as `Err`; the
    /// coordinator stays controllable either way.
    pub fn poll_completion(&mut self) -> SortResult<Option<RunReport>> {
        let finished = self
            .worker
            .as_ref()
            .is_some_and(|worker| worker.handle.is_finished());
        if !finished {
            return Ok(None);
        }

        match self.worker.take() {
            Some(worker) => self.reclaim(worker).map(Some),
            None => Ok(None),
        }
    }

    /// Requests cancellation and blocks until the worker has exited.
    ///
    /// The collection keeps whatever order the worker had reached. Returns
    /// the report of the reclaimed run, or `Ok(None)` if no worker was held.
    pub fn cancel(&mut self) -> SortResult<Option<RunReport>> {
        self.phase.halt();
        match self.worker.take() {
            Some(worker) => {
                log::debug!("Cancelling {} and joining its worker.", worker.algorithm);
                self.reclaim(worker).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Cancels any run, then reshuffles the collection and zeroes the counters.
    ///
    /// Safe to call with no worker. A failure reported by the cancelled
    /// worker is logged and discarded.
    pub fn reset(&mut self) {
        if let Err(err) = self.cancel() {
            log::warn!("Discarding failed run during reset: {err}");
        }

        {
            let mut collection = self
                .collection
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            collection.shuffle(&mut self.rng);
            collection.clear_highlights();
        }
        self.metrics.reset();
        self.current_delay_ms = 0;
        self.phase.halt();
        log::info!("Collection of {} sticks reset.", self.config.element_count);
    }

    /// Current phase.
    pub fn phase(&self) -> SortPhase {
        self.phase.get()
    }

    /// The algorithm of the latest run, if any has been started.
    pub fn current_algorithm(&self) -> Option<SortAlgorithm> {
        self.algorithm
    }

    /// Comparisons recorded by the current or latest run.
    pub fn comparisons(&self) -> u64 {
        self.metrics.comparisons()
    }

    /// Accesses recorded by the current or latest run.
    pub fn accesses(&self) -> u64 {
        self.metrics.accesses()
    }

    /// Both counters at once.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Number of sticks; constant for the coordinator's lifetime.
    pub fn element_count(&self) -> usize {
        self.config.element_count
    }

    /// The step delay of the latest run, or `0` after a reset.
    pub fn current_delay_ms(&self) -> u64 {
        self.current_delay_ms
    }

    /// Complexity label of the latest run's algorithm, e.g. `"O(n²)"`.
    pub fn complexity_label(&self) -> Option<&'static str> {
        self.algorithm.map(SortAlgorithm::complexity_label)
    }

    /// The configuration captured at construction.
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Per-stick value and highlight, in collection order.
    pub fn snapshot(&self) -> Vec<StickView> {
        self.read_collection().snapshot()
    }

    /// Values in collection order.
    pub fn values(&self) -> Vec<u32> {
        self.read_collection().values()
    }

    /// `true` if the collection is in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        self.read_collection().is_sorted()
    }

    /// `true` while a worker is held, finished or not.
    pub fn is_worker_active(&self) -> bool {
        self.worker.is_some()
    }

    fn reclaim(&self, worker: SortWorker) -> SortResult<RunReport> {
        let joined = worker.handle.join();
        self.phase.halt();

        let outcome = match joined {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                log::error!("{} failed: {err}", worker.algorithm);
                return Err(err);
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::error!("{} worker panicked: {message}", worker.algorithm);
                return Err(SortError::WorkerPanicked {
                    algorithm: worker.algorithm,
                    message,
                });
            }
        };

        let snapshot = self.metrics.snapshot();
        let report = RunReport {
            algorithm: worker.algorithm,
            outcome,
            comparisons: snapshot.comparisons,
            accesses: snapshot.accesses,
            elapsed: worker.started.elapsed(),
            sorted: self.is_sorted(),
        };
        log::info!("{report}");
        Ok(report)
    }

    fn read_collection(&self) -> RwLockReadGuard<'_, StickCollection> {
        self.collection.read().unwrap_or_else(|poisoned| {
            log::warn!("Stick collection lock was poisoned; recovering.");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write_collection(&self) -> RwLockWriteGuard<'_, StickCollection> {
        self.collection.write().unwrap_or_else(|poisoned| {
            log::warn!("Stick collection lock was poisoned; recovering.");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl Drop for SortCoordinator {
    fn drop(&mut self) {
        if let Err(err) = self.cancel() {
            log::warn!("Sort worker failed during shutdown: {err}");
        }
    }
}

impl std::fmt::Debug for SortCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortCoordinator")
            .field("phase", &self.phase.get())
            .field("algorithm", &self.algorithm)
            .field("element_count", &self.config.element_count)
            .field("worker_active", &self.worker.is_some())
            .field("lanes", &self.lanes)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
