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

use sortstick_agents::{RunReport, SortCoordinator};
use sortstick_core::{
    ChannelSoundSink, SilentSink, SortAlgorithm, SortConfig, SortError, SortPhase, SortResult,
    SoundEvent,
};
use sortstick_data::StickCollection;
use sortstick_lanes::{LaneOutcome, LaneRegistry, SortLane, StepContext};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

fn config(count: usize, delay_ms: u64) -> SortConfig {
    SortConfig {
        element_count: count,
        operation_delay_ms: delay_ms,
        color_delay_ms: 0,
        shuffle_seed: Some(42),
        ..Default::default()
    }
}

fn wait_for_report(coordinator: &mut SortCoordinator) -> SortResult<RunReport> {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(report) = coordinator.poll_completion()? {
            return Ok(report);
        }
        assert!(Instant::now() < deadline, "Run did not finish in time");
        thread::sleep(Duration::from_millis(1));
    }
}

/// A lane that takes a few pauses and tracks how many copies of itself run at once.
#[derive(Default)]
struct OverlapWatchLane {
    active: AtomicUsize,
    peak: AtomicUsize,
    starts: AtomicUsize,
}

impl SortLane for OverlapWatchLane {
    fn strategy_name(&self) -> &'static str {
        "OverlapWatch"
    }

    fn algorithm(&self) -> SortAlgorithm {
        SortAlgorithm::BubbleSort
    }

    fn execute(&self, ctx: &StepContext) -> SortResult<LaneOutcome> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let mut outcome = LaneOutcome::Completed;
        for _ in 0..5 {
            if !ctx.is_sorting() {
                outcome = LaneOutcome::Cancelled;
                break;
            }
            ctx.pause();
        }

        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(outcome)
    }
}

struct PanickingLane;

impl SortLane for PanickingLane {
    fn strategy_name(&self) -> &'static str {
        "Panicking"
    }

    fn algorithm(&self) -> SortAlgorithm {
        SortAlgorithm::QuickSort
    }

    fn execute(&self, _ctx: &StepContext) -> SortResult<LaneOutcome> {
        panic!("lane logic defect");
    }
}

struct OutOfRangeLane;

impl SortLane for OutOfRangeLane {
    fn strategy_name(&self) -> &'static str {
        "OutOfRange"
    }

    fn algorithm(&self) -> SortAlgorithm {
        SortAlgorithm::SelectionSort
    }

    fn execute(&self, ctx: &StepContext) -> SortResult<LaneOutcome> {
        ctx.compare(0, ctx.len(), self.tally())?;
        Ok(LaneOutcome::Completed)
    }
}

#[test]
fn bubble_sort_of_the_five_stick_example() {
    let collection = StickCollection::from_values([3, 1, 4, 1, 5]);
    let mut coordinator =
        SortCoordinator::with_collection(config(0, 1), collection, Arc::new(SilentSink));

    coordinator.reset();
    let mut shuffled = coordinator.values();
    shuffled.sort_unstable();
    assert_eq!(shuffled, vec![1, 1, 3, 4, 5], "Shuffle must only reorder");

    assert_eq!(coordinator.run(SortAlgorithm::BubbleSort), Ok(true));
    assert_eq!(coordinator.phase(), SortPhase::Sorting);
    assert_eq!(coordinator.current_delay_ms(), 1);
    assert_eq!(coordinator.complexity_label(), Some("O(n²)"));

    let report = wait_for_report(&mut coordinator).unwrap();

    assert!(report.is_completed());
    assert!(report.sorted);
    assert_eq!(coordinator.values(), vec![1, 1, 3, 4, 5]);
    assert!(coordinator.is_sorted());
    assert!(coordinator.comparisons() > 0);
    assert_eq!(coordinator.phase(), SortPhase::NotSorting);
    assert!(!coordinator.is_worker_active());
}

#[test]
fn every_algorithm_completes_through_the_coordinator() {
    let mut coordinator = SortCoordinator::new(config(30, 0), Arc::new(SilentSink));

    for algorithm in SortAlgorithm::ALL {
        coordinator.reset();
        assert!(coordinator.run(algorithm).unwrap(), "{algorithm} was rejected");
        let report = wait_for_report(&mut coordinator).unwrap();

        assert_eq!(report.algorithm, algorithm);
        assert!(report.sorted, "{algorithm} left the collection unsorted");
        assert_eq!(coordinator.current_algorithm(), Some(algorithm));
        assert_eq!(coordinator.phase(), SortPhase::NotSorting);
    }
}

#[test]
fn reset_mid_run_cancels_promptly_and_allows_a_new_run() {
    let step_delay_ms = 20;
    let mut coordinator = SortCoordinator::new(config(40, step_delay_ms), Arc::new(SilentSink));
    coordinator.reset();

    assert_eq!(coordinator.run(SortAlgorithm::BubbleSort), Ok(true));
    thread::sleep(Duration::from_millis(step_delay_ms));

    let started = Instant::now();
    coordinator.reset();
    let took = started.elapsed();

    assert_eq!(coordinator.phase(), SortPhase::NotSorting);
    assert!(!coordinator.is_worker_active());
    assert!(
        took <= Duration::from_millis(2 * step_delay_ms),
        "reset took {took:?}, more than two step delays"
    );
    assert_eq!(coordinator.comparisons(), 0);
    assert_eq!(coordinator.current_delay_ms(), 0);

    assert_eq!(coordinator.run(SortAlgorithm::InsertionSort), Ok(true));
    coordinator.cancel().unwrap();
}

#[test]
fn rerun_after_reset_completes_normally() {
    let mut coordinator = SortCoordinator::new(config(10, 2), Arc::new(SilentSink));
    coordinator.reset();

    assert_eq!(coordinator.run(SortAlgorithm::BubbleSort), Ok(true));
    thread::sleep(Duration::from_millis(2));
    coordinator.reset();

    assert_eq!(coordinator.run(SortAlgorithm::BubbleSort), Ok(true));
    let report = wait_for_report(&mut coordinator).unwrap();
    assert!(report.is_completed());
    assert!(coordinator.is_sorted());
}

#[test]
fn run_while_sorting_is_ignored() {
    let mut coordinator = SortCoordinator::new(config(30, 5), Arc::new(SilentSink));
    coordinator.reset();

    assert_eq!(coordinator.run(SortAlgorithm::SelectionSort), Ok(true));
    assert_eq!(coordinator.run(SortAlgorithm::QuickSort), Ok(false));
    assert_eq!(
        coordinator.current_algorithm(),
        Some(SortAlgorithm::SelectionSort),
        "A rejected run must not change the label"
    );

    let report = coordinator.cancel().unwrap().expect("A worker was running");
    assert_eq!(report.algorithm, SortAlgorithm::SelectionSort);
    assert_eq!(report.outcome, LaneOutcome::Cancelled);
}

#[test]
fn concurrent_runs_never_start_a_second_worker() {
    let watch = Arc::new(OverlapWatchLane::default());
    let mut lanes = LaneRegistry::new();
    lanes.register(watch.clone());

    let coordinator = Arc::new(Mutex::new(
        SortCoordinator::new(config(4, 1), Arc::new(SilentSink)).with_lanes(lanes),
    ));
    let accepted = Arc::new(AtomicUsize::new(0));

    let mut threads = Vec::new();
    for _ in 0..4 {
        let coordinator = Arc::clone(&coordinator);
        let accepted = Arc::clone(&accepted);
        threads.push(thread::spawn(move || {
            for _ in 0..50 {
                if coordinator
                    .lock()
                    .unwrap()
                    .run(SortAlgorithm::BubbleSort)
                    .unwrap()
                {
                    accepted.fetch_add(1, Ordering::SeqCst);
                }
                thread::sleep(Duration::from_micros(300));
            }
        }));
    }
    {
        let coordinator = Arc::clone(&coordinator);
        threads.push(thread::spawn(move || {
            for _ in 0..200 {
                coordinator.lock().unwrap().poll_completion().unwrap();
                thread::sleep(Duration::from_millis(1));
            }
        }));
    }
    {
        let coordinator = Arc::clone(&coordinator);
        threads.push(thread::spawn(move || {
            for _ in 0..10 {
                coordinator.lock().unwrap().reset();
                thread::sleep(Duration::from_millis(5));
            }
        }));
    }

    for handle in threads {
        handle.join().expect("Stress thread panicked");
    }
    coordinator.lock().unwrap().cancel().unwrap();

    assert_eq!(watch.peak.load(Ordering::SeqCst), 1, "Two workers overlapped");
    assert_eq!(watch.active.load(Ordering::SeqCst), 0);
    assert_eq!(
        watch.starts.load(Ordering::SeqCst),
        accepted.load(Ordering::SeqCst)
    );
    assert!(accepted.load(Ordering::SeqCst) > 0);
}

#[test]
fn counters_grow_during_a_run_and_restart_at_zero() {
    let mut coordinator = SortCoordinator::new(config(25, 1), Arc::new(SilentSink));
    coordinator.reset();
    assert_eq!(coordinator.run(SortAlgorithm::InsertionSort), Ok(true));

    let mut last = (0, 0);
    while coordinator.poll_completion().unwrap().is_none() {
        let now = (coordinator.comparisons(), coordinator.accesses());
        assert!(now.0 >= last.0 && now.1 >= last.1, "Counters went backwards");
        last = now;
        thread::sleep(Duration::from_millis(1));
    }
    assert!(coordinator.comparisons() > 0);

    coordinator.reset();
    assert_eq!(coordinator.comparisons(), 0);
    assert_eq!(coordinator.accesses(), 0);

    assert_eq!(coordinator.run(SortAlgorithm::InsertionSort), Ok(true));
    let report = wait_for_report(&mut coordinator).unwrap();
    assert_eq!(report.comparisons, coordinator.comparisons());
}

#[test]
fn worker_panic_is_reported_and_the_coordinator_recovers() {
    let mut lanes = LaneRegistry::with_defaults();
    lanes.register(Arc::new(PanickingLane));
    let mut coordinator =
        SortCoordinator::new(config(6, 0), Arc::new(SilentSink)).with_lanes(lanes);
    coordinator.reset();

    assert_eq!(coordinator.run(SortAlgorithm::QuickSort), Ok(true));
    match wait_for_report(&mut coordinator) {
        Err(SortError::WorkerPanicked { algorithm, message }) => {
            assert_eq!(algorithm, SortAlgorithm::QuickSort);
            assert!(message.contains("lane logic defect"));
        }
        other => panic!("Expected a worker panic, got {other:?}"),
    }
    assert_eq!(coordinator.phase(), SortPhase::NotSorting);
    assert!(!coordinator.is_worker_active());

    assert_eq!(coordinator.run(SortAlgorithm::BubbleSort), Ok(true));
    assert!(wait_for_report(&mut coordinator).unwrap().sorted);
}

#[test]
fn lane_errors_surface_through_poll_completion() {
    let mut lanes = LaneRegistry::with_defaults();
    lanes.register(Arc::new(OutOfRangeLane));
    let mut coordinator =
        SortCoordinator::new(config(4, 0), Arc::new(SilentSink)).with_lanes(lanes);

    assert_eq!(coordinator.run(SortAlgorithm::SelectionSort), Ok(true));
    assert_eq!(
        wait_for_report(&mut coordinator),
        Err(SortError::IndexOutOfRange { index: 4, len: 4 })
    );
    assert_eq!(coordinator.phase(), SortPhase::NotSorting);
}

#[test]
fn tiny_collections_complete_with_zero_steps() {
    for count in [0, 1] {
        let mut coordinator = SortCoordinator::new(config(count, 5), Arc::new(SilentSink));
        coordinator.reset();

        assert_eq!(coordinator.run(SortAlgorithm::InPlaceMergeSort), Ok(true));
        let report = wait_for_report(&mut coordinator).unwrap();

        assert!(report.is_completed());
        assert!(report.sorted);
        assert_eq!(report.comparisons, 0);
        assert_eq!(coordinator.element_count(), count);
    }
}

#[test]
fn sound_events_reach_the_channel() {
    let (sink, events) = ChannelSoundSink::bounded(4096);
    let mut coordinator = SortCoordinator::new(config(8, 0), Arc::new(sink));
    coordinator.reset();

    assert_eq!(coordinator.run(SortAlgorithm::QuickSort), Ok(true));
    wait_for_report(&mut coordinator).unwrap();

    let received: Vec<SoundEvent> = events.try_iter().collect();
    assert_eq!(received.last(), Some(&SoundEvent::Complete));
    assert!(!received.contains(&SoundEvent::Interrupted));
}

#[test]
fn dropping_the_coordinator_joins_its_worker() {
    let watch = Arc::new(OverlapWatchLane::default());
    let mut lanes = LaneRegistry::new();
    lanes.register(watch.clone());

    let mut coordinator =
        SortCoordinator::new(config(4, 50), Arc::new(SilentSink)).with_lanes(lanes);
    assert_eq!(coordinator.run(SortAlgorithm::BubbleSort), Ok(true));
    thread::sleep(Duration::from_millis(5));
    drop(coordinator);

    assert_eq!(watch.starts.load(Ordering::SeqCst), 1);
    assert_eq!(watch.active.load(Ordering::SeqCst), 0);
}
