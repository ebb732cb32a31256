// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;
use txkeep_adapters::{FakeKvStore, KvCall};
use txkeep_core::FakeClock;
use yare::parameterized;

const HOUR: Duration = Duration::from_secs(3600);

fn scheduler(
    strategy: CleanStrategy,
    store: &FakeKvStore,
    clock: &FakeClock,
) -> CleanupScheduler<FakeKvStore, FakeClock> {
    CleanupScheduler::new(
        strategy,
        store.clone(),
        StateKeys::new("kit"),
        AuthorName::new("app").unwrap(),
        clock.clone(),
        LogLevel::Detail,
    )
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

#[tokio::test]
async fn none_never_cleans_and_touches_nothing() {
    let store = FakeKvStore::new();
    let s = scheduler(CleanStrategy::None, &store, &FakeClock::new());

    for _ in 0..5 {
        assert!(!s.should_clean().await);
    }
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn by_duration_throttles_within_window() {
    let store = FakeKvStore::new();
    let clock = FakeClock::new();
    let s = scheduler(CleanStrategy::ByDuration { interval: HOUR }, &store, &clock);

    assert!(s.should_clean().await);
    assert!(!s.should_clean().await);

    clock.advance(HOUR - Duration::from_secs(1));
    assert!(!s.should_clean().await);

    clock.advance(Duration::from_secs(1));
    assert!(s.should_clean().await);
    assert_eq!(store.value("kit.cleanup.app.last"), Some(clock.now().as_micros()));
}

#[tokio::test]
async fn by_duration_reads_persisted_time_once() {
    let store = FakeKvStore::new();
    let clock = FakeClock::new();
    store.put("kit.cleanup.app.last", clock.now().as_micros());
    let s = scheduler(CleanStrategy::ByDuration { interval: HOUR }, &store, &clock);

    assert!(!s.should_clean().await);
    assert!(!s.should_clean().await);

    let reads = store
        .calls()
        .iter()
        .filter(|c| matches!(c, KvCall::Get { key } if key == "kit.cleanup.app.last"))
        .count();
    assert_eq!(reads, 1);
}

#[parameterized(
    every_call = { 1, &[true, true, true] },
    every_third = { 3, &[false, false, true, false, false, true] },
    every_second = { 2, &[false, true, false, true] },
)]
fn by_notification_counts_and_resets(times: u32, expected: &[bool]) {
    block_on(async {
        let store = FakeKvStore::new();
        let s = scheduler(
            CleanStrategy::ByNotification { times },
            &store,
            &FakeClock::new(),
        );

        let mut decisions = Vec::new();
        for _ in expected {
            decisions.push(s.should_clean().await);
        }
        assert_eq!(decisions, expected);
    });
}

#[tokio::test]
async fn notification_count_survives_restart() {
    let store = FakeKvStore::new();
    let clock = FakeClock::new();
    let strategy = CleanStrategy::ByNotification { times: 3 };

    let first = scheduler(strategy, &store, &clock);
    assert!(!first.should_clean().await);
    assert!(!first.should_clean().await);
    assert_eq!(store.value("kit.cleanup.app.count"), Some(2));
    drop(first);

    let second = scheduler(strategy, &store, &clock);
    assert!(second.should_clean().await);
    assert_eq!(store.value("kit.cleanup.app.count"), Some(0));
}

#[tokio::test]
async fn last_cleanup_survives_restart() {
    let store = FakeKvStore::new();
    let clock = FakeClock::new();
    let strategy = CleanStrategy::ByDuration { interval: HOUR };

    assert!(scheduler(strategy, &store, &clock).should_clean().await);

    clock.advance(Duration::from_secs(60));
    assert!(!scheduler(strategy, &store, &clock).should_clean().await);
}

#[tokio::test]
async fn persist_failure_keeps_in_memory_decision() {
    let store = FakeKvStore::new();
    let clock = FakeClock::new();
    store.fail_writes(true);
    let s = scheduler(CleanStrategy::ByDuration { interval: HOUR }, &store, &clock);

    assert!(s.should_clean().await);
    assert!(!s.should_clean().await);
    assert_eq!(store.value("kit.cleanup.app.last"), None);
}

#[tokio::test]
async fn read_failure_starts_from_scratch() {
    let store = FakeKvStore::new();
    let clock = FakeClock::new();
    store.put("kit.cleanup.app.last", clock.now().as_micros());
    store.fail_reads(true);
    let s = scheduler(CleanStrategy::ByDuration { interval: HOUR }, &store, &clock);

    assert!(s.should_clean().await);
}

#[tokio::test]
async fn authors_throttle_independently() {
    let store = FakeKvStore::new();
    let clock = FakeClock::new();
    let strategy = CleanStrategy::ByDuration { interval: HOUR };
    assert!(scheduler(strategy, &store, &clock).should_clean().await);

    let widget = CleanupScheduler::new(
        strategy,
        store.clone(),
        StateKeys::new("kit"),
        AuthorName::new("widget").unwrap(),
        clock.clone(),
        LogLevel::Silent,
    );
    assert!(widget.should_clean().await);
}
