// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification-driven merge and cleanup worker
//!
//! One worker task per coordinator. Triggers land on a [`Notify`], whose
//! single stored permit folds a burst of notifications arriving mid-pass
//! into one follow-up pass.

use crate::cleaner::{CleanReport, Cleaner};
use crate::error::TrackingError;
use crate::keys::StateKeys;
use crate::merger::{MergeReport, Merger};
use crate::offset::OffsetTracker;
use crate::scheduler::CleanupScheduler;
use crate::watermark::WatermarkCalculator;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::Instrument;
use txkeep_adapters::{KvStore, MergeSink, TransactionLog};
use txkeep_core::{Clock, ConfigError, LogLevel, TrackerConfig};

/// What the worker is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Idle,
    Merging,
    Cleaning,
}

/// Outcome of one pass; `clean` is `None` when the scheduler declined
#[derive(Debug)]
pub struct PassReport {
    pub merge: Result<MergeReport, TrackingError>,
    pub clean: Option<Result<CleanReport, TrackingError>>,
}

/// Collaborators the coordinator drives
pub struct TrackerDeps<L, K, C> {
    pub log: L,
    pub store: K,
    pub clock: C,
    pub sinks: Vec<Arc<dyn MergeSink>>,
}

impl<L, K, C> TrackerDeps<L, K, C> {
    pub fn new(log: L, store: K, clock: C) -> Self {
        Self {
            log,
            store,
            clock,
            sinks: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: impl MergeSink + 'static) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }
}

struct PassRunner<L, K, C> {
    merger: Merger<L, K>,
    scheduler: CleanupScheduler<K, C>,
    cleaner: Cleaner<L, K, C>,
    state: watch::Sender<CoordinatorState>,
    serial: tokio::sync::Mutex<()>,
    passes: AtomicU64,
    level: LogLevel,
}

impl<L: TransactionLog, K: KvStore, C: Clock> PassRunner<L, K, C> {
    async fn run(&self) -> PassReport {
        let _serial = self.serial.lock().await;
        let span = tracing::info_span!("pass", author = %self.merger.author());

        let report = async {
            self.state.send_replace(CoordinatorState::Merging);
            let merge = self.merger.merge().await;
            self.log_merge(&merge);

            let clean = if self.scheduler.should_clean().await {
                self.state.send_replace(CoordinatorState::Cleaning);
                let clean = self.cleaner.clean().await;
                self.log_clean(&clean);
                Some(clean)
            } else {
                None
            };

            PassReport { merge, clean }
        }
        .instrument(span)
        .await;

        self.passes.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(CoordinatorState::Idle);
        report
    }

    fn log_merge(&self, merge: &Result<MergeReport, TrackingError>) {
        if !self.level.shows_status() {
            return;
        }
        match merge {
            Ok(report) => tracing::info!(
                merged = report.merged,
                cursor = %report.cursor,
                failures = report.failures.len(),
                "merged"
            ),
            Err(e) => tracing::warn!(error = %e, "merge failed"),
        }
    }

    fn log_clean(&self, clean: &Result<CleanReport, TrackingError>) {
        if !self.level.shows_status() {
            return;
        }
        match clean {
            Ok(report) => tracing::info!(
                deleted = report.deleted,
                delete_before = %report.delete_before,
                "cleaned"
            ),
            Err(e) => tracing::warn!(error = %e, "cleanup failed"),
        }
    }
}

/// Runs merge passes, and cleanups when the scheduler allows, on each
/// change notification
pub struct TrackingCoordinator<L, K, C> {
    runner: Arc<PassRunner<L, K, C>>,
    trigger: Arc<Notify>,
    running: AtomicBool,
    state: watch::Receiver<CoordinatorState>,
    shutdown: watch::Sender<bool>,
    worker: Mutex<Option<JoinHandle<()>>>,
    level: LogLevel,
}

impl<L: TransactionLog, K: KvStore, C: Clock> TrackingCoordinator<L, K, C> {
    /// Validate `config`, wire the components and spawn the worker
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: &TrackerConfig, deps: TrackerDeps<L, K, C>) -> Result<Self, ConfigError> {
        config.validate()?;
        let roster = config.roster()?;
        let author = roster.current().clone();
        let level = config.log_level;
        let keys = StateKeys::new(config.namespace.clone());
        let offsets = OffsetTracker::new(deps.store.clone(), keys.clone(), level);

        let merger = Merger::new(
            deps.log.clone(),
            offsets.clone(),
            deps.sinks,
            author.clone(),
            config.include_mirroring,
            level,
        );
        let scheduler = CleanupScheduler::new(
            config.clean,
            deps.store,
            keys,
            author,
            deps.clock.clone(),
            level,
        );
        let cleaner = Cleaner::new(
            deps.log,
            WatermarkCalculator::new(offsets, roster, level),
            config.maximum_duration,
            deps.clock,
            level,
        );

        let (state_tx, state_rx) = watch::channel(CoordinatorState::Idle);
        let runner = Arc::new(PassRunner {
            merger,
            scheduler,
            cleaner,
            state: state_tx,
            serial: tokio::sync::Mutex::new(()),
            passes: AtomicU64::new(0),
            level,
        });
        let trigger = Arc::new(Notify::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let worker = tokio::spawn(worker_loop(
            Arc::clone(&runner),
            Arc::clone(&trigger),
            shutdown_rx,
        ));

        if level.shows_status() {
            tracing::info!(
                author = %runner.merger.author(),
                strategy = ?config.clean,
                auto_start = config.auto_start,
                "tracker started"
            );
        }

        Ok(Self {
            runner,
            trigger,
            running: AtomicBool::new(config.auto_start),
            state: state_rx,
            shutdown: shutdown_tx,
            worker: Mutex::new(Some(worker)),
            level,
        })
    }

    /// Signal that new transactions may exist
    ///
    /// Returns `false` when the coordinator is stopped and the trigger was
    /// dropped.
    pub fn notify(&self) -> bool {
        if !self.is_running() {
            if self.level.shows_detail() {
                tracing::debug!("tracker stopped, trigger ignored");
            }
            return false;
        }
        self.trigger.notify_one();
        true
    }

    /// Run one pass now, serialized with the worker
    pub async fn run_pass(&self) -> PassReport {
        self.runner.run().await
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    /// Refuse further triggers; a pass already running completes
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> CoordinatorState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CoordinatorState> {
        self.state.clone()
    }

    /// Completed passes since spawn
    pub fn passes(&self) -> u64 {
        self.runner.passes.load(Ordering::SeqCst)
    }

    /// Stop the worker after its current pass and wait for it
    pub async fn shutdown(self) {
        self.stop();
        let _ = self.shutdown.send(true);
        let worker = self
            .worker
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                tracing::error!(error = %e, "tracker worker panicked");
            }
        }
    }
}

async fn worker_loop<L: TransactionLog, K: KvStore, C: Clock>(
    runner: Arc<PassRunner<L, K, C>>,
    trigger: Arc<Notify>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = trigger.notified() => {
                runner.run().await;
            }
        }
    }
    if runner.level.shows_detail() {
        tracing::debug!("tracker worker exited");
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
