// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cleanup throttling
//!
//! Decides whether a pass should be followed by a cleanup. Both the
//! last-cleanup time and the notification counter live in the shared store
//! so a restart does not reset the throttle.

use crate::keys::StateKeys;
use tokio::sync::Mutex;
use txkeep_adapters::KvStore;
use txkeep_core::{AuthorName, CleanStrategy, Clock, LogLevel, Timestamp};

#[derive(Debug, Clone, Copy, Default)]
struct ThrottleState {
    last_cleanup: Timestamp,
    notifications: u64,
}

pub struct CleanupScheduler<K, C> {
    strategy: CleanStrategy,
    store: K,
    keys: StateKeys,
    author: AuthorName,
    clock: C,
    level: LogLevel,
    state: Mutex<Option<ThrottleState>>,
}

impl<K: KvStore, C: Clock> CleanupScheduler<K, C> {
    pub fn new(
        strategy: CleanStrategy,
        store: K,
        keys: StateKeys,
        author: AuthorName,
        clock: C,
        level: LogLevel,
    ) -> Self {
        Self {
            strategy,
            store,
            keys,
            author,
            clock,
            level,
            state: Mutex::new(None),
        }
    }

    pub fn strategy(&self) -> CleanStrategy {
        self.strategy
    }

    /// Decide whether to clean now, recording the decision
    ///
    /// The check and the state update happen under one lock, so a second
    /// caller inside the same window sees the updated state.
    pub async fn should_clean(&self) -> bool {
        if self.strategy == CleanStrategy::None {
            return false;
        }

        let mut guard = self.state.lock().await;
        let state = match *guard {
            Some(state) => state,
            None => self.load().await,
        };

        let (decision, next) = match self.strategy {
            CleanStrategy::None => (false, state),
            CleanStrategy::ByDuration { interval } => {
                let now = self.clock.now();
                if now.duration_since(state.last_cleanup) >= interval {
                    (
                        true,
                        ThrottleState {
                            last_cleanup: now,
                            ..state
                        },
                    )
                } else {
                    (false, state)
                }
            }
            CleanStrategy::ByNotification { times } => {
                let seen = state.notifications + 1;
                if seen >= u64::from(times) {
                    (
                        true,
                        ThrottleState {
                            last_cleanup: self.clock.now(),
                            notifications: 0,
                        },
                    )
                } else {
                    (
                        false,
                        ThrottleState {
                            notifications: seen,
                            ..state
                        },
                    )
                }
            }
        };

        *guard = Some(next);
        self.persist(&state, &next).await;

        if self.level.shows_detail() {
            tracing::debug!(
                strategy = ?self.strategy,
                decision,
                notifications = next.notifications,
                "cleanup decision"
            );
        }
        decision
    }

    async fn load(&self) -> ThrottleState {
        let last = self.read(&self.keys.last_cleanup(&self.author)).await;
        let count = self.read(&self.keys.notification_count(&self.author)).await;
        ThrottleState {
            last_cleanup: last.map(Timestamp::from).unwrap_or(Timestamp::EPOCH),
            notifications: count.unwrap_or(0),
        }
    }

    async fn read(&self, key: &str) -> Option<u64> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                if self.level.shows_status() {
                    tracing::warn!(key, error = %e, "cleanup state read failed");
                }
                None
            }
        }
    }

    async fn persist(&self, before: &ThrottleState, after: &ThrottleState) {
        if after.last_cleanup != before.last_cleanup {
            self.write(
                &self.keys.last_cleanup(&self.author),
                after.last_cleanup.as_micros(),
            )
            .await;
        }
        if after.notifications != before.notifications {
            self.write(
                &self.keys.notification_count(&self.author),
                after.notifications,
            )
            .await;
        }
    }

    async fn write(&self, key: &str, value: u64) {
        if let Err(e) = self.store.set(key, value).await {
            if self.level.shows_status() {
                tracing::warn!(key, error = %e, "cleanup state persist failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
