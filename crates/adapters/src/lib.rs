// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Collaborator seams for the tracker: the shared log, persisted state, and merge sinks

pub mod kv;
pub mod log;
pub mod sink;
pub mod traced;

pub use kv::{KvError, KvStore};
pub use log::{LogError, TransactionLog};
pub use sink::{MergeSink, SinkError};
pub use traced::{TracedKvStore, TracedTransactionLog};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use kv::{FakeKvStore, KvCall};
#[cfg(any(test, feature = "test-support"))]
pub use log::{FakeTransactionLog, LogCall};
#[cfg(any(test, feature = "test-support"))]
pub use sink::FakeSink;
