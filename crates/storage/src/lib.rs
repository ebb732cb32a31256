// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! File-backed collaborators for the tracker
//!
//! Everything here is safe to share between processes on one machine:
//! readers take a shared advisory lock, writers an exclusive one, and
//! rewrites go through a temp file and an atomic rename.

mod file;
mod kv;
mod log;
mod sink;

pub use kv::JsonKvStore;
pub use log::FileTransactionLog;
pub use sink::JsonlSink;
