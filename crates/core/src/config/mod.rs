// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracker configuration
//!
//! [`TrackerConfig`] is the serde/TOML surface. [`TrackerConfig::roster`]
//! validates it and resolves author roles once, up front.

use crate::author::{AuthorName, Roster};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default forced deletion floor: records older than this are always purged
pub const DEFAULT_MAXIMUM_DURATION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Default interval for [`CleanStrategy::ByDuration`]
pub const DEFAULT_CLEAN_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Default key prefix for persisted tracker state
pub const DEFAULT_NAMESPACE: &str = "txkeep";

/// Errors from configuration parsing and validation
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("author name must not be empty")]
    EmptyAuthor,
    #[error("author {0} is listed as both a regular and a batch author")]
    AuthorInBothRoles(AuthorName),
    #[error("current author {0} is listed as a batch author")]
    CurrentAuthorIsBatch(AuthorName),
    #[error("current author {0} is missing from the author list")]
    CurrentAuthorNotListed(AuthorName),
    #[error("by_notification cleanup needs times >= 1")]
    ZeroNotificationCount,
    #[error("storage namespace must not be empty")]
    EmptyNamespace,
    #[error("invalid log level {0} (expected 0, 1 or 2)")]
    InvalidLogLevel(u8),
}

/// When automatic cleanup runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum CleanStrategy {
    /// Never clean automatically; the host runs a manual cleaner
    None,
    /// Clean at most once per interval
    ByDuration {
        #[serde(with = "humantime_serde")]
        interval: Duration,
    },
    /// Clean once every `times` notifications
    ByNotification { times: u32 },
}

impl Default for CleanStrategy {
    fn default() -> Self {
        CleanStrategy::ByDuration {
            interval: DEFAULT_CLEAN_INTERVAL,
        }
    }
}

/// Logging verbosity: 0 silent, 1 status only, 2 detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LogLevel {
    Silent,
    #[default]
    Status,
    Detail,
}

impl LogLevel {
    pub fn shows_status(self) -> bool {
        self >= LogLevel::Status
    }

    pub fn shows_detail(self) -> bool {
        self >= LogLevel::Detail
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LogLevel::Silent),
            1 => Ok(LogLevel::Status),
            2 => Ok(LogLevel::Detail),
            other => Err(ConfigError::InvalidLogLevel(other)),
        }
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Silent => 0,
            LogLevel::Status => 1,
            LogLevel::Detail => 2,
        }
    }
}

/// Configuration for one tracker instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
    /// The author this instance merges as
    pub current_author: AuthorName,
    /// Every regular author, the current one included
    pub authors: Vec<AuthorName>,
    /// Write-only authors that never gate deletion
    #[serde(default)]
    pub batch_authors: Vec<AuthorName>,
    /// Merge records imported by remote mirroring too
    #[serde(default)]
    pub include_mirroring: bool,
    /// Records older than this are purged even if some author lags
    #[serde(default = "default_maximum_duration", with = "humantime_serde")]
    pub maximum_duration: Duration,
    #[serde(default)]
    pub clean: CleanStrategy,
    /// Key prefix for persisted cursors and cleanup state
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default)]
    pub log_level: LogLevel,
    /// Accept notifications as soon as the coordinator is spawned
    #[serde(default = "default_auto_start")]
    pub auto_start: bool,
}

fn default_maximum_duration() -> Duration {
    DEFAULT_MAXIMUM_DURATION
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_auto_start() -> bool {
    true
}

impl TrackerConfig {
    pub fn new(current_author: AuthorName, authors: impl IntoIterator<Item = AuthorName>) -> Self {
        Self {
            current_author,
            authors: authors.into_iter().collect(),
            batch_authors: Vec::new(),
            include_mirroring: false,
            maximum_duration: DEFAULT_MAXIMUM_DURATION,
            clean: CleanStrategy::default(),
            namespace: default_namespace(),
            log_level: LogLevel::default(),
            auto_start: true,
        }
    }

    /// Parse from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: TrackerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_batch_authors(mut self, batch: impl IntoIterator<Item = AuthorName>) -> Self {
        self.batch_authors = batch.into_iter().collect();
        self
    }

    pub fn with_mirroring(mut self, include: bool) -> Self {
        self.include_mirroring = include;
        self
    }

    pub fn with_maximum_duration(mut self, duration: Duration) -> Self {
        self.maximum_duration = duration;
        self
    }

    pub fn with_clean_strategy(mut self, strategy: CleanStrategy) -> Self {
        self.clean = strategy;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Check every option that does not depend on author roles
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        if let CleanStrategy::ByNotification { times: 0 } = self.clean {
            return Err(ConfigError::ZeroNotificationCount);
        }
        self.roster().map(|_| ())
    }

    /// Resolve author roles
    pub fn roster(&self) -> Result<Roster, ConfigError> {
        Roster::new(
            self.current_author.clone(),
            self.authors.iter().cloned(),
            self.batch_authors.iter().cloned(),
        )
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
