// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Authors and their roles
//!
//! Every process writing to the shared log is an author. Roles are resolved
//! once, when configuration is validated, into a [`Roster`].

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Name of a log author (an app, an extension, a background worker)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyAuthor);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AuthorName {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AuthorName> for String {
    fn from(name: AuthorName) -> Self {
        name.0
    }
}

impl fmt::Display for AuthorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role an author plays for this tracker instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorRole {
    /// The regular author this instance merges as
    Current,
    /// Merges others' transactions and gates deletion
    Regular,
    /// Only writes; never merges and never gates deletion
    Batch,
}

/// Authors partitioned by role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    current: AuthorName,
    regular: BTreeSet<AuthorName>,
    batch: BTreeSet<AuthorName>,
}

impl Roster {
    /// Build a roster, rejecting overlapping or inconsistent role assignments
    pub fn new(
        current: AuthorName,
        authors: impl IntoIterator<Item = AuthorName>,
        batch_authors: impl IntoIterator<Item = AuthorName>,
    ) -> Result<Self, ConfigError> {
        let regular: BTreeSet<_> = authors.into_iter().collect();
        let batch: BTreeSet<_> = batch_authors.into_iter().collect();

        if batch.contains(&current) {
            return Err(ConfigError::CurrentAuthorIsBatch(current));
        }
        if !regular.contains(&current) {
            return Err(ConfigError::CurrentAuthorNotListed(current));
        }
        if let Some(both) = regular.intersection(&batch).next() {
            return Err(ConfigError::AuthorInBothRoles(both.clone()));
        }

        Ok(Self {
            current,
            regular,
            batch,
        })
    }

    pub fn current(&self) -> &AuthorName {
        &self.current
    }

    /// Regular authors, including the current one
    pub fn regular(&self) -> impl Iterator<Item = &AuthorName> {
        self.regular.iter()
    }

    pub fn batch(&self) -> impl Iterator<Item = &AuthorName> {
        self.batch.iter()
    }

    pub fn role(&self, author: &AuthorName) -> Option<AuthorRole> {
        if *author == self.current {
            Some(AuthorRole::Current)
        } else if self.regular.contains(author) {
            Some(AuthorRole::Regular)
        } else if self.batch.contains(author) {
            Some(AuthorRole::Batch)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "author_tests.rs"]
mod tests;
