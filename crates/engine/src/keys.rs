// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key layout for persisted tracker state
//!
//! ```text
//! <ns>.cursor.<author>          last merge timestamp per author
//! <ns>.cleanup.<author>.last    last cleanup decided by <author>
//! <ns>.cleanup.<author>.count   notifications since that cleanup
//! ```

use txkeep_core::AuthorName;

/// Builds namespaced keys so several trackers can share one store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateKeys {
    namespace: String,
}

impl StateKeys {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn cursor_prefix(&self) -> String {
        format!("{}.cursor.", self.namespace)
    }

    pub fn cursor(&self, author: &AuthorName) -> String {
        format!("{}{}", self.cursor_prefix(), author)
    }

    /// Author a cursor key belongs to, if it is one of ours
    pub fn cursor_author(&self, key: &str) -> Option<AuthorName> {
        let name = key.strip_prefix(&self.cursor_prefix())?;
        AuthorName::new(name).ok()
    }

    pub fn last_cleanup(&self, author: &AuthorName) -> String {
        format!("{}.cleanup.{}.last", self.namespace, author)
    }

    pub fn notification_count(&self, author: &AuthorName) -> String {
        format!("{}.cleanup.{}.count", self.namespace, author)
    }
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod tests;
