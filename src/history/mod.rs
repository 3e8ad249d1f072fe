// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search history: "people who typed this usually meant item X".
//!
//! Matchers receive a history explicitly per query. There is no process-wide
//! instance. Reads must be cheap and writes must never block a search, so
//! [`FileHistory`] persists on a background thread.

mod file;
mod memory;

pub use file::FileHistory;
pub use memory::{HistoryEntry, MemoryHistory};

/// History lookups and feedback.
///
/// Queries are matched case- and whitespace-insensitively.
pub trait SearchHistory: Send + Sync {
    /// Id the user most often picked after typing `query`.
    fn most_common_id(&self, query: &str) -> Option<String>;

    /// Record that `id` was picked for `query`.
    ///
    /// Fire and forget: persistence may lag behind.
    fn record_choice(&self, query: &str, id: &str);
}

/// History that knows nothing and remembers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl SearchHistory for NoHistory {
    fn most_common_id(&self, _query: &str) -> Option<String> {
        None
    }

    fn record_choice(&self, _query: &str, _id: &str) {}
}
