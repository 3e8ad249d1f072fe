// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search: from a typed fragment to a ranked list of catalog items.
//!
//! Two matchers, one contract. The indexed matcher canonicalizes the query and
//! looks tokens up in a component index. The fallback matcher scans every item
//! with edit-distance comparison and needs no dictionary. [`SearchEngine`]
//! picks one at construction, based on whether the canonicalization resources
//! loaded, and remembers why if it had to fall back.

pub mod composite;
pub mod engine;
pub mod fallback;
pub mod indexed;
pub mod utils;

pub use composite::CompositeSearch;
pub use engine::{Matcher, SearchEngine};
pub use fallback::{components_equal, FallbackMatcher};
pub use indexed::{ComponentIndex, IndexedMatcher};

use crate::history::SearchHistory;
use crate::types::SearchResult;

/// Anything that turns a query into ranked results.
///
/// Implementations are immutable after construction and safe to share across
/// threads; every call is independent.
pub trait FoodSearch: Send + Sync {
    /// Every matching item, best first. Non-positive scores are never returned.
    fn search(&self, query: &str, history: &dyn SearchHistory, autocomplete: bool)
        -> Vec<SearchResult>;
}
