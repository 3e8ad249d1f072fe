// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for integration tests.

#![allow(dead_code)]

use morsel::testing::{fixture_canonicalizer, fixture_records};
use morsel::{ResourceError, SearchEngine, SearchResult};

/// Engine over the fixture catalog with the fixture dictionary loaded.
pub fn indexed_engine() -> SearchEngine {
    SearchEngine::from_records(fixture_records(), Ok(fixture_canonicalizer()))
        .expect("fixture records are valid")
}

/// Same catalog, dictionary unavailable.
pub fn fallback_engine() -> SearchEngine {
    SearchEngine::from_records(fixture_records(), Err(ResourceError::EmptyWordList))
        .expect("fixture records are valid")
}

/// Both engines, labelled, for tests that must hold under either matcher.
pub fn both_engines() -> [(&'static str, SearchEngine); 2] {
    [("indexed", indexed_engine()), ("fallback", fallback_engine())]
}

pub fn ids(results: &[SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.id.as_str()).collect()
}

pub fn position(results: &[SearchResult], id: &str) -> Option<usize> {
    results.iter().position(|r| r.id == id)
}

/// Every result positive, and the list in ranking order.
pub fn assert_well_ranked(results: &[SearchResult]) {
    for r in results {
        assert!(r.score > 0.0, "non-positive score returned: {:?}", r);
    }
    for pair in results.windows(2) {
        assert!(
            pair[0].rank_cmp(&pair[1]).is_le(),
            "results out of order:\n  {:?}\n  {:?}",
            pair[0],
            pair[1]
        );
    }
}
