// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search results get sorted.
//!
//! Sort order:
//! 1. **Score** - descending
//! 2. **Description** - ascending, so equal scores come back alphabetically
//! 3. **Id** - final tiebreaker when two items share a description
//!
//! Every path (indexed, fallback, composite) sorts with this one comparator,
//! so repeated runs over the same catalog produce identical orderings.

use crate::types::SearchResult;
use std::cmp::Ordering;

/// Compare two search results for ranking.
pub fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    a.rank_cmp(b)
}

/// Drop non-positive scores and sort what remains.
pub fn rank(mut results: Vec<SearchResult>) -> Vec<SearchResult> {
    results.retain(|r| r.score > 0.0);
    results.sort_by(compare_results);
    results
}
