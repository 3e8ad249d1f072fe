// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shared utilities for search modules.
//!
//! Query splitting for the fallback matcher and score collapsing for
//! autocomplete hypotheses. Small, but both matchers and the tests lean on them.

/// Split a raw query into literal components for the fallback matcher.
///
/// Splits on spaces and commas, drops empty pieces, lowercases, and sorts so
/// that "whole milk" and "milk, whole" produce the same components.
///
/// # Example
///
/// ```ignore
/// assert_eq!(query_components("Whole milk"), vec!["milk", "whole"]);
/// ```
pub fn query_components(query: &str) -> Vec<String> {
    let mut components: Vec<String> = query
        .split([' ', ','])
        .filter(|p| !p.is_empty())
        .map(str::to_lowercase)
        .collect();
    components.sort();
    components
}

/// Collapse a per-hypothesis score vector into one score.
///
/// Walks from the second-to-last slot down to the first, carrying the maximum
/// forward, and returns slot 0. That is the best score any hypothesis reached.
/// An empty vector scores 0.
pub fn collapse_hypotheses(scores: &mut [f64]) -> f64 {
    for i in (0..scores.len().saturating_sub(1)).rev() {
        scores[i] = scores[i].max(scores[i + 1]);
    }
    scores.first().copied().unwrap_or(0.0)
}

/// Keep at most `limit` results. `None` keeps everything.
pub fn truncate<T>(mut results: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        results.truncate(limit);
    }
    results
}
