// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offline search quality evaluation.
//!
//! Given `(query, expected id)` pairs, typically harvested from real history
//! via [`crate::history::MemoryHistory::query_id_pairs`], run each query and
//! measure how far down the expected item landed. The error for one pair is
//! `rank²`, capped at [`MAX_PAIR_ERROR`]; a missing item costs the cap. Lower
//! totals are better, and 0 means every expected item came first.

use crate::history::SearchHistory;
use crate::search::FoodSearch;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Ceiling on a single pair's error, so one lost item can't dominate.
pub const MAX_PAIR_ERROR: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairOutcome {
    pub query: String,
    pub expected_id: String,
    /// 0-based position of the expected item, if it was returned at all.
    pub rank: Option<usize>,
    pub error: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvaluationReport {
    pub total_error: u64,
    pub pairs: Vec<PairOutcome>,
}

impl EvaluationReport {
    /// Pairs whose expected item was ranked first.
    pub fn hits(&self) -> usize {
        self.pairs.iter().filter(|p| p.rank == Some(0)).count()
    }

    pub fn misses(&self) -> usize {
        self.pairs.iter().filter(|p| p.rank.is_none()).count()
    }
}

pub fn pair_error(rank: Option<usize>) -> u64 {
    match rank {
        Some(r) => (r as u64).saturating_mul(r as u64).min(MAX_PAIR_ERROR),
        None => MAX_PAIR_ERROR,
    }
}

/// Run every pair through `search` without autocomplete.
pub fn evaluate(
    search: &dyn FoodSearch,
    pairs: &[(String, String)],
    history: &dyn SearchHistory,
) -> EvaluationReport {
    let mut report = EvaluationReport::default();
    for (query, expected_id) in pairs {
        let results = search.search(query, history, false);
        let rank = results.iter().position(|r| &r.id == expected_id);
        let error = pair_error(rank);
        tracing::debug!(query = query.as_str(), expected_id = expected_id.as_str(), ?rank, error, "evaluated pair");
        report.total_error += error;
        report.pairs.push(PairOutcome {
            query: query.clone(),
            expected_id: expected_id.clone(),
            rank,
            error,
        });
    }
    report
}

/// Parse `query,id` lines. The id is everything after the last comma, so
/// queries may contain commas. Blank lines and `#` comments are skipped.
pub fn parse_pairs(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|line| {
            let (query, id) = line.rsplit_once(',')?;
            let (query, id) = (query.trim(), id.trim());
            (!query.is_empty() && !id.is_empty()).then(|| (query.to_string(), id.to_string()))
        })
        .collect()
}

pub fn load_pairs(path: &Path) -> std::io::Result<Vec<(String, String)>> {
    Ok(parse_pairs(&fs::read_to_string(path)?))
}
