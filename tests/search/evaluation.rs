// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offline quality measurement over query/id pairs.

use super::common::{fallback_engine, indexed_engine};
use morsel::evaluation::{load_pairs, parse_pairs, MAX_PAIR_ERROR};
use morsel::{evaluate, CompositeSearch, MemoryHistory, NoHistory, SearchHistory};
use std::fs;
use tempfile::TempDir;

const PAIRS: &str = "\
# query,expected id
tomatoe,tomato-raw
milk,milk-buttermilk
xylophone,milk-whole
";

#[test]
fn test_report_counts_rank_errors() {
    let pairs = parse_pairs(PAIRS);
    assert_eq!(pairs.len(), 3);
    let report = evaluate(&indexed_engine(), &pairs, &NoHistory);

    assert_eq!(report.pairs[0].rank, Some(0));
    assert_eq!(report.pairs[0].error, 0);
    // whole milk is more popular than buttermilk
    assert_eq!(report.pairs[1].rank, Some(1));
    assert_eq!(report.pairs[1].error, 1);
    assert_eq!(report.pairs[2].rank, None);
    assert_eq!(report.pairs[2].error, MAX_PAIR_ERROR);

    assert_eq!(report.total_error, 1 + MAX_PAIR_ERROR);
    assert_eq!(report.hits(), 1);
    assert_eq!(report.misses(), 1);
}

#[test]
fn test_history_pairs_evaluate_to_zero_with_history() {
    let history = MemoryHistory::new();
    history.record_choice("milk", "milk-buttermilk");
    history.record_choice("tomatoe", "soup-tomato");
    let pairs = history.query_id_pairs();

    let engine = indexed_engine();
    assert!(evaluate(&engine, &pairs, &NoHistory).total_error > 0);
    assert_eq!(evaluate(&engine, &pairs, &history).total_error, 0);
}

#[test]
fn test_pairs_file_and_composite_source() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pairs.csv");
    fs::write(&path, PAIRS).unwrap();
    let pairs = load_pairs(&path).unwrap();

    let composite = CompositeSearch::new()
        .with_source(indexed_engine())
        .with_source(fallback_engine());
    let report = evaluate(&composite, &pairs, &NoHistory);
    assert_eq!(report.pairs.len(), 3);
    assert_eq!(report.pairs[0].rank, Some(0));
}
