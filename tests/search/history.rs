// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Past choices override ranking for the query they were made on.

use super::common::{both_engines, ids, indexed_engine};
use morsel::scoring::HISTORY_SCORE;
use morsel::{FileHistory, MemoryHistory, NoHistory, SearchHistory};
use tempfile::TempDir;

#[test]
fn test_chosen_item_ranks_first_with_history_score() {
    for (label, engine) in both_engines() {
        let history = MemoryHistory::new();
        history.record_choice("milk", "milk-buttermilk");
        let results = engine.search("milk", &history, false);
        assert_eq!(results[0].id, "milk-buttermilk", "{label}");
        assert_eq!(results[0].score, HISTORY_SCORE, "{label}");
        assert_eq!(results.iter().filter(|r| r.id == "milk-buttermilk").count(), 1);
    }
}

#[test]
fn test_history_can_surface_non_matching_item() {
    for (label, engine) in both_engines() {
        let history = MemoryHistory::new();
        history.record_choice("snack", "cheese-cheddar");
        let results = engine.search("snack", &history, false);
        assert_eq!(ids(&results), ["cheese-cheddar"], "{label}");
    }
}

#[test]
fn test_most_frequent_choice_wins() {
    let engine = indexed_engine();
    let history = MemoryHistory::new();
    history.record_choice("milk", "cheese-cheddar");
    history.record_choice("milk", "milk-whole");
    history.record_choice("milk", "milk-whole");
    assert_eq!(history.most_common_id("milk").as_deref(), Some("milk-whole"));
    assert_eq!(engine.search("milk", &history, false)[0].id, "milk-whole");
}

#[test]
fn test_query_lookup_ignores_case_and_spacing() {
    let engine = indexed_engine();
    let history = MemoryHistory::new();
    history.record_choice("  Whole   Milk ", "egg-whole");
    let results = engine.search("whole milk", &history, false);
    assert_eq!(results[0].id, "egg-whole");
}

#[test]
fn test_history_is_per_query() {
    for (label, engine) in both_engines() {
        let history = MemoryHistory::new();
        history.record_choice("milk", "cheese-cheddar");
        assert_eq!(
            engine.search("bread", &history, false),
            engine.search("bread", &NoHistory, false),
            "{label}"
        );
    }
}

#[test]
fn test_stale_id_is_ignored() {
    for (label, engine) in both_engines() {
        let history = MemoryHistory::new();
        history.record_choice("milk", "discontinued-item");
        assert_eq!(
            engine.search("milk", &history, false),
            engine.search("milk", &NoHistory, false),
            "{label}"
        );
    }
}

#[test]
fn test_file_history_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state").join("history.json");
    {
        let history = FileHistory::open(&path).unwrap();
        history.record_choice("tomatoe", "soup-tomato");
        history.flush().unwrap();
    }
    assert!(path.exists());

    let engine = indexed_engine();
    let history = FileHistory::open(&path).unwrap();
    let results = engine.search("tomatoe", &history, false);
    assert_eq!(results[0].id, "soup-tomato");
    assert_eq!(results[0].score, HISTORY_SCORE);
}

#[test]
fn test_history_shared_across_threads() {
    let history = MemoryHistory::new();
    std::thread::scope(|scope| {
        for i in 0..4 {
            let history = &history;
            scope.spawn(move || {
                for _ in 0..=i {
                    history.record_choice("bread", "bread-white");
                }
            });
        }
    });
    assert_eq!(history.most_common_id("bread").as_deref(), Some("bread-white"));
    assert_eq!(history.len(), 1);
}
