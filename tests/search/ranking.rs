// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranking behavior that must hold under either matcher.

use super::common::{assert_well_ranked, both_engines, fallback_engine, ids, indexed_engine, position};
use morsel::scoring::{compare_results, rank, EXACT_MATCH_WEIGHT, FRESHNESS_BONUS};
use morsel::{Catalog, NoHistory, ResourceError, SearchEngine};
use std::cmp::Ordering;

// ============================================================================
// RELEVANCE
// ============================================================================

#[test]
fn test_milk_items_precede_cheese() {
    for (label, engine) in both_engines() {
        let results = engine.search("milk", &NoHistory, false);
        let whole = position(&results, "milk-whole").unwrap_or_else(|| panic!("{label}: milk-whole missing"));
        let butter =
            position(&results, "milk-buttermilk").unwrap_or_else(|| panic!("{label}: buttermilk missing"));
        if let Some(cheese) = position(&results, "cheese-cheddar") {
            assert!(whole < cheese && butter < cheese, "{label}: {:?}", ids(&results));
        }
    }
}

#[test]
fn test_misspelling_finds_raw_tomatoes() {
    for (label, engine) in both_engines() {
        let results = engine.search("tomatoe", &NoHistory, false);
        assert_eq!(results[0].id, "tomato-raw", "{label}: {:?}", ids(&results));
        assert!(position(&results, "soup-tomato").is_some(), "{label}");
    }
}

#[test]
fn test_fallback_raw_bonus_is_exact() {
    let results = fallback_engine().search("tomatoe", &NoHistory, false);
    let top = &results[0];
    // equal head component, popularity 50 -> +2.5, raw -> +0.2
    let expected = EXACT_MATCH_WEIGHT + 2.5 + FRESHNESS_BONUS;
    assert!((top.score - expected).abs() < 1e-9, "got {}", top.score);
}

#[test]
fn test_more_matched_components_win() {
    for (label, engine) in both_engines() {
        let results = engine.search("egg raw", &NoHistory, false);
        assert_eq!(results[0].id, "egg-whole", "{label}: {:?}", ids(&results));
    }
}

#[test]
fn test_compound_query_reaches_compound_item() {
    let results = indexed_engine().search("corn starch", &NoHistory, false);
    assert_eq!(results[0].id, "cornstarch");

    let results = indexed_engine().search("cornstarch", &NoHistory, false);
    assert_eq!(results[0].id, "cornstarch");
}

#[test]
fn test_unknown_query_is_empty() {
    for (label, engine) in both_engines() {
        assert!(engine.search("xylophone", &NoHistory, false).is_empty(), "{label}");
        assert!(engine.search("", &NoHistory, false).is_empty(), "{label}");
        assert!(engine.search("  ,, ", &NoHistory, true).is_empty(), "{label}");
    }
}

#[test]
fn test_empty_catalog_returns_nothing() {
    let indexed = SearchEngine::new(Catalog::empty(), Ok(morsel::testing::fixture_canonicalizer()));
    let fallback = SearchEngine::new(Catalog::empty(), Err(ResourceError::EmptyWordList));
    for engine in [indexed, fallback] {
        assert!(engine.search("milk", &NoHistory, false).is_empty());
        assert!(engine.search("pot", &NoHistory, true).is_empty());
    }
}

// ============================================================================
// ORDERING INVARIANTS
// ============================================================================

const QUERIES: &[&str] = &[
    "milk",
    "whole milk",
    "tomatoe",
    "potatoes baked",
    "raw",
    "buttermilk",
    "cheddar chese",
    "bread",
];

#[test]
fn test_results_positive_and_sorted() {
    for (label, engine) in both_engines() {
        for query in QUERIES {
            let results = engine.search(query, &NoHistory, false);
            assert!(!results.is_empty(), "{label}: no results for {query:?}");
            assert_well_ranked(&results);
        }
    }
}

#[test]
fn test_search_is_deterministic() {
    for (_, engine) in both_engines() {
        for query in QUERIES {
            let first = engine.search(query, &NoHistory, true);
            for _ in 0..3 {
                assert_eq!(engine.search(query, &NoHistory, true), first);
            }
        }
    }
}

#[test]
fn test_plural_and_singular_agree() {
    for (label, engine) in both_engines() {
        assert_eq!(
            engine.search("potato", &NoHistory, false),
            engine.search("potatoes", &NoHistory, false),
            "{label}"
        );
        assert_eq!(
            engine.search("tomato", &NoHistory, false),
            engine.search("tomatoes", &NoHistory, false),
            "{label}"
        );
    }
}

#[test]
fn test_word_order_and_punctuation_irrelevant() {
    for (label, engine) in both_engines() {
        assert_eq!(
            engine.search("whole milk", &NoHistory, false),
            engine.search("Milk, whole", &NoHistory, false),
            "{label}"
        );
    }
}

#[test]
fn test_limit_applies_after_ranking() {
    for (_, engine) in both_engines() {
        let full = engine.search("raw", &NoHistory, false);
        assert!(full.len() >= 3);
        assert_eq!(engine.search_limited("raw", &NoHistory, false, 2), full[..2].to_vec());
        assert_eq!(engine.search_limited("raw", &NoHistory, false, 100), full);
    }
}

#[test]
fn test_rerank_of_results_is_stable() {
    for (label, engine) in both_engines() {
        let results = engine.search("raw", &NoHistory, false);
        let mut reversed = results.clone();
        reversed.reverse();
        assert_eq!(rank(reversed), results, "{label}");
        for pair in results.windows(2) {
            assert_ne!(compare_results(&pair[0], &pair[1]), Ordering::Greater, "{label}");
        }
    }
}
