// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Prefix completion of the last query word.

use super::common::{fallback_engine, ids, indexed_engine, position};
use morsel::testing::{fixture_catalog, fixture_word_list};
use morsel::{Canonicalizer, NoHistory, SearchEngine};

#[test]
fn test_partial_word_completes_to_best_ranked() {
    let engine = indexed_engine();
    let results = engine.search("pot", &NoHistory, true);
    // "potato" is the top completion; the baked entry is more popular
    assert_eq!(ids(&results)[..2], ["potato-baked", "potato-raw"]);
}

#[test]
fn test_partial_word_without_autocomplete_is_literal() {
    let engine = indexed_engine();
    assert!(engine.search("pot", &NoHistory, false).is_empty());
}

#[test]
fn test_completed_tail_keeps_leading_words() {
    let engine = indexed_engine();
    let results = engine.search("whole mi", &NoHistory, true);
    assert_eq!(results[0].id, "milk-whole");
    let egg = position(&results, "egg-whole").expect("egg matches on \"whole\"");
    assert!(egg > 0);
}

#[test]
fn test_complete_word_still_matches_under_autocomplete() {
    let engine = indexed_engine();
    let plain = engine.search("bread", &NoHistory, false);
    let completed = engine.search("bread", &NoHistory, true);
    assert_eq!(plain[0].id, "bread-white");
    assert_eq!(completed[0].id, "bread-white");
    assert_eq!(plain[0].score, completed[0].score);
}

#[test]
fn test_without_ranked_words_partial_is_literal() {
    let canonicalizer = Canonicalizer::new(fixture_word_list(), None);
    assert!(!canonicalizer.has_autocomplete());
    let catalog = fixture_catalog(Some(&canonicalizer));
    let engine = SearchEngine::new(catalog, Ok(canonicalizer));
    assert!(engine.is_indexed());
    assert!(engine.search("pot", &NoHistory, true).is_empty());
    assert_eq!(engine.search("potato", &NoHistory, true)[0].id, "potato-baked");
}

#[test]
fn test_fallback_ignores_autocomplete_flag() {
    let engine = fallback_engine();
    for query in ["pot", "milk", "tomatoe"] {
        assert_eq!(
            engine.search(query, &NoHistory, true),
            engine.search(query, &NoHistory, false)
        );
    }
}
