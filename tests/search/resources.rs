// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Loading resources from disk and falling back when they are unusable.

use super::common::indexed_engine;
use morsel::testing::write_fixture_files;
use morsel::{
    Canonicalizer, Catalog, CatalogError, Matcher, MorselConfig, NoHistory, ResourceError,
    SearchEngine,
};
use std::fs;
use tempfile::TempDir;

fn engine_from_files(dir: &TempDir) -> SearchEngine {
    let files = write_fixture_files(dir.path()).unwrap();
    let canonicalizer = Canonicalizer::load(&files.word_list, Some(files.ranked_words.as_path()));
    let catalog = Catalog::load(&files.catalog, canonicalizer.as_ref().ok()).unwrap();
    SearchEngine::new(catalog, canonicalizer)
}

#[test]
fn test_files_on_disk_match_in_memory_fixture() {
    let dir = TempDir::new().unwrap();
    let from_disk = engine_from_files(&dir);
    let in_memory = indexed_engine();
    assert!(from_disk.is_indexed());
    for query in ["milk", "tomatoe", "whole mi", "pot", "cornstarch"] {
        assert_eq!(
            from_disk.search(query, &NoHistory, true),
            in_memory.search(query, &NoHistory, true),
            "query {query:?}"
        );
    }
}

#[test]
fn test_missing_word_list_selects_fallback() {
    let dir = TempDir::new().unwrap();
    let files = write_fixture_files(dir.path()).unwrap();
    let canonicalizer = Canonicalizer::load(&dir.path().join("absent.txt"), Some(files.ranked_words.as_path()));
    assert!(matches!(canonicalizer, Err(ResourceError::Io { .. })));

    let catalog = Catalog::load(&files.catalog, canonicalizer.as_ref().ok()).unwrap();
    let engine = SearchEngine::new(catalog, canonicalizer);
    assert!(matches!(engine.matcher(), Matcher::Fallback { .. }));
    assert!(matches!(engine.fallback_reason(), Some(ResourceError::Io { .. })));
    assert_eq!(engine.search("tomatoe", &NoHistory, true)[0].id, "tomato-raw");
}

#[test]
fn test_empty_word_list_selects_fallback() {
    let dir = TempDir::new().unwrap();
    let files = write_fixture_files(dir.path()).unwrap();
    fs::write(&files.word_list, "\n  \n").unwrap();
    let engine = engine_from_files_with(&files);
    assert!(matches!(engine.fallback_reason(), Some(ResourceError::EmptyWordList)));
}

#[test]
fn test_malformed_ranked_words_selects_fallback() {
    let dir = TempDir::new().unwrap();
    let files = write_fixture_files(dir.path()).unwrap();
    fs::write(&files.ranked_words, "milk,95\nbread\n").unwrap();
    let engine = engine_from_files_with(&files);
    match engine.fallback_reason() {
        Some(ResourceError::MalformedRankedEntry { line, content }) => {
            assert_eq!(*line, 2);
            assert_eq!(content, "bread");
        }
        other => panic!("expected malformed entry, got {other:?}"),
    }
}

fn engine_from_files_with(files: &morsel::testing::FixtureFiles) -> SearchEngine {
    let canonicalizer = Canonicalizer::load(&files.word_list, Some(files.ranked_words.as_path()));
    let catalog = Catalog::load(&files.catalog, canonicalizer.as_ref().ok()).unwrap();
    SearchEngine::new(catalog, canonicalizer)
}

#[test]
fn test_catalog_errors_are_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");

    fs::write(
        &path,
        r#"[{"id": "a", "description": "Milk"}, {"id": "a", "description": "Cheese"}]"#,
    )
    .unwrap();
    assert!(matches!(Catalog::load(&path, None), Err(CatalogError::DuplicateId(id)) if id == "a"));

    fs::write(&path, r#"[{"id": "", "description": "Milk"}]"#).unwrap();
    assert!(matches!(Catalog::load(&path, None), Err(CatalogError::EmptyId(_))));

    fs::write(&path, r#"[{"id": "a", "description": "Milk", "popularity": -1}]"#).unwrap();
    assert!(matches!(
        Catalog::load(&path, None),
        Err(CatalogError::InvalidPopularity { .. })
    ));

    fs::write(&path, "{not json").unwrap();
    assert!(matches!(Catalog::load(&path, None), Err(CatalogError::Json(_))));

    assert!(matches!(
        Catalog::load(&dir.path().join("absent.json"), None),
        Err(CatalogError::Io { .. })
    ));
}

#[test]
fn test_explicit_components_are_kept() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"[{
            "id": "pb",
            "description": "Peanut butter, smooth",
            "popularity": 10,
            "components": [
                {"text": "butter", "priority": 1},
                {"text": "peanut", "priority": 2}
            ]
        }]"#,
    )
    .unwrap();
    let catalog = Catalog::load(&path, None).unwrap();
    let item = catalog.get("pb").unwrap();
    assert_eq!(item.components[0].text, "butter");
    assert_eq!(item.components[1].text, "peanut");
    assert_eq!(item.popularity, 100.0);

    fs::write(
        &path,
        r#"[{"id": "pb", "description": "x", "components": [{"text": "a", "priority": 2}]}]"#,
    )
    .unwrap();
    assert!(matches!(
        Catalog::load(&path, None),
        Err(CatalogError::InvalidPriorities { .. })
    ));
}

#[test]
fn test_explicit_canonical_components_drive_the_index() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"[
            {"id": "drink", "description": "Beverage, dairy", "popularity": 5,
             "canonicalComponents": [{"text": "milk", "priority": 1}]},
            {"id": "cheese", "description": "Cheese, cheddar", "popularity": 5}
        ]"#,
    )
    .unwrap();
    let canonicalizer = morsel::testing::fixture_canonicalizer();
    let catalog = Catalog::load(&path, Some(&canonicalizer)).unwrap();
    let engine = SearchEngine::new(catalog, Ok(canonicalizer));
    assert!(engine.is_indexed());
    let results = engine.search("milk", &NoHistory, false);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "drink");
}

#[test]
fn test_config_paths_resolve_relative_to_file() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    fs::create_dir(&data).unwrap();
    let files = write_fixture_files(&data).unwrap();
    let config_path = dir.path().join("morsel.toml");
    fs::write(
        &config_path,
        r#"
[resources]
word_list = "data/words.txt"
ranked_words = "data/ranked.csv"

[catalog]
path = "data/catalog.json"

[search]
autocomplete = true
max_completions = 2
"#,
    )
    .unwrap();

    let config = MorselConfig::discover(Some(config_path.as_path())).unwrap();
    assert_eq!(config.resources.word_list.as_deref(), Some(files.word_list.as_path()));
    assert_eq!(config.catalog.path.as_deref(), Some(files.catalog.as_path()));
    assert!(config.search.autocomplete);
    assert_eq!(config.search.max_completions, 2);
    assert_eq!(config.search.result_limit, 10);
    assert!(config.history.path.is_none());

    let words = config.resources.word_list.unwrap();
    let ranked = config.resources.ranked_words.unwrap();
    let canonicalizer = Canonicalizer::load(&words, Some(ranked.as_path()))
        .map(|c| c.with_max_completions(config.search.max_completions));
    assert_eq!(canonicalizer.as_ref().unwrap().max_completions(), 2);
    let catalog = Catalog::load(&config.catalog.path.unwrap(), canonicalizer.as_ref().ok()).unwrap();
    let engine = SearchEngine::new(catalog, canonicalizer);
    assert_eq!(engine.search("pot", &NoHistory, true)[0].id, "potato-baked");
}

#[test]
fn test_unknown_config_key_rejected() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("morsel.toml");
    fs::write(&config_path, "[search]\nweights = 3\n").unwrap();
    assert!(MorselConfig::discover(Some(config_path.as_path())).is_err());
}
