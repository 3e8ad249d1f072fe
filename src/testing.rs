// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides one small, hand-checked food vocabulary and catalog so that
//! every test reasons about the same numbers.

#![doc(hidden)]

use crate::canonical::{Canonicalizer, RankedWords, WordList};
use crate::catalog::{Catalog, CatalogRecord};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Dictionary words. None of them splits into two other dictionary words.
pub const FIXTURE_WORDS: &[&str] = &[
    "baked", "bread", "butter", "cheddar", "cheese", "corn", "egg", "fresh", "jalapeno", "milk",
    "pot", "potato", "potatoes", "pottery", "raw", "soup", "starch", "tomato", "tomatoes",
    "white", "whole",
];

/// Autocomplete ranking. "potato" outranks "pot" and "pottery".
pub const FIXTURE_RANKED: &[(&str, f64)] = &[
    ("baked", 20.0),
    ("bread", 85.0),
    ("butter", 50.0),
    ("cheddar", 40.0),
    ("cheese", 80.0),
    ("corn", 35.0),
    ("egg", 75.0),
    ("fresh", 30.0),
    ("milk", 95.0),
    ("pot", 20.0),
    ("potato", 90.0),
    ("potatoes", 60.0),
    ("pottery", 10.0),
    ("raw", 30.0),
    ("soup", 25.0),
    ("starch", 15.0),
    ("tomato", 70.0),
    ("tomatoes", 30.0),
    ("white", 20.0),
    ("whole", 45.0),
];

pub fn fixture_word_list() -> WordList {
    WordList::from_words(FIXTURE_WORDS)
}

pub fn fixture_ranked() -> RankedWords {
    RankedWords::from_entries(FIXTURE_RANKED.iter().copied())
}

pub fn fixture_canonicalizer() -> Canonicalizer {
    Canonicalizer::new(fixture_word_list(), Some(fixture_ranked()))
}

/// Ten records. Raw popularity peaks at 100, so normalized popularity equals raw.
pub fn fixture_records() -> Vec<CatalogRecord> {
    [
        ("milk-whole", "Milk, whole", 60.0),
        ("milk-buttermilk", "Milk, buttermilk", 20.0),
        ("cheese-cheddar", "Cheese, cheddar", 40.0),
        ("tomato-raw", "Tomatoes, raw", 50.0),
        ("soup-tomato", "Soup, tomato", 10.0),
        ("potato-raw", "Potatoes, raw", 30.0),
        ("potato-baked", "Potatoes, baked", 80.0),
        ("cornstarch", "Cornstarch", 5.0),
        ("bread-white", "Bread, white", 100.0),
        ("egg-whole", "Egg, whole, raw, fresh", 45.0),
    ]
    .into_iter()
    .map(|(id, description, popularity)| {
        CatalogRecord::new(id, description)
            .with_summary(format!("Per 100g - {}kcal", description.len() * 7))
            .with_popularity(popularity)
    })
    .collect()
}

/// The fixture catalog, canonicalized when a canonicalizer is given.
pub fn fixture_catalog(canonicalizer: Option<&Canonicalizer>) -> Catalog {
    Catalog::build(fixture_records(), canonicalizer).expect("fixture records are valid")
}

/// Paths written by [`write_fixture_files`].
#[derive(Debug, Clone)]
pub struct FixtureFiles {
    pub word_list: PathBuf,
    pub ranked_words: PathBuf,
    pub catalog: PathBuf,
}

/// Write the fixture word list, ranked list and catalog JSON into `dir`.
pub fn write_fixture_files(dir: &Path) -> io::Result<FixtureFiles> {
    let files = FixtureFiles {
        word_list: dir.join("words.txt"),
        ranked_words: dir.join("ranked.csv"),
        catalog: dir.join("catalog.json"),
    };
    fs::write(&files.word_list, FIXTURE_WORDS.join("\n"))?;
    let ranked: Vec<String> = FIXTURE_RANKED
        .iter()
        .map(|(word, score)| format!("{word},{score}"))
        .collect();
    fs::write(&files.ranked_words, ranked.join("\n"))?;
    let json = serde_json::to_string_pretty(&fixture_records()).map_err(io::Error::other)?;
    fs::write(&files.catalog, json)?;
    Ok(files)
}
