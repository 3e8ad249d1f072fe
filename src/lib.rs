// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Food search and ranking for nutrition logging.
//!
//! Type a fragment ("tomatoe", "whole milk", "pot"), get the catalog entry you
//! most likely meant, first. The catalog is tens of thousands of entries from
//! reference databases and user input, so the query path avoids scanning it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │  canonical   │────▶│   catalog    │────▶│ search::indexed  │
//! │ (decompose,  │     │ (two-pass    │     │ (component index,│
//! │  spell, stem)│     │  build)      │     │  autocomplete)   │
//! └──────────────┘     └──────────────┘     └──────────────────┘
//!                             │                      │
//!                             ▼                      ▼
//!                     ┌──────────────────┐   ┌──────────────┐
//!                     │ search::fallback │   │   scoring    │
//!                     │ (linear scan,    │──▶│ (weights,    │
//!                     │  edit distance)  │   │  ranking)    │
//!                     └──────────────────┘   └──────────────┘
//!                             ▲
//!                      history (per query)
//! ```
//!
//! [`SearchEngine`] picks the indexed matcher when the dictionary resources
//! load, and the fallback matcher (with the load error kept for reporting)
//! when they don't.
//!
//! # Usage
//!
//! ```ignore
//! use morsel::{Canonicalizer, CatalogRecord, MemoryHistory, SearchEngine};
//!
//! let canonicalizer = Canonicalizer::load(words_path, Some(ranked_path));
//! let engine = SearchEngine::from_records(records, canonicalizer)?;
//! let history = MemoryHistory::new();
//!
//! let results = engine.search_limited("tomatoe", &history, true, 10);
//! history.record_choice("tomatoe", &results[0].id);
//! ```

pub mod canonical;
pub mod catalog;
pub mod config;
mod error;
pub mod evaluation;
pub mod fuzzy;
pub mod history;
pub mod scoring;
pub mod search;
mod types;
pub mod util;

#[doc(hidden)]
pub mod testing;

pub use canonical::{Canonicalizer, RankedWords, WordList};
pub use catalog::{Catalog, CatalogRecord};
pub use config::MorselConfig;
pub use error::{CatalogError, HistoryError, ResourceError};
pub use evaluation::{evaluate, EvaluationReport};
pub use history::{FileHistory, MemoryHistory, NoHistory, SearchHistory};
pub use search::{CompositeSearch, FoodSearch, Matcher, SearchEngine};
pub use types::{priorities_are_sequential, sequential_components, CatalogItem, Component, SearchResult};

#[cfg(test)]
mod tests {
    //! Property tests over the whole pipeline with the fixture vocabulary.

    use super::*;
    use crate::testing::{fixture_canonicalizer, fixture_records, FIXTURE_WORDS};
    use proptest::prelude::*;

    fn vocabulary_word() -> impl Strategy<Value = String> {
        proptest::sample::select(FIXTURE_WORDS).prop_map(str::to_string)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_canonicalize_idempotent(words in prop::collection::vec(vocabulary_word(), 0..5)) {
            let c = fixture_canonicalizer();
            let once = c.canonicalize(&words.join(" "));
            let twice = c.canonicalize(&once.join(" "));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_results_sorted_and_positive(words in prop::collection::vec(vocabulary_word(), 1..4)) {
            let engine = SearchEngine::from_records(fixture_records(), Ok(fixture_canonicalizer())).unwrap();
            let results = engine.search(&words.join(" "), &NoHistory, false);
            prop_assert!(results.iter().all(|r| r.score > 0.0));
            prop_assert!(results.windows(2).all(|w| w[0].rank_cmp(&w[1]).is_le()));
        }
    }
}
