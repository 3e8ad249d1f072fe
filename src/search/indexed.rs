// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The component index: canonical token → items containing it.
//!
//! Each posting list is a set. "Milk, buttermilk" canonicalizes to
//! `milk butter milk`, but a query for "milk" credits it once, not twice, so
//! it can't outrank plain "Milk, whole" on repetition alone.
//!
//! Scoring a query:
//!
//! ```text
//! hypotheses  = canonicalize_autocomplete(query)     // N token sequences
//! for (i, seq) in hypotheses:
//!     for token in seq:
//!         for item in index[token]:
//!             scores[item][i] += 40 × factor(priority) + popularity / 20
//! score(item) = collapse(scores[item])               // max over hypotheses
//! ```
//!
//! The item the history names for this query scores exactly `HISTORY_SCORE`.

use super::utils::collapse_hypotheses;
use super::FoodSearch;
use crate::canonical::Canonicalizer;
use crate::catalog::Catalog;
use crate::history::SearchHistory;
use crate::scoring::{indexed_token_score, rank, HISTORY_SCORE};
use crate::types::SearchResult;
use std::collections::HashMap;
use std::sync::Arc;

/// Inverted map from canonical token to catalog positions.
#[derive(Debug, Clone, Default)]
pub struct ComponentIndex {
    postings: HashMap<String, Vec<usize>>,
}

impl ComponentIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, item) in catalog.iter().enumerate() {
            for component in &item.canonical_components {
                let list = postings.entry(component.text.clone()).or_default();
                // Items are visited in order, so a repeat can only be the last entry
                if list.last() != Some(&i) {
                    list.push(i);
                }
            }
        }
        Self { postings }
    }

    /// Catalog positions of items containing `token`. Unknown tokens match nothing.
    pub fn lookup(&self, token: &str) -> &[usize] {
        self.postings.get(token).map_or(&[], Vec::as_slice)
    }

    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    pub fn posting_count(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }
}

/// Primary matcher: canonicalized, index-backed.
#[derive(Debug)]
pub struct IndexedMatcher {
    catalog: Arc<Catalog>,
    canonicalizer: Canonicalizer,
    index: ComponentIndex,
}

impl IndexedMatcher {
    pub fn new(catalog: Arc<Catalog>, canonicalizer: Canonicalizer) -> Self {
        let index = ComponentIndex::build(&catalog);
        tracing::debug!(
            items = catalog.len(),
            tokens = index.token_count(),
            postings = index.posting_count(),
            "built component index"
        );
        Self {
            catalog,
            canonicalizer,
            index,
        }
    }

    pub fn canonicalizer(&self) -> &Canonicalizer {
        &self.canonicalizer
    }

    pub fn index(&self) -> &ComponentIndex {
        &self.index
    }

    /// Per-item score vectors, one slot per hypothesis.
    fn score_hypotheses(&self, hypotheses: &[Vec<String>]) -> HashMap<usize, Vec<f64>> {
        let n = hypotheses.len();
        let mut scores: HashMap<usize, Vec<f64>> = HashMap::new();
        for (slot, sequence) in hypotheses.iter().enumerate() {
            for token in sequence {
                for &pos in self.index.lookup(token) {
                    let item = &self.catalog.items()[pos];
                    let score = indexed_token_score(item.canonical_priority(token), item.popularity);
                    scores.entry(pos).or_insert_with(|| vec![0.0; n])[slot] += score;
                }
            }
        }
        scores
    }
}

impl FoodSearch for IndexedMatcher {
    fn search(
        &self,
        query: &str,
        history: &dyn SearchHistory,
        autocomplete: bool,
    ) -> Vec<SearchResult> {
        let hypotheses = if autocomplete {
            self.canonicalizer.canonicalize_autocomplete(query)
        } else {
            vec![self.canonicalizer.canonicalize(query)]
        };
        tracing::trace!(query, hypotheses = hypotheses.len(), "indexed search");

        let mut collapsed: HashMap<usize, f64> = self
            .score_hypotheses(&hypotheses)
            .into_iter()
            .map(|(pos, mut vector)| (pos, collapse_hypotheses(&mut vector)))
            .collect();

        if let Some(pos) = history
            .most_common_id(query)
            .and_then(|id| self.catalog.position(&id))
        {
            collapsed.insert(pos, HISTORY_SCORE);
        }

        let items = self.catalog.items();
        rank(
            collapsed
                .into_iter()
                .map(|(pos, score)| items[pos].to_result(score))
                .collect(),
        )
    }
}
