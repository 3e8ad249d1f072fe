// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fallback matcher: a linear scan with typo-tolerant component comparison.
//!
//! Used when the canonicalization resources are missing. It needs nothing but
//! the catalog's literal components, so it always works, just slower: every
//! query scores every item.
//!
//! # Scoring
//!
//! For each query component, the best match against any item component counts:
//!
//! | Match                                  | Contribution          |
//! |----------------------------------------|-----------------------|
//! | equal (case, plural, small typo)       | `80 × factor(p)`      |
//! | contains / contained in (len > 2)      | `10 × factor(p)`      |
//!
//! An item's head component (priority 1) found inside a query component adds
//! a flat `+10` on top, uncapped. "buttermilk" thereby finds "Milk, buttermilk".
//! A positive total then earns `popularity / 20` and, for raw or fresh items,
//! `+0.2`.

use super::utils::query_components;
use super::FoodSearch;
use crate::catalog::Catalog;
use crate::fuzzy::levenshtein_within;
use crate::history::SearchHistory;
use crate::scoring::{
    fallback_position_factor, popularity_bonus, rank, EXACT_MATCH_WEIGHT, FRESHNESS_BONUS,
    HISTORY_SCORE, MIN_PARTIAL_LEN, ONE_TYPO_MIN_LEN, PARTIAL_MATCH_WEIGHT, TWO_TYPO_MIN_LEN,
};
use crate::types::{CatalogItem, SearchResult};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Are two lowercase components the same word for matching purposes?
///
/// Equal when identical, when one is the other plus a trailing "s" or "es",
/// or when they are within one edit (shorter side at least 5 chars) or two
/// edits (shorter side at least 9 chars).
pub fn components_equal(a: &str, b: &str) -> bool {
    if a == b || plural_of(a, b) || plural_of(b, a) {
        return true;
    }
    let min_len = a.chars().count().min(b.chars().count());
    if min_len >= TWO_TYPO_MIN_LEN {
        levenshtein_within(a, b, 2)
    } else if min_len >= ONE_TYPO_MIN_LEN {
        levenshtein_within(a, b, 1)
    } else {
        false
    }
}

fn plural_of(plural: &str, singular: &str) -> bool {
    [plural.strip_suffix("es"), plural.strip_suffix('s')]
        .into_iter()
        .flatten()
        .any(|stem| stem == singular)
}

/// Lowercased components of one item, computed once at construction.
#[derive(Debug, Clone)]
struct PreparedItem {
    components: Vec<(String, u32)>,
}

impl PreparedItem {
    fn new(item: &CatalogItem) -> Self {
        Self {
            components: item
                .components
                .iter()
                .map(|c| (c.text.to_lowercase(), c.priority))
                .collect(),
        }
    }

    /// Component score before popularity and freshness bonuses.
    fn component_score(&self, query: &[String]) -> f64 {
        let mut head_bonus = 0.0;
        let mut best = vec![0.0_f64; query.len()];
        for (q, best) in query.iter().zip(best.iter_mut()) {
            for (text, priority) in &self.components {
                let factor = fallback_position_factor(*priority);
                if components_equal(q, text) {
                    *best = best.max(EXACT_MATCH_WEIGHT * factor);
                } else if text.chars().count() >= MIN_PARTIAL_LEN {
                    if *priority == 1 && q.contains(text.as_str()) {
                        head_bonus += PARTIAL_MATCH_WEIGHT;
                    } else if q.contains(text.as_str()) || text.contains(q.as_str()) {
                        *best = best.max(PARTIAL_MATCH_WEIGHT * factor);
                    }
                }
            }
        }
        head_bonus + best.iter().sum::<f64>()
    }
}

/// Non-indexed matcher over literal components.
#[derive(Debug, Clone)]
pub struct FallbackMatcher {
    catalog: Arc<Catalog>,
    prepared: Vec<PreparedItem>,
}

impl FallbackMatcher {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let prepared = catalog.iter().map(PreparedItem::new).collect();
        Self { catalog, prepared }
    }

    /// Full score of `item` at catalog position `pos` against sorted query components.
    fn score(&self, pos: usize, query: &[String], history_pos: Option<usize>) -> f64 {
        if history_pos == Some(pos) {
            return HISTORY_SCORE;
        }
        let item = &self.catalog.items()[pos];
        let base = self.prepared[pos].component_score(query);
        if base <= 0.0 {
            return base;
        }
        let mut score = base + popularity_bonus(base, item.popularity);
        if item.is_fresh() {
            score += FRESHNESS_BONUS;
        }
        score
    }
}

impl FoodSearch for FallbackMatcher {
    /// Autocomplete is not supported here; the flag is ignored.
    fn search(
        &self,
        query: &str,
        history: &dyn SearchHistory,
        _autocomplete: bool,
    ) -> Vec<SearchResult> {
        let components = query_components(query);
        let history_pos = history
            .most_common_id(query)
            .and_then(|id| self.catalog.position(&id));
        tracing::trace!(query, components = components.len(), "fallback scan");

        let items = self.catalog.items();
        let score_at = |pos: usize| {
            let score = self.score(pos, &components, history_pos);
            (score > 0.0).then(|| items[pos].to_result(score))
        };

        #[cfg(feature = "parallel")]
        let results: Vec<SearchResult> = (0..items.len()).into_par_iter().filter_map(score_at).collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<SearchResult> = (0..items.len()).filter_map(score_at).collect();

        rank(results)
    }
}
