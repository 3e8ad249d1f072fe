// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core types: catalog items, their prioritized components, and search results.
//!
//! A description like "Milk, reduced fat, fluid" is broken into components,
//! each tagged with a priority. Priority 1 is the item's identity ("milk"),
//! later priorities are qualifiers. Both matchers weight matches by priority,
//! so the invariant that priorities run `1, 2, 3, ...` without gaps matters.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One semantically distinct chunk of a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub text: String,
    /// 1-based rank; 1 is most central to the item's identity.
    pub priority: u32,
}

impl Component {
    pub fn new(text: impl Into<String>, priority: u32) -> Self {
        Self {
            text: text.into(),
            priority,
        }
    }
}

/// Build components from texts, assigning priorities `1..=n` in order.
pub fn sequential_components<I, S>(texts: I) -> Vec<Component>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| Component::new(text, i as u32 + 1))
        .collect()
}

/// Do the priorities run 1, 2, 3, ... with no gaps or repeats?
///
/// An empty list is trivially sequential.
pub fn priorities_are_sequential(components: &[Component]) -> bool {
    components
        .iter()
        .enumerate()
        .all(|(i, c)| c.priority == i as u32 + 1)
}

/// A searchable food entry.
///
/// Built once per catalog load by [`crate::Catalog`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub description: String,
    /// Short nutrition blurb shown next to results, e.g. "Per 100g - 61kcal".
    pub summary: String,
    /// Literal description components, used by the fallback matcher.
    pub components: Vec<Component>,
    /// Canonicalized components, used by the component index.
    pub canonical_components: Vec<Component>,
    /// Relative popularity in `[0, 100]`, normalized against the corpus maximum.
    pub popularity: f64,
}

impl CatalogItem {
    /// Priority of the first canonical component equal to `token`, or 0.
    pub fn canonical_priority(&self, token: &str) -> u32 {
        self.canonical_components
            .iter()
            .find(|c| c.text == token)
            .map(|c| c.priority)
            .unwrap_or(0)
    }

    /// Does any literal component read "raw" or "fresh"?
    pub fn is_fresh(&self) -> bool {
        self.components.iter().any(|c| {
            c.text.eq_ignore_ascii_case("raw") || c.text.eq_ignore_ascii_case("fresh")
        })
    }

    pub fn to_result(&self, score: f64) -> SearchResult {
        SearchResult {
            id: self.id.clone(),
            description: self.description.clone(),
            summary: self.summary.clone(),
            popularity: self.popularity,
            score,
        }
    }
}

/// One ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub description: String,
    pub summary: String,
    pub popularity: f64,
    /// Higher is better. Zero or negative means no match and is never returned.
    pub score: f64,
}

impl SearchResult {
    /// Total ranking order shared by every search path.
    ///
    /// Score descending, then description ascending, then id ascending so that
    /// results are stable even when two items share a description.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.description.cmp(&other.description))
            .then_with(|| self.id.cmp(&other.id))
    }
}
