// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Several sources, one ranked list.
//!
//! Typically a large reference database plus a small set of user-entered
//! items. Each source scores independently; the merged list is re-sorted with
//! the shared ranking order.

use super::FoodSearch;
use crate::history::SearchHistory;
use crate::scoring::rank;
use crate::types::SearchResult;

#[derive(Default)]
pub struct CompositeSearch {
    sources: Vec<Box<dyn FoodSearch>>,
}

impl CompositeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl FoodSearch + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl FoodSearch for CompositeSearch {
    fn search(
        &self,
        query: &str,
        history: &dyn SearchHistory,
        autocomplete: bool,
    ) -> Vec<SearchResult> {
        rank(
            self.sources
                .iter()
                .flat_map(|s| s.search(query, history, autocomplete))
                .collect(),
        )
    }
}
