// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Matcher selection.
//!
//! The choice between indexed and fallback matching is made once, from the
//! outcome of loading the canonicalization resources. A load failure is kept
//! on the fallback variant rather than discarded, so callers can surface it.

use super::utils::truncate;
use super::{FallbackMatcher, FoodSearch, IndexedMatcher};
use crate::canonical::Canonicalizer;
use crate::catalog::{Catalog, CatalogRecord};
use crate::error::{CatalogError, ResourceError};
use crate::history::SearchHistory;
use crate::types::SearchResult;
use std::sync::Arc;

/// The matcher strategy in use.
#[derive(Debug)]
pub enum Matcher {
    Indexed(IndexedMatcher),
    Fallback {
        matcher: FallbackMatcher,
        reason: ResourceError,
    },
}

#[derive(Debug)]
pub struct SearchEngine {
    catalog: Arc<Catalog>,
    matcher: Matcher,
}

impl SearchEngine {
    /// Select a matcher from the result of loading the canonicalizer.
    ///
    /// The catalog should have been built with the same canonicalizer when
    /// there is one; items without canonical components are invisible to the
    /// indexed matcher.
    pub fn new(catalog: Catalog, canonicalizer: Result<Canonicalizer, ResourceError>) -> Self {
        let catalog = Arc::new(catalog);
        let matcher = match canonicalizer {
            Ok(canonicalizer) => Matcher::Indexed(IndexedMatcher::new(Arc::clone(&catalog), canonicalizer)),
            Err(reason) => {
                tracing::warn!(error = %reason, "canonicalization resources unavailable, using fallback matcher");
                Matcher::Fallback {
                    matcher: FallbackMatcher::new(Arc::clone(&catalog)),
                    reason,
                }
            }
        };
        Self { catalog, matcher }
    }

    /// Build the catalog and select the matcher in one go, canonicalizing the
    /// records when the canonicalizer loaded.
    pub fn from_records(
        records: Vec<CatalogRecord>,
        canonicalizer: Result<Canonicalizer, ResourceError>,
    ) -> Result<Self, CatalogError> {
        let catalog = Catalog::build(records, canonicalizer.as_ref().ok())?;
        Ok(Self::new(catalog, canonicalizer))
    }

    /// Full ranked result list.
    pub fn search(
        &self,
        query: &str,
        history: &dyn SearchHistory,
        autocomplete: bool,
    ) -> Vec<SearchResult> {
        match &self.matcher {
            Matcher::Indexed(m) => m.search(query, history, autocomplete),
            Matcher::Fallback { matcher, .. } => matcher.search(query, history, autocomplete),
        }
    }

    /// Ranked results truncated to `limit`, after the full sort.
    pub fn search_limited(
        &self,
        query: &str,
        history: &dyn SearchHistory,
        autocomplete: bool,
        limit: usize,
    ) -> Vec<SearchResult> {
        truncate(self.search(query, history, autocomplete), Some(limit))
    }

    /// Why the fallback matcher was chosen, if it was.
    pub fn fallback_reason(&self) -> Option<&ResourceError> {
        match &self.matcher {
            Matcher::Indexed(_) => None,
            Matcher::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self.matcher, Matcher::Indexed(_))
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn canonicalizer(&self) -> Option<&Canonicalizer> {
        match &self.matcher {
            Matcher::Indexed(m) => Some(m.canonicalizer()),
            Matcher::Fallback { .. } => None,
        }
    }
}

impl FoodSearch for SearchEngine {
    fn search(
        &self,
        query: &str,
        history: &dyn SearchHistory,
        autocomplete: bool,
    ) -> Vec<SearchResult> {
        SearchEngine::search(self, query, history, autocomplete)
    }
}
