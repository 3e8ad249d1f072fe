// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Catalog construction: raw records in, validated immutable items out.
//!
//! Building is two passes over the records:
//!
//! 1. Find the corpus maximum raw popularity.
//! 2. Normalize each record against it (`100 × raw / max`), derive any missing
//!    components, and canonicalize.
//!
//! Popularity therefore depends only on the corpus, never on the order records
//! arrive in. Pass 2 is the expensive one (spell-checking every description
//! word) and runs on rayon when the `parallel` feature is on.

mod parallel;

#[cfg(feature = "parallel")]
pub use parallel::build_with_progress;

use crate::canonical::Canonicalizer;
use crate::error::CatalogError;
use crate::types::{priorities_are_sequential, sequential_components, CatalogItem, Component};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One catalog entry as produced by upstream parsers and scrapers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub summary: String,
    /// Raw, unnormalized popularity (e.g. a consumption count).
    #[serde(default)]
    pub popularity: f64,
    /// Explicit components. Derived from the description when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    /// Explicit canonical components. Derived with the canonicalizer when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_components: Option<Vec<Component>>,
}

impl CatalogRecord {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            summary: String::new(),
            popularity: 0.0,
            components: None,
            canonical_components: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity;
        self
    }

    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = Some(components);
        self
    }

    pub fn with_canonical_components(mut self, components: Vec<Component>) -> Self {
        self.canonical_components = Some(components);
        self
    }
}

/// Split a description into prioritized components.
///
/// Comma-separated chunks come in order; within a chunk the words are taken
/// last to first, since the head noun ends the phrase: "Uncooked oil, olive"
/// gives `oil`, `Uncooked`, `olive`. Case is kept.
pub fn description_components(description: &str) -> Vec<Component> {
    sequential_components(
        description
            .split(',')
            .flat_map(|chunk| chunk.split_whitespace().rev())
            .map(str::to_string),
    )
}

/// Canonicalize components in order, one priority per produced token.
pub fn canonical_components(components: &[Component], canonicalizer: &Canonicalizer) -> Vec<Component> {
    sequential_components(
        components
            .iter()
            .flat_map(|c| canonicalizer.canonicalize(&c.text)),
    )
}

/// Validated, immutable collection of catalog items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Two-pass build from raw records.
    ///
    /// Without a canonicalizer, records lacking canonical components get none;
    /// such a catalog only suits the fallback matcher.
    pub fn build(
        records: Vec<CatalogRecord>,
        canonicalizer: Option<&Canonicalizer>,
    ) -> Result<Self, CatalogError> {
        let max_popularity = validate_records(&records)?;
        let items = parallel::assemble_items(records, max_popularity, canonicalizer, None);
        let catalog = Self::from_items(items)?;
        tracing::debug!(
            items = catalog.len(),
            max_popularity,
            canonicalized = canonicalizer.is_some(),
            "built catalog"
        );
        Ok(catalog)
    }

    /// Wrap already-normalized items, checking ids and priorities.
    pub fn from_items(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if item.id.is_empty() {
                return Err(CatalogError::EmptyId(item.description.clone()));
            }
            if by_id.insert(item.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
            check_priorities(&item.id, &item.components)?;
            check_priorities(&item.id, &item.canonical_components)?;
        }
        Ok(Self { items, by_id })
    }

    /// Read a JSON array of [`CatalogRecord`]s and build.
    pub fn from_json_reader<R: Read>(
        reader: R,
        canonicalizer: Option<&Canonicalizer>,
    ) -> Result<Self, CatalogError> {
        let records: Vec<CatalogRecord> = serde_json::from_reader(reader)?;
        Self::build(records, canonicalizer)
    }

    pub fn load(path: &Path, canonicalizer: Option<&Canonicalizer>) -> Result<Self, CatalogError> {
        Self::from_json_reader(open_catalog(path)?, canonicalizer)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.by_id.get(id).map(|&i| &self.items[i])
    }

    /// Index of the item with `id` in [`Catalog::items`].
    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogItem> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogItem;
    type IntoIter = std::slice::Iter<'a, CatalogItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Open a catalog file for buffered reading.
pub fn open_catalog(path: &Path) -> Result<BufReader<File>, CatalogError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Read raw records without building, e.g. to drive a progress bar.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<CatalogRecord>, CatalogError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Pass 1: reject bad records up front and return the popularity maximum.
fn validate_records(records: &[CatalogRecord]) -> Result<f64, CatalogError> {
    let mut max_popularity: f64 = 0.0;
    for record in records {
        if !record.popularity.is_finite() || record.popularity < 0.0 {
            return Err(CatalogError::InvalidPopularity {
                id: record.id.clone(),
                value: record.popularity,
            });
        }
        if let Some(components) = &record.components {
            check_priorities(&record.id, components)?;
        }
        if let Some(components) = &record.canonical_components {
            check_priorities(&record.id, components)?;
        }
        max_popularity = max_popularity.max(record.popularity);
    }
    Ok(max_popularity)
}

fn check_priorities(id: &str, components: &[Component]) -> Result<(), CatalogError> {
    if priorities_are_sequential(components) {
        return Ok(());
    }
    Err(CatalogError::InvalidPriorities {
        id: id.to_string(),
        found: components.iter().map(|c| c.priority).collect(),
    })
}

/// Pass 2 for a single record.
pub(crate) fn assemble_item(
    record: CatalogRecord,
    max_popularity: f64,
    canonicalizer: Option<&Canonicalizer>,
) -> CatalogItem {
    let components = record
        .components
        .unwrap_or_else(|| description_components(&record.description));
    let canonical_components = match (record.canonical_components, canonicalizer) {
        (Some(explicit), _) => explicit,
        (None, Some(c)) => canonical_components(&components, c),
        (None, None) => Vec::new(),
    };
    let popularity = if max_popularity > 0.0 {
        100.0 * record.popularity / max_popularity
    } else {
        0.0
    };
    CatalogItem {
        id: record.id,
        description: record.description,
        summary: record.summary,
        components,
        canonical_components,
        popularity,
    }
}
