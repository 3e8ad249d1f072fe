// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel canonicalization of catalog records.
//!
//! Canonicalizing a description means spell-checking every word against the
//! dictionary, which dominates catalog load time. Records are independent, so
//! with the `parallel` feature this is a plain `par_iter()`. Output order
//! matches input order either way.

use super::{assemble_item, CatalogRecord};
use crate::canonical::Canonicalizer;
use crate::types::CatalogItem;

#[cfg(feature = "parallel")]
use super::{validate_records, Catalog};
#[cfg(feature = "parallel")]
use crate::error::CatalogError;

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
pub(crate) fn assemble_items(
    records: Vec<CatalogRecord>,
    max_popularity: f64,
    canonicalizer: Option<&Canonicalizer>,
    progress: Option<&ProgressBar>,
) -> Vec<CatalogItem> {
    let counter = AtomicUsize::new(0);
    records
        .into_par_iter()
        .map(|record| {
            let item = assemble_item(record, max_popularity, canonicalizer);
            if let Some(pb) = progress {
                let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
                pb.set_position(done as u64);
            }
            item
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn assemble_items(
    records: Vec<CatalogRecord>,
    max_popularity: f64,
    canonicalizer: Option<&Canonicalizer>,
    _progress: Option<&()>,
) -> Vec<CatalogItem> {
    records
        .into_iter()
        .map(|record| assemble_item(record, max_popularity, canonicalizer))
        .collect()
}

/// [`Catalog::build`] with a progress bar ticking once per record.
#[cfg(feature = "parallel")]
pub fn build_with_progress(
    records: Vec<CatalogRecord>,
    canonicalizer: Option<&Canonicalizer>,
    progress: &ProgressBar,
) -> Result<Catalog, CatalogError> {
    let max_popularity = validate_records(&records)?;
    progress.set_length(records.len() as u64);
    let items = assemble_items(records, max_popularity, canonicalizer, Some(progress));
    progress.finish_and_clear();
    Catalog::from_items(items)
}
