// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for resource loading, catalog construction and history persistence.
//!
//! Query evaluation has no error type: malformed input degrades to literal
//! tokens and an empty result list is a valid answer.

use std::path::PathBuf;
use thiserror::Error;

/// Canonicalization resources could not be loaded.
///
/// This is the signal that selects the fallback matcher. It is carried by
/// [`crate::SearchEngine`] so callers can report why indexing is unavailable.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no word list configured")]
    MissingWordList,

    #[error("word list contains no words")]
    EmptyWordList,

    #[error("malformed ranked word entry on line {line}: {content:?}")]
    MalformedRankedEntry { line: usize, content: String },
}

/// A catalog could not be assembled from its records.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog item has an empty id (description {0:?})")]
    EmptyId(String),

    #[error("duplicate catalog id {0:?}")]
    DuplicateId(String),

    #[error("item {id:?}: component priorities must be 1..=n in order, found {found:?}")]
    InvalidPriorities { id: String, found: Vec<u32> },

    #[error("item {id:?}: popularity must be a finite non-negative number, found {value}")]
    InvalidPopularity { id: String, value: f64 },
}

/// Search history could not be read or written.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("history I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid history JSON: {0}")]
    Json(#[from] serde_json::Error),
}
