// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word-list resources: the flat validity list and the ranked completion list.
//!
//! The flat list answers "is this a word?" for decomposition and spell
//! checking. The ranked list holds `word,score` lines and answers "which words
//! start with this prefix, best first?" for autocomplete. It is kept sorted by
//! word so a prefix is a contiguous range found with one binary search.

use crate::error::ResourceError;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Set of valid lowercase words, one per line in the source file.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Build from any word iterator. Words are trimmed and lowercased; blanks dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Parse newline-separated words. An empty list is an error.
    pub fn parse(text: &str) -> Result<Self, ResourceError> {
        let list = Self::from_words(text.lines());
        if list.is_empty() {
            return Err(ResourceError::EmptyWordList);
        }
        Ok(list)
    }

    pub fn load(path: &Path) -> Result<Self, ResourceError> {
        let text = fs::read_to_string(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Words with a precomputed popularity score, sorted by word.
#[derive(Debug, Clone, Default)]
pub struct RankedWords {
    entries: Vec<(String, f64)>,
}

impl RankedWords {
    /// Build from `(word, score)` pairs. Duplicate words keep their highest score.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut entries: Vec<(String, f64)> = entries
            .into_iter()
            .map(|(w, s)| (w.as_ref().trim().to_lowercase(), s))
            .filter(|(w, _)| !w.is_empty())
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.total_cmp(&a.1)));
        entries.dedup_by(|later, earlier| later.0 == earlier.0);
        Self { entries }
    }

    /// Parse `word,score` lines. Blank lines are skipped; anything else that
    /// doesn't parse is reported with its 1-based line number.
    pub fn parse(text: &str) -> Result<Self, ResourceError> {
        let mut entries = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = || ResourceError::MalformedRankedEntry {
                line: i + 1,
                content: line.to_string(),
            };
            let (word, score) = line.split_once(',').ok_or_else(malformed)?;
            let score: f64 = score.trim().parse().map_err(|_| malformed())?;
            if word.trim().is_empty() || !score.is_finite() {
                return Err(malformed());
            }
            entries.push((word, score));
        }
        Ok(Self::from_entries(entries))
    }

    pub fn load(path: &Path) -> Result<Self, ResourceError> {
        let text = fs::read_to_string(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Up to `limit` words starting with `prefix`, highest score first.
    ///
    /// Equal scores fall back to alphabetical order.
    pub fn completions(&self, prefix: &str, limit: usize) -> Vec<&str> {
        let start = self.entries.partition_point(|(w, _)| w.as_str() < prefix);
        let mut matches: Vec<&(String, f64)> = self.entries[start..]
            .iter()
            .take_while(|(w, _)| w.starts_with(prefix))
            .collect();
        matches.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches
            .into_iter()
            .take(limit)
            .map(|(w, _)| w.as_str())
            .collect()
    }

    pub fn score(&self, word: &str) -> Option<f64> {
        self.entries
            .binary_search_by(|(w, _)| w.as_str().cmp(word))
            .ok()
            .map(|i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
