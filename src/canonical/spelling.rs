// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Spelling suggestions ranked by edit distance.
//!
//! Words are bucketed by character count. A word of length `n` can only be
//! within `k` edits of words whose length is in `n-k..=n+k`, so each lookup
//! scans a handful of buckets instead of the whole dictionary.

use super::dictionary::{RankedWords, WordList};
use crate::fuzzy::levenshtein_bounded;
use std::collections::HashMap;

/// Short words tolerate fewer edits; "egg" should not become "fig".
pub const SHORT_WORD_LEN: usize = 4;

/// Edit budget for words up to [`SHORT_WORD_LEN`] characters.
pub const SHORT_WORD_EDITS: usize = 1;

/// Edit budget for longer words.
pub const LONG_WORD_EDITS: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct SpellSuggester {
    by_length: HashMap<usize, Vec<String>>,
    weights: HashMap<String, f64>,
}

impl SpellSuggester {
    /// Index every word in `words`. Ranked scores, when available, break ties
    /// between equally distant candidates.
    pub fn new(words: &WordList, ranked: Option<&RankedWords>) -> Self {
        let mut by_length: HashMap<usize, Vec<String>> = HashMap::new();
        let mut weights = HashMap::new();
        for word in words.iter() {
            by_length
                .entry(word.chars().count())
                .or_default()
                .push(word.to_string());
            if let Some(score) = ranked.and_then(|r| r.score(word)) {
                weights.insert(word.to_string(), score);
            }
        }
        for bucket in by_length.values_mut() {
            bucket.sort();
        }
        Self { by_length, weights }
    }

    /// Best correction for `word`, if any dictionary word is close enough.
    ///
    /// Candidates rank by distance, then ranked-list score, then alphabetically.
    pub fn suggest(&self, word: &str) -> Option<&str> {
        let len = word.chars().count();
        let max_edits = if len <= SHORT_WORD_LEN {
            SHORT_WORD_EDITS
        } else {
            LONG_WORD_EDITS
        };

        let mut best: Option<(usize, f64, &str)> = None;
        for candidate_len in len.saturating_sub(max_edits)..=len + max_edits {
            let Some(bucket) = self.by_length.get(&candidate_len) else {
                continue;
            };
            for candidate in bucket {
                let Some(distance) = levenshtein_bounded(word, candidate, max_edits) else {
                    continue;
                };
                let weight = self.weights.get(candidate).copied().unwrap_or(0.0);
                let better = match best {
                    None => true,
                    Some((d, w, c)) => {
                        distance < d
                            || (distance == d && weight > w)
                            || (distance == d && weight == w && candidate.as_str() < c)
                    }
                };
                if better {
                    best = Some((distance, weight, candidate.as_str()));
                }
            }
        }
        best.map(|(_, _, word)| word)
    }
}
