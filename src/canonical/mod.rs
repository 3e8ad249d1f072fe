// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Canonicalization: turning descriptions and queries into index keys.
//!
//! The pipeline, per raw token:
//!
//! ```text
//! "Cornstarch, Tomatoes"   split on non-word characters
//!   → ["Cornstarch", "Tomatoes"]
//!   → ["corn", "starch", "tomatoes"]   decompose two-word compounds
//!   → ["corn", "starch", "tomatoes"]   spell-correct unknown words (>= 3 chars)
//!   → ["corn", "starch", "tomato"]     stem
//! ```
//!
//! Spelling, compounding ("corn starch" vs "cornstarch") and inflection
//! ("tomato" vs "tomatoes") all collapse to the same canonical token, so the
//! component index only ever needs exact lookups.
//!
//! Stemming is not a fixpoint and a stem can itself split into two words, so
//! the pipeline reruns over its own output until the tokens stop changing.
//! Feeding canonical output back in returns it unchanged.

pub mod dictionary;
pub mod spelling;

pub use dictionary::{RankedWords, WordList};
pub use spelling::SpellSuggester;

use crate::error::ResourceError;
use crate::util::normalize::{fold_diacritics, split_words};
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Number of autocomplete hypotheses generated for the last query token.
pub const DEFAULT_MAX_COMPLETIONS: usize = 5;

/// Words shorter than this are never spell-corrected.
pub const MIN_CORRECTION_LEN: usize = 3;

/// Upper bound on reruns of the pipeline over its own output.
const MAX_SETTLE_ROUNDS: usize = 8;

/// Pure, deterministic description/query canonicalizer.
///
/// Holds only immutable lookup tables, so one instance can serve any number of
/// concurrent queries.
pub struct Canonicalizer {
    words: WordList,
    stems: HashSet<String>,
    ranked: Option<RankedWords>,
    suggester: SpellSuggester,
    stemmer: Stemmer,
    max_completions: usize,
}

impl fmt::Debug for Canonicalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canonicalizer")
            .field("words", &self.words.len())
            .field("stems", &self.stems.len())
            .field("ranked", &self.ranked.as_ref().map(RankedWords::len))
            .field("max_completions", &self.max_completions)
            .finish()
    }
}

impl Canonicalizer {
    /// Build from in-memory resources. Without a ranked list, autocomplete
    /// treats the partial last token as a complete word.
    pub fn new(words: WordList, ranked: Option<RankedWords>) -> Self {
        let stemmer = Stemmer::create(Algorithm::English);
        let stems = words.iter().map(|w| stemmer.stem(w).into_owned()).collect();
        let suggester = SpellSuggester::new(&words, ranked.as_ref());
        Self {
            words,
            stems,
            ranked,
            suggester,
            stemmer,
            max_completions: DEFAULT_MAX_COMPLETIONS,
        }
    }

    /// Load the word list (required) and ranked list (optional) from disk.
    ///
    /// Any failure is returned, never papered over; the caller decides whether
    /// to fall back to the non-indexed matcher.
    pub fn load(word_list: &Path, ranked_words: Option<&Path>) -> Result<Self, ResourceError> {
        let words = WordList::load(word_list)?;
        let ranked = ranked_words.map(RankedWords::load).transpose()?;
        tracing::debug!(
            words = words.len(),
            ranked = ranked.as_ref().map_or(0, RankedWords::len),
            "loaded canonicalization resources"
        );
        Ok(Self::new(words, ranked))
    }

    pub fn with_max_completions(mut self, max_completions: usize) -> Self {
        self.max_completions = max_completions.max(1);
        self
    }

    pub fn max_completions(&self) -> usize {
        self.max_completions
    }

    pub fn has_autocomplete(&self) -> bool {
        self.ranked.as_ref().is_some_and(|r| !r.is_empty())
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Canonical tokens for a description or query, in order.
    pub fn canonicalize(&self, text: &str) -> Vec<String> {
        self.settle(self.canonicalize_once(&fold_diacritics(text)))
    }

    /// One pass: split, decompose, then correct and stem each piece.
    fn canonicalize_once(&self, text: &str) -> Vec<String> {
        split_words(text)
            .flat_map(|raw| self.decompose(raw))
            .map(|sub| self.canonical_token(&sub))
            .collect()
    }

    /// Rerun the pipeline until the tokens are their own canonical form.
    fn settle(&self, mut tokens: Vec<String>) -> Vec<String> {
        for _ in 0..MAX_SETTLE_ROUNDS {
            let next = self.canonicalize_once(&tokens.join(" "));
            if next == tokens {
                break;
            }
            tokens = next;
        }
        tokens
    }

    /// One canonical token sequence per completion of the last word.
    ///
    /// All sequences share the canonical prefix; only the tail differs. A
    /// completion that decomposes contributes both of its parts. Duplicate
    /// sequences are dropped, first occurrence wins. An empty query gives no
    /// sequences at all.
    pub fn canonicalize_autocomplete(&self, query: &str) -> Vec<Vec<String>> {
        let folded = fold_diacritics(query);
        let decomposed: Vec<String> = split_words(&folded)
            .flat_map(|raw| self.decompose(raw))
            .collect();
        let Some((last, head)) = decomposed.split_last() else {
            return Vec::new();
        };

        let prefix = self.settle(head.iter().map(|t| self.canonical_token(t)).collect());

        let mut completions: Vec<&str> = self
            .ranked
            .as_ref()
            .map(|r| r.completions(last, self.max_completions))
            .unwrap_or_default();
        // No literal completion: treat the partial word as complete (and let
        // spell correction have a go at it)
        if completions.is_empty() {
            completions.push(last.as_str());
        }

        let mut hypotheses: Vec<Vec<String>> = Vec::with_capacity(completions.len());
        for completion in completions {
            let tail = self
                .decompose(completion)
                .iter()
                .map(|t| self.canonical_token(t))
                .collect();
            let mut sequence = prefix.clone();
            sequence.extend(self.settle(tail));
            if !hypotheses.contains(&sequence) {
                hypotheses.push(sequence);
            }
        }
        tracing::trace!(query, hypotheses = hypotheses.len(), "autocomplete expansion");
        hypotheses
    }

    /// Split a compound into two dictionary words, or keep it whole.
    ///
    /// Tries every split position left to right; the first split where both
    /// halves are words wins. Output is lowercase.
    pub fn decompose(&self, word: &str) -> Vec<String> {
        let lower = word.to_lowercase();
        for (split, _) in lower.char_indices().skip(1) {
            let (prefix, suffix) = lower.split_at(split);
            if self.words.contains(prefix) && self.words.contains(suffix) {
                return vec![prefix.to_string(), suffix.to_string()];
            }
        }
        vec![lower]
    }

    /// Lowercase, spell-correct if unrecognized, then stem. A single pass;
    /// [`Canonicalizer::canonicalize`] settles the result.
    pub fn canonical_token(&self, token: &str) -> String {
        let lower = token.to_lowercase();
        if self.stems.contains(&lower) {
            return lower;
        }

        let corrected = if self.needs_correction(&lower) {
            self.suggester.suggest(&lower).unwrap_or(&lower)
        } else {
            &lower
        };
        self.stemmer.stem(corrected).into_owned()
    }

    fn needs_correction(&self, lower: &str) -> bool {
        lower.chars().count() >= MIN_CORRECTION_LEN
            && !lower.starts_with(|c: char| c.is_ascii_digit())
            && !self.words.contains(lower)
    }
}
