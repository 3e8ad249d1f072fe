// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via bounded edit distance.
//!
//! Shared by the spelling suggester (ranking dictionary words by distance)
//! and the fallback matcher (treating near-identical components as equal).

mod levenshtein;

pub use levenshtein::*;
