// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind food search ranking.
//!
//! # Constants
//!
//! | Constant              | Value | Used by   |
//! |-----------------------|-------|-----------|
//! | `INDEXED_MATCH_WEIGHT`| 40    | index     |
//! | `EXACT_MATCH_WEIGHT`  | 80    | fallback  |
//! | `PARTIAL_MATCH_WEIGHT`| 10    | fallback  |
//! | `HISTORY_SCORE`       | 200   | both      |
//! | `POPULARITY_DIVISOR`  | 20    | both      |
//! | `FRESHNESS_BONUS`     | 0.2   | fallback  |
//!
//! The history score is a replacement, not a bonus: an item the user picked for
//! this exact query before scores `HISTORY_SCORE`, full stop, in both matchers.

// =============================================================================
// INDEXED MATCHER
// =============================================================================

/// Per-token weight for a canonical component match.
pub const INDEXED_MATCH_WEIGHT: f64 = 40.0;

/// Position factors for priorities 1..=5. All above 0.5 so two matches beat one.
pub const INDEXED_POSITION_FACTORS: [f64; 5] = [1.0, 0.9, 0.8, 0.7, 0.6];

/// Position factor for priorities past the table.
pub const INDEXED_TAIL_FACTOR: f64 = 0.55;

// =============================================================================
// FALLBACK MATCHER
// =============================================================================

/// Weight for an equal (exact, plural or near-typo) component match.
pub const EXACT_MATCH_WEIGHT: f64 = 80.0;

/// Weight for a substring containment match.
pub const PARTIAL_MATCH_WEIGHT: f64 = 10.0;

/// Position factors for priorities 1..=6.
pub const FALLBACK_POSITION_FACTORS: [f64; 6] = [1.0, 0.7, 0.6, 0.5, 0.4, 0.3];

/// Position factor for priorities past the table.
pub const FALLBACK_TAIL_FACTOR: f64 = 0.2;

/// Flat bonus for items described as "raw" or "fresh".
pub const FRESHNESS_BONUS: f64 = 0.2;

/// Components shorter than this never match partially.
pub const MIN_PARTIAL_LEN: usize = 3;

/// Components at least this long tolerate one edit.
pub const ONE_TYPO_MIN_LEN: usize = 5;

/// Components at least this long tolerate two edits.
pub const TWO_TYPO_MIN_LEN: usize = 9;

// =============================================================================
// SHARED
// =============================================================================

/// Score for the item the history says this query usually means.
pub const HISTORY_SCORE: f64 = 200.0;

/// Popularity (0..=100) is divided by this before being added.
pub const POPULARITY_DIVISOR: f64 = 20.0;

fn position_factor(table: &[f64], tail: f64, priority: u32) -> f64 {
    // priority 0 means "not present"; treat like the tail rather than index -1
    match priority.checked_sub(1) {
        Some(i) => table.get(i as usize).copied().unwrap_or(tail),
        None => tail,
    }
}

/// Position factor for the component index.
pub fn indexed_position_factor(priority: u32) -> f64 {
    position_factor(&INDEXED_POSITION_FACTORS, INDEXED_TAIL_FACTOR, priority)
}

/// Position factor for the fallback matcher.
pub fn fallback_position_factor(priority: u32) -> f64 {
    position_factor(&FALLBACK_POSITION_FACTORS, FALLBACK_TAIL_FACTOR, priority)
}

/// Popularity contribution, only granted when there is already a match.
pub fn popularity_bonus(base: f64, popularity: f64) -> f64 {
    if base > 0.0 {
        popularity / POPULARITY_DIVISOR
    } else {
        0.0
    }
}

/// Score one canonical token matching a component at `priority`.
pub fn indexed_token_score(priority: u32, popularity: f64) -> f64 {
    let base = INDEXED_MATCH_WEIGHT * indexed_position_factor(priority);
    base + popularity_bonus(base, popularity)
}
