// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! Component priority dominates. Popularity is a small additive nudge on top,
//! at most 5 points per matched token.

mod core;
pub mod ranking;

pub use self::core::*;
pub use ranking::{compare_results, rank};
