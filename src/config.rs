// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `morsel.toml` configuration.
//!
//! ```toml
//! [resources]
//! word_list = "data/food_english.0"
//! ranked_words = "data/ranked_words.csv"
//!
//! [catalog]
//! path = "data/catalog.json"
//!
//! [history]
//! path = "history.json"
//!
//! [search]
//! autocomplete = true
//! max_completions = 5
//! result_limit = 10
//! ```
//!
//! Every key is optional. Scoring weights are not configurable; they live
//! in [`crate::scoring`] as constants.

use crate::canonical::DEFAULT_MAX_COMPLETIONS;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "morsel.toml";

pub const DEFAULT_RESULT_LIMIT: usize = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MorselConfig {
    pub resources: ResourcesConfig,
    pub catalog: CatalogConfig,
    pub history: HistoryConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourcesConfig {
    pub word_list: Option<PathBuf>,
    pub ranked_words: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub autocomplete: bool,
    pub max_completions: usize,
    pub result_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            autocomplete: false,
            max_completions: DEFAULT_MAX_COMPLETIONS,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl MorselConfig {
    pub fn parse(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load one file. Relative resource paths are resolved against its directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&text, path)?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    /// Explicit path (must exist), else `./morsel.toml` if present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            tracing::debug!(path = %local.display(), "using local config");
            return Self::from_file(local);
        }
        Ok(Self::default())
    }

    fn rebase(&mut self, base: &Path) {
        for path in [
            &mut self.resources.word_list,
            &mut self.resources.ranked_words,
            &mut self.catalog.path,
            &mut self.history.path,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
