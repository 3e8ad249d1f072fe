// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the morsel command-line interface.
//!
//! Four subcommands: `search` to query a catalog, `choose` to record which
//! result was picked, `evaluate` to score search quality against known
//! query/id pairs, and `inspect` to see which matcher a setup would use.
//! Paths not given as flags come from `morsel.toml`.

pub mod display;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "morsel",
    about = "Food catalog search with spelling, compound and plural tolerance",
    version
)]
pub struct Cli {
    /// Config file (default: ./morsel.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the catalog and dictionary come from. Flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Catalog JSON (array of records)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Word list, one word per line
    #[arg(long)]
    pub words: Option<PathBuf>,

    /// Ranked word list, `word,score` per line (enables autocomplete)
    #[arg(long)]
    pub ranked: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog and print ranked results
    Search {
        /// Search query
        query: String,

        #[command(flatten)]
        sources: SourceArgs,

        /// History JSON used to personalize ranking
        #[arg(long)]
        history: Option<PathBuf>,

        /// Treat the last word as a prefix
        #[arg(short, long)]
        autocomplete: bool,

        /// Maximum number of results to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record that a result was chosen for a query
    Choose {
        /// The query as typed
        query: String,

        /// Id of the chosen item
        id: String,

        /// History JSON to update
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Measure ranking error over `query,id` pairs
    Evaluate {
        /// File of `query,id` lines
        pairs: PathBuf,

        #[command(flatten)]
        sources: SourceArgs,

        /// History JSON to consult while evaluating
        #[arg(long)]
        history: Option<PathBuf>,

        /// Print the per-pair report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which matcher would be used and index statistics
    Inspect {
        #[command(flatten)]
        sources: SourceArgs,
    },
}
