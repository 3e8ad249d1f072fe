// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use morsel::catalog::{open_catalog, read_records};
use morsel::evaluation::{evaluate, load_pairs};
use morsel::{
    Canonicalizer, Catalog, FileHistory, Matcher, MorselConfig, NoHistory, ResourceError,
    SearchEngine, SearchHistory,
};

mod cli;
use cli::{display, Cli, Commands, SourceArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "morsel=debug" } else { "morsel=info" })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = MorselConfig::discover(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Search {
            query,
            sources,
            history,
            autocomplete,
            limit,
            json,
        } => {
            let engine = build_engine(&sources, &config)?;
            let history = open_history(history.or(config.history.path.clone()))?;
            let autocomplete = autocomplete || config.search.autocomplete;
            let limit = limit.unwrap_or(config.search.result_limit);
            let results = engine.search_limited(&query, history.as_ref(), autocomplete, limit);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                display::results_table(&results);
            }
        }
        Commands::Choose { query, id, history } => {
            let Some(path) = history.or(config.history.path.clone()) else {
                bail!("no history file: pass --history or set [history] path in morsel.toml");
            };
            let history = FileHistory::open(&path)
                .with_context(|| format!("opening history {}", path.display()))?;
            history.record_choice(&query, &id);
            history.flush().context("saving history")?;
            tracing::info!(query = query.as_str(), id = id.as_str(), "recorded choice");
        }
        Commands::Evaluate {
            pairs,
            sources,
            history,
            json,
        } => {
            let pairs = load_pairs(&pairs)
                .with_context(|| format!("reading pairs from {}", pairs.display()))?;
            let engine = build_engine(&sources, &config)?;
            let history = open_history(history.or(config.history.path.clone()))?;
            let report = evaluate(&engine, &pairs, history.as_ref());
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                display::evaluation_summary(&report);
            }
        }
        Commands::Inspect { sources } => {
            let engine = build_engine(&sources, &config)?;
            inspect(&engine);
        }
    }
    Ok(())
}

/// Catalog path plus the outcome of loading the dictionary resources.
fn build_engine(sources: &SourceArgs, config: &MorselConfig) -> Result<SearchEngine> {
    let Some(catalog_path) = sources.catalog.clone().or(config.catalog.path.clone()) else {
        bail!("no catalog: pass --catalog or set [catalog] path in morsel.toml");
    };
    let words = sources.words.clone().or(config.resources.word_list.clone());
    let ranked = sources.ranked.clone().or(config.resources.ranked_words.clone());

    let canonicalizer = load_canonicalizer(words.as_deref(), ranked.as_deref())
        .map(|c| c.with_max_completions(config.search.max_completions));
    let catalog = load_catalog(&catalog_path, canonicalizer.as_ref().ok())?;
    Ok(SearchEngine::new(catalog, canonicalizer))
}

fn load_canonicalizer(
    words: Option<&Path>,
    ranked: Option<&Path>,
) -> Result<Canonicalizer, ResourceError> {
    let words = words.ok_or(ResourceError::MissingWordList)?;
    Canonicalizer::load(words, ranked)
}

#[cfg(feature = "parallel")]
fn load_catalog(path: &Path, canonicalizer: Option<&Canonicalizer>) -> Result<Catalog> {
    use indicatif::{ProgressBar, ProgressStyle};

    let records = read_records(open_catalog(path)?)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let progress = if display::use_colors() {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
        )?
        .progress_chars("━━╸");
        ProgressBar::new(records.len() as u64)
            .with_style(style)
            .with_prefix("canonical")
    } else {
        ProgressBar::hidden()
    };
    morsel::catalog::build_with_progress(records, canonicalizer, &progress)
        .with_context(|| format!("building catalog {}", path.display()))
}

#[cfg(not(feature = "parallel"))]
fn load_catalog(path: &Path, canonicalizer: Option<&Canonicalizer>) -> Result<Catalog> {
    let records = read_records(open_catalog(path)?)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    Catalog::build(records, canonicalizer)
        .with_context(|| format!("building catalog {}", path.display()))
}

fn open_history(path: Option<PathBuf>) -> Result<Box<dyn SearchHistory>> {
    match path {
        Some(path) => {
            let history = FileHistory::open(&path)
                .with_context(|| format!("opening history {}", path.display()))?;
            Ok(Box::new(history))
        }
        None => Ok(Box::new(NoHistory)),
    }
}

fn inspect(engine: &SearchEngine) {
    let catalog = engine.catalog();
    let canonicalized = catalog
        .iter()
        .filter(|i| !i.canonical_components.is_empty())
        .count();
    println!("items          {}", catalog.len());
    println!("canonicalized  {}", canonicalized);
    match engine.matcher() {
        Matcher::Indexed(m) => {
            let c = m.canonicalizer();
            println!("matcher        indexed");
            println!("dictionary     {} words", c.word_count());
            println!(
                "autocomplete   {}",
                if c.has_autocomplete() {
                    format!("{} completions", c.max_completions())
                } else {
                    "off (no ranked word list)".to_string()
                }
            );
            println!("index tokens   {}", m.index().token_count());
            println!("postings       {}", m.index().posting_count());
        }
        Matcher::Fallback { reason, .. } => {
            println!("matcher        fallback");
            println!("reason         {}", display::themed(display::YELLOW, &[], &reason.to_string()));
        }
    }
}
