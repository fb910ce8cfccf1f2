// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// There is a single command: give it a seed URL and it crawls. Everything
// else is an optional flag with a default.
// =============================================================================

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Where the sitemap is written unless --output says otherwise
pub const DEFAULT_OUTPUT: &str = "sitemap.txt";

// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "sitemap-crawler",
    version,
    about = "Crawl a website and write a sorted sitemap of every page visited",
    long_about = "sitemap-crawler starts from a seed URL, follows links concurrently up to a \
                  maximum depth and writes every URL it visited, one per line and sorted, \
                  to a sitemap file."
)]
pub struct Cli {
    /// Seed URL to start crawling from (e.g., https://example.com)
    ///
    /// This is a positional argument (required, no flag needed)
    pub url: String,

    /// Maximum crawl depth, inclusive. The seed is depth 0
    #[arg(long, default_value_t = 3)]
    pub depth: usize,

    /// Only follow links on the seed's host
    ///
    /// Takes an explicit value: --domain-only false
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub domain_only: bool,

    /// Maximum number of pages fetched at the same time (default: no limit)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// File to write the sitemap to (overwritten if it exists)
    #[arg(long, short, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Print a JSON summary of the run to stdout
    #[arg(long)]
    pub json: bool,

    /// Log every page visited (same as RUST_LOG=debug)
    #[arg(long, short)]
    pub verbose: bool,
}
