// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Build the run configuration (a bad seed URL stops us here)
// 4. Crawl, waiting for every spawned task to finish
// 5. Write the sitemap and exit with a proper code
//    (0 = success, 1 = sitemap could not be written, 2 = usage error)
//
// Rust concepts used:
// - async/await: every discovered link is fetched by its own task
// - Result<T, E>: For error handling (T = success type, E = error type)
// - Arc: the crawler is shared by all of those tasks
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod fetch;
mod links;
mod sitemap;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::RunConfig;
use crawl::{CrawlReport, Crawler, StatsSnapshot};
use fetch::HttpFetcher;
use links::CanonicalUrl;

const EXIT_OK: i32 = 0;
const EXIT_OUTPUT_FAILED: i32 = 1;
const EXIT_USAGE: i32 = 2;

// Printed to stdout with --json
#[derive(Debug, Serialize)]
struct CrawlSummary {
    seed: CanonicalUrl,
    max_depth: usize,
    domain_only: bool,
    output: PathBuf,
    urls_written: Option<usize>,
    stats: StatsSnapshot,
}

#[tokio::main]
async fn main() {
    // A missing seed URL makes clap print usage and exit with code 2
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            EXIT_USAGE
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so --json output on stdout stays clean
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// Returns the process exit code; Err means we never got as far as crawling
async fn run(cli: Cli) -> Result<i32> {
    let config = RunConfig::from_cli(&cli)?;

    tracing::info!(
        seed = %config.seed,
        max_depth = config.max_depth,
        domain_only = config.domain_only,
        base_host = %config.base_host,
        concurrency = ?config.concurrency,
        "Configuration loaded"
    );

    let fetcher = Arc::new(HttpFetcher::new().context("Failed to start crawler")?);

    let report = Crawler::new(&config, fetcher).run(config.seed.clone()).await;

    Ok(finish(&config, &report, cli.json))
}

// Writes the sitemap (and the --json summary) once crawling is done
//
// Nothing in here can undo the crawl: a failed write only turns the exit
// code into 1, and a summary that can't be printed is logged and skipped.
fn finish(config: &RunConfig, report: &CrawlReport, json: bool) -> i32 {
    let (urls_written, exit_code) =
        match sitemap::write_sitemap(&config.output, report.visited.clone()) {
            Ok(count) => {
                tracing::info!(path = %config.output.display(), urls = count, "Sitemap written");
                (Some(count), EXIT_OK)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to write sitemap");
                (None, EXIT_OUTPUT_FAILED)
            }
        };

    if json {
        let summary = CrawlSummary {
            seed: config.seed.clone(),
            max_depth: config.max_depth,
            domain_only: config.domain_only,
            output: config.output.clone(),
            urls_written,
            stats: report.stats,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => tracing::error!(error = %e, "Failed to print run summary"),
        }
    }

    exit_code
}
