// src/crawl/mod.rs
// =============================================================================
// This module handles the crawl itself.
//
// Features:
// - One concurrent task per discovered link, bounded only by depth
// - Optional cap on how many pages are fetched at once
// - A shared visited set so no URL is fetched twice, even on cyclic sites
// - A wait group so the caller knows when every task has finished
//
// Rust concepts:
// - Arc: shared ownership of the crawler across tasks
// - Mutex and atomics: the only shared mutable state
// =============================================================================

mod engine;
mod stats;
mod visited;
mod wait_group;

pub use engine::{CrawlReport, Crawler};
pub use stats::StatsSnapshot;
