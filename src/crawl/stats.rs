// src/crawl/stats.rs
// Counters for one crawl run. They are only ever reported, never read back
// by the traversal.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_fetched: AtomicUsize,
    fetch_failures: AtomicUsize,
    parse_failures: AtomicUsize,
    links_discovered: AtomicUsize,
    beyond_depth: AtomicUsize,
    already_visited: AtomicUsize,
}

/// A point-in-time copy of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub pages_fetched: usize,
    pub fetch_failures: usize,
    pub parse_failures: usize,
    pub links_discovered: usize,
    pub beyond_depth: usize,
    pub already_visited: usize,
}

impl CrawlStats {
    pub fn page_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_failed(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn parse_failed(&self) {
        self.parse_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn links_discovered(&self, count: usize) {
        self.links_discovered.fetch_add(count, Ordering::Relaxed);
    }

    pub fn beyond_depth(&self) {
        self.beyond_depth.fetch_add(1, Ordering::Relaxed);
    }

    pub fn already_visited(&self) {
        self.already_visited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            parse_failures: self.parse_failures.load(Ordering::Relaxed),
            links_discovered: self.links_discovered.load(Ordering::Relaxed),
            beyond_depth: self.beyond_depth.load(Ordering::Relaxed),
            already_visited: self.already_visited.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counts() {
        let stats = CrawlStats::default();
        stats.page_fetched();
        stats.page_fetched();
        stats.fetch_failed();
        stats.links_discovered(5);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.pages_fetched, 2);
        assert_eq!(snapshot.fetch_failures, 1);
        assert_eq!(snapshot.links_discovered, 5);
        assert_eq!(snapshot.parse_failures, 0);
    }
}
