// src/crawl/engine.rs
// =============================================================================
// The traversal engine.
//
// How it works:
// 1. The seed is spawned as a task at depth 0
// 2. A task past the maximum depth stops right away, without fetching
// 3. Otherwise it claims its URL in the visited set; if another task got
//    there first it stops (first claim wins, whatever the depth)
// 4. It fetches the page; a transport error or non-200 status ends the branch
// 5. It parses the page and resolves every <a href> on it
// 6. Every admissible link becomes a new task at depth + 1, spawned without
//    waiting for the previous one
//
// By default fan-out is unbounded: one tokio task per discovered link. With
// a concurrency limit, tasks are still spawned per link but must hold a
// semaphore permit while they fetch.
//
// run() returns only when the wait group says every task in the tree is done.
// =============================================================================

use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use super::stats::{CrawlStats, StatsSnapshot};
use super::visited::VisitedSet;
use super::wait_group::WaitGroup;
use crate::config::RunConfig;
use crate::error::CrawlError;
use crate::fetch::Fetcher;
use crate::links::{extract_links, CanonicalUrl, LinkFilter};

// One unit of work: a URL and how many links away from the seed it is
#[derive(Debug, Clone)]
struct CrawlTask {
    url: CanonicalUrl,
    depth: usize,
}

/// What a finished crawl hands back
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Every URL claimed during the run, in no particular order
    pub visited: Vec<CanonicalUrl>,
    pub stats: StatsSnapshot,
}

pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    filter: LinkFilter,
    max_depth: usize,
    fetch_limit: Option<Semaphore>,
    visited: VisitedSet,
    stats: CrawlStats,
    pending: WaitGroup,
}

impl Crawler {
    pub fn new(config: &RunConfig, fetcher: Arc<dyn Fetcher>) -> Arc<Self> {
        Arc::new(Crawler {
            fetcher,
            filter: config.link_filter(),
            max_depth: config.max_depth,
            fetch_limit: config.concurrency.map(Semaphore::new),
            visited: VisitedSet::new(),
            stats: CrawlStats::default(),
            pending: WaitGroup::new(),
        })
    }

    /// Crawls everything reachable from `seed` and waits for the last task
    pub async fn run(self: &Arc<Self>, seed: CanonicalUrl) -> CrawlReport {
        info!(seed = %seed, max_depth = self.max_depth, "Starting crawl");

        self.spawn(CrawlTask { url: seed, depth: 0 });
        self.pending.wait().await;

        let visited = self.visited.snapshot();
        let stats = self.stats.snapshot();

        info!(
            visited = visited.len(),
            pages_fetched = stats.pages_fetched,
            fetch_failures = stats.fetch_failures,
            parse_failures = stats.parse_failures,
            "Crawl completed"
        );

        CrawlReport { visited, stats }
    }

    // The wait group is bumped here, before the task exists, so wait() can
    // never see zero while a child is about to start.
    fn spawn(self: &Arc<Self>, task: CrawlTask) {
        let guard = self.pending.add();
        let crawler = Arc::clone(self);

        tokio::spawn(async move {
            let _guard = guard;
            crawler.crawl(task).await;
        });
    }

    async fn crawl(self: &Arc<Self>, task: CrawlTask) {
        if task.depth > self.max_depth {
            self.stats.beyond_depth();
            return;
        }

        if !self.visited.try_insert(&task.url) {
            self.stats.already_visited();
            return;
        }

        debug!(
            url = %task.url,
            depth = task.depth,
            visited = self.visited.len(),
            "Visiting page"
        );

        let links = match self.expand(&task.url).await {
            Ok(links) => links,
            Err(e) => {
                match &e {
                    CrawlError::DocumentParse { .. } => self.stats.parse_failed(),
                    _ => self.stats.fetch_failed(),
                }
                warn!(url = %task.url, depth = task.depth, error = %e, "Abandoning branch");
                return;
            }
        };

        self.stats.links_discovered(links.len());

        for url in links {
            self.spawn(CrawlTask {
                url,
                depth: task.depth + 1,
            });
        }
    }

    // Fetches one page and returns the admissible links on it
    async fn expand(&self, url: &CanonicalUrl) -> Result<Vec<CanonicalUrl>, CrawlError> {
        let page = {
            // A closed semaphore would mean no limit at all; we never close it
            let _permit = match &self.fetch_limit {
                Some(limit) => limit.acquire().await.ok(),
                None => None,
            };
            self.fetcher.fetch(url.as_str()).await?
        };

        if !page.is_ok() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status: page.status,
            });
        }

        self.stats.page_fetched();

        extract_links(url, &page.body, &self.filter)
    }
}
