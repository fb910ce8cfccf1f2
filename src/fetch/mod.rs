// src/fetch/mod.rs
// =============================================================================
// The crawler's transport.
//
// The engine only knows about the Fetcher trait, so tests can hand it a
// canned set of pages instead of going to the network.
//
// Submodules:
// - http: the real transport, backed by reqwest
// =============================================================================

mod http;

pub use http::HttpFetcher;

use crate::error::CrawlError;
use async_trait::async_trait;

/// A response as the crawler sees it: status code and raw body
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Only an exact 200 counts as a page worth expanding
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Fetches a URL, blocking the calling task until a response (or failure)
/// arrives
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, CrawlError>;
}
