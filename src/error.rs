// src/error.rs
// =============================================================================
// Errors the crawler can run into.
//
// Only a usage error is fatal for the whole run. Fetch and parse errors end
// one branch of the crawl and are logged by the engine; an output error is
// reported after crawling has already finished.
//
// Malformed hrefs never show up here: the resolver returns None for them and
// the link is simply not a candidate.
// =============================================================================

use std::path::PathBuf;

/// Everything that can go wrong while crawling or writing the sitemap
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// Missing or invalid seed URL, or a bad flag value
    #[error("usage error: {0}")]
    Usage(String),

    /// The HTTP client could not be set up at startup
    #[error("could not set up HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    /// The transport could not complete the request
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// The server answered with anything other than 200
    #[error("failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be turned into a document
    #[error("failed to parse {url}: {message}")]
    DocumentParse { url: String, message: String },

    /// The sitemap file could not be written
    #[error("failed to write sitemap to {}: {source}", path.display())]
    OutputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
