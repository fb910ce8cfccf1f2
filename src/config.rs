// src/config.rs
// =============================================================================
// The run configuration, built once at startup and never changed.
//
// Building it is where a bad seed URL gets caught: it has to be an absolute
// http(s) URL with a host, since the host is what --domain-only compares
// every discovered link against.
// =============================================================================

use std::path::PathBuf;
use url::Url;

use crate::cli::{Cli, DEFAULT_OUTPUT};
use crate::error::CrawlError;
use crate::links::{host_of, CanonicalUrl, LinkFilter};

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Where the crawl starts, already canonicalized
    pub seed: CanonicalUrl,
    /// Deepest level that still gets fetched; the seed is depth 0
    pub max_depth: usize,
    /// Only follow links whose host matches `base_host`
    pub domain_only: bool,
    /// host[:port] of the seed
    pub base_host: String,
    /// Cap on simultaneous fetches; None means one task per link, unbounded
    pub concurrency: Option<usize>,
    /// Sitemap destination
    pub output: PathBuf,
}

impl RunConfig {
    pub fn new(seed: &str, max_depth: usize, domain_only: bool) -> Result<Self, CrawlError> {
        let url = Url::parse(seed)
            .map_err(|e| CrawlError::Usage(format!("invalid URL '{}': {}", seed, e)))?;

        if !url.scheme().starts_with("http") {
            return Err(CrawlError::Usage(format!(
                "seed URL must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if url.host_str().is_none() {
            return Err(CrawlError::Usage(format!("URL has no host: {}", seed)));
        }

        Ok(RunConfig {
            seed: CanonicalUrl::from_url(&url),
            max_depth,
            domain_only,
            base_host: host_of(&url).to_string(),
            concurrency: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
        })
    }

    pub fn from_cli(cli: &Cli) -> Result<Self, CrawlError> {
        Ok(RunConfig::new(&cli.url, cli.depth, cli.domain_only)?
            .with_concurrency(cli.concurrency)?
            .with_output(cli.output.clone()))
    }

    pub fn with_concurrency(mut self, limit: Option<usize>) -> Result<Self, CrawlError> {
        if limit == Some(0) {
            return Err(CrawlError::Usage("--concurrency must be at least 1".to_string()));
        }
        self.concurrency = limit;
        Ok(self)
    }

    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = output;
        self
    }

    pub fn link_filter(&self) -> LinkFilter {
        LinkFilter::new(self.domain_only, self.base_host.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_base_host_comes_from_seed() {
        let config = RunConfig::new("https://example.com/start/", 3, true).unwrap();
        assert_eq!(config.base_host, "example.com");
        assert_eq!(config.seed.as_str(), "https://example.com/start");
    }

    #[test]
    fn test_base_host_keeps_port() {
        let config = RunConfig::new("http://localhost:8080", 3, true).unwrap();
        assert_eq!(config.base_host, "localhost:8080");
        assert_eq!(config.seed.as_str(), "http://localhost:8080");
    }

    #[test]
    fn test_invalid_seed_is_usage_error() {
        let err = RunConfig::new("not a url", 3, true).unwrap_err();
        assert!(matches!(err, CrawlError::Usage(_)));
    }

    #[test]
    fn test_non_http_seed_is_usage_error() {
        assert!(matches!(
            RunConfig::new("ftp://example.com", 3, true),
            Err(CrawlError::Usage(_))
        ));
        assert!(matches!(
            RunConfig::new("mailto:someone@example.com", 3, true),
            Err(CrawlError::Usage(_))
        ));
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let config = RunConfig::new("https://example.com", 3, true).unwrap();
        assert!(config.clone().with_concurrency(Some(0)).is_err());
        assert_eq!(config.with_concurrency(Some(4)).unwrap().concurrency, Some(4));
    }

    #[test]
    fn test_from_cli() {
        let cli = Cli::try_parse_from([
            "sitemap-crawler",
            "--depth",
            "2",
            "--output",
            "map.txt",
            "https://example.com",
        ])
        .unwrap();
        let config = RunConfig::from_cli(&cli).unwrap();
        assert_eq!(config.max_depth, 2);
        assert!(config.domain_only);
        assert_eq!(config.output, PathBuf::from("map.txt"));
    }
}
