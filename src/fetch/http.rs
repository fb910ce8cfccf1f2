// src/fetch/http.rs
// =============================================================================
// The real transport: plain GET requests through reqwest.
//
// Key functionality:
// - One shared Client for the whole run (connection pooling)
// - Redirects are followed with reqwest's default policy
// - No request timeout: a stuck request blocks its task until the server
//   gives up
// - Transport failures are categorized into a readable message
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;

use super::{FetchedPage, Fetcher};
use crate::error::CrawlError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetches pages over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, CrawlError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(CrawlError::ClientSetup)?;

        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, CrawlError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let status = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| categorize_error(url, e))?;

        Ok(FetchedPage {
            status,
            body: body.to_vec(),
        })
    }
}

// Categorizes the different ways a request can fail
//
// reqwest errors can happen for many reasons:
// - Network timeout (set by the OS or the server, we set none ourselves)
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
fn categorize_error(url: &str, error: reqwest::Error) -> CrawlError {
    let error_string = error.to_string();

    let message = if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "Could not resolve hostname".to_string()
        } else {
            "Connection failed".to_string()
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "SSL certificate error".to_string()
    } else if error.is_body() || error.is_decode() {
        format!("Failed to read response body: {}", error_string)
    } else {
        error_string
    };

    CrawlError::Fetch {
        url: url.to_string(),
        message,
    }
}
