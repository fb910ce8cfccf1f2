// src/links/resolve.rs
// =============================================================================
// Turns an href found on a page into a canonical absolute URL, or rejects it.
//
// Steps:
// 1. Parse the href as a URL reference (absolute or relative)
// 2. Resolve it against the URL of the page it was found on
// 3. Check it is a link we are allowed to follow (http(s), maybe same host)
// 4. Strip exactly one trailing '/'
//
// A link that fails any step is dropped. That is not an error: malformed or
// off-policy links just aren't candidates.
// =============================================================================

use serde::Serialize;
use std::fmt;
use url::{Position, Url};

/// An absolute URL with no trailing slash
///
/// Two links that name the same resource modulo a trailing slash produce the
/// same `CanonicalUrl`, which is what lets the visited set deduplicate them.
/// Ordering is byte order on the string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    /// Canonicalizes an already resolved URL
    pub fn from_url(url: &Url) -> Self {
        let mut s = String::from(url.as_str());
        if s.ends_with('/') {
            s.pop();
        }
        CanonicalUrl(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the canonical form back into a `Url`, for use as a base
    pub fn to_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.0)
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Decides which discovered links the crawler may follow
#[derive(Debug, Clone)]
pub struct LinkFilter {
    domain_only: bool,
    base_host: String,
}

impl LinkFilter {
    pub fn new(domain_only: bool, base_host: impl Into<String>) -> Self {
        LinkFilter {
            domain_only,
            base_host: base_host.into(),
        }
    }

    /// Resolves `raw_href` against `page_url` and returns it in canonical form
    /// if it may be crawled
    ///
    /// Examples (page = "https://example.com/docs/page"):
    ///   "/about"           -> Some("https://example.com/about")
    ///   "../"              -> Some("https://example.com")
    ///   "//other.com/x"    -> None when domain_only, else Some("https://other.com/x")
    ///   "mailto:a@b.c"     -> None (not http)
    pub fn resolve(&self, raw_href: &str, page_url: &Url) -> Option<CanonicalUrl> {
        let resolved = parse_reference(raw_href, page_url)?;

        if !self.should_visit(&resolved) {
            return None;
        }

        Some(CanonicalUrl::from_url(&resolved))
    }

    /// The admissibility check on an already resolved URL
    ///
    /// The scheme must start with "http". With `domain_only` the host (plus
    /// any explicit port) must equal the seed's exactly, so subdomains are
    /// treated as other sites.
    pub fn should_visit(&self, url: &Url) -> bool {
        if !url.scheme().starts_with("http") {
            return false;
        }

        !self.domain_only || host_of(url) == self.base_host
    }
}

/// host[:port] of a URL, the part the domain filter compares
///
/// Default ports are already dropped by the url crate, so
/// "https://example.com:443" and "https://example.com" share a host.
pub fn host_of(url: &Url) -> &str {
    &url[Position::BeforeHost..Position::AfterPort]
}

// Parses an href as a URL reference and resolves it against the page.
//
// The url crate quietly percent-encodes control characters, which would turn
// garbage like "not a url \x00" into a crawlable path, so an href carrying a
// control byte is rejected. html5ever hands us NUL bytes as U+FFFD, so that
// counts too. Surrounding whitespace is trimmed the way browsers trim href
// values; interior spaces are fine and get percent-encoded.
fn parse_reference(raw_href: &str, page_url: &Url) -> Option<Url> {
    let href = raw_href.trim_matches(|c: char| c.is_ascii_whitespace());
    if href
        .chars()
        .any(|c| c.is_ascii_control() || c == char::REPLACEMENT_CHARACTER)
    {
        return None;
    }

    page_url.join(href).ok()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a newtype around String?
//    - CanonicalUrl can only be built through from_url(), so every value in
//      the visited set has had its trailing slash stripped
//    - The compiler stops us from inserting a raw, unnormalized String
//
// 2. What does Url::join do?
//    - Resolves a reference the way a browser does
//    - "https://example.com/a/b" + "../c" = "https://example.com/c"
//    - An absolute href ("https://other.com") replaces the base entirely
//
// 3. What is url[Position::BeforeHost..Position::AfterPort]?
//    - The url crate lets you slice a Url by component positions
//    - This range covers "example.com:8080" but not the scheme, user or path
// -----------------------------------------------------------------------------
