// src/links/html.rs
// =============================================================================
// This module pulls crawlable links out of a fetched HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Is built on html5ever (Mozilla's HTML parser), which recovers from
//   broken markup instead of failing
//
// The walk is depth-first over the whole tree, so links come back in the
// order they appear in the document. Duplicate links on the same page are
// kept; the visited set deduplicates them later.
// =============================================================================

use scraper::Html;

use super::resolve::{CanonicalUrl, LinkFilter};
use crate::error::CrawlError;

// Parses a response body into a document
//
// html5ever accepts any text, so the only way this fails is a body that is
// not valid UTF-8.
pub fn parse_document(page_url: &CanonicalUrl, body: &[u8]) -> Result<Html, CrawlError> {
    let text = std::str::from_utf8(body).map_err(|e| CrawlError::DocumentParse {
        url: page_url.to_string(),
        message: e.to_string(),
    })?;

    Ok(Html::parse_document(text))
}

// Walks the document depth-first and returns the href of every <a> element
pub fn collect_hrefs(document: &Html) -> Vec<&str> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_element())
        .filter(|element| element.name() == "a")
        .filter_map(|element| element.attr("href"))
        .collect()
}

/// Parses a page and returns every admissible link on it, in document order
///
/// Parameters:
///   page_url: the URL of the page (base for relative links)
///   body: the raw response body
///   filter: decides which links the crawl may follow
pub fn extract_links(
    page_url: &CanonicalUrl,
    body: &[u8],
    filter: &LinkFilter,
) -> Result<Vec<CanonicalUrl>, CrawlError> {
    let base = page_url.to_url().map_err(|e| CrawlError::DocumentParse {
        url: page_url.to_string(),
        message: format!("page URL is not a valid base: {}", e),
    })?;

    let document = parse_document(page_url, body)?;

    let links = collect_hrefs(&document)
        .into_iter()
        .filter_map(|href| filter.resolve(href, &base))
        .collect();

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn page(url: &str) -> CanonicalUrl {
        CanonicalUrl::from_url(&Url::parse(url).unwrap())
    }

    fn strings(links: Vec<CanonicalUrl>) -> Vec<String> {
        links.into_iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_extract_relative_link() {
        let html = r#"<a href="/docs">Docs</a>"#;
        let filter = LinkFilter::new(true, "example.com");
        let links = extract_links(&page("https://example.com/page"), html.as_bytes(), &filter).unwrap();
        assert_eq!(strings(links), vec!["https://example.com/docs"]);
    }

    #[test]
    fn test_links_come_back_in_document_order() {
        let html = r#"
            <html><body>
              <nav><a href="/one">1</a><div><a href="/two">2</a></div></nav>
              <p><a href="/three">3</a></p>
            </body></html>
        "#;
        let filter = LinkFilter::new(true, "example.com");
        let links = extract_links(&page("https://example.com"), html.as_bytes(), &filter).unwrap();
        assert_eq!(
            strings(links),
            vec![
                "https://example.com/one",
                "https://example.com/two",
                "https://example.com/three",
            ]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let html = r#"<a href="/a">A</a><a href="/a/">A again</a>"#;
        let filter = LinkFilter::new(true, "example.com");
        let links = extract_links(&page("https://example.com"), html.as_bytes(), &filter).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0], links[1]);
    }

    #[test]
    fn test_malformed_href_is_dropped() {
        let html = "<a href=\"not a url \x00\">bad</a><a href=\"/good\">good</a>";
        let filter = LinkFilter::new(true, "example.com");
        let links = extract_links(&page("https://example.com"), html.as_bytes(), &filter).unwrap();
        assert_eq!(strings(links), vec!["https://example.com/good"]);
    }

    #[test]
    fn test_off_site_and_mailto_links_are_dropped() {
        let html = r#"
            <a href="https://other.com/x">Other</a>
            <a href="mailto:test@example.com">Email</a>
            <a href="https://example.com/y">Y</a>
        "#;
        let filter = LinkFilter::new(true, "example.com");
        let links = extract_links(&page("https://example.com"), html.as_bytes(), &filter).unwrap();
        assert_eq!(strings(links), vec!["https://example.com/y"]);
    }

    #[test]
    fn test_anchors_without_href_are_ignored() {
        let html = r#"<a name="top">Top</a><link href="/style.css"><a href="/x">X</a>"#;
        let document = Html::parse_document(html);
        assert_eq!(collect_hrefs(&document), vec!["/x"]);
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_error() {
        let filter = LinkFilter::new(true, "example.com");
        let err = extract_links(&page("https://example.com"), &[0xff, 0xfe, 0x00], &filter).unwrap_err();
        assert!(matches!(err, CrawlError::DocumentParse { .. }));
    }
}
