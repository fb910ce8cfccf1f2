// src/links/mod.rs
// =============================================================================
// Everything to do with links found on a page.
//
// Submodules:
// - resolve: turns an href into a canonical absolute URL, or drops it
// - html: parses a page and walks it for <a href> values
// =============================================================================

mod html;
mod resolve;

pub use html::extract_links;
pub use resolve::{host_of, CanonicalUrl, LinkFilter};
