// src/sitemap.rs
// =============================================================================
// Writes the final sitemap: every visited URL, sorted, one per line.
//
// The file is created or truncated, so a previous run's output never leaks
// into this one. There is no header and nothing after the last URL except
// its newline.
// =============================================================================

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::CrawlError;
use crate::links::CanonicalUrl;

/// Sorts `urls` byte-wise and writes them to `path`
///
/// Returns how many lines were written.
pub fn write_sitemap(path: &Path, mut urls: Vec<CanonicalUrl>) -> Result<usize, CrawlError> {
    urls.sort();

    let io_error = |source| CrawlError::OutputIo {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);

    for url in &urls {
        writeln!(writer, "{}", url).map_err(io_error)?;
    }

    writer.flush().map_err(io_error)?;

    Ok(urls.len())
}
