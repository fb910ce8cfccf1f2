// src/crawl/visited.rs
// =============================================================================
// The set of URLs the crawl has claimed.
//
// try_insert is the single point that decides which task gets to fetch a
// URL. The check and the insert happen under one lock, so two tasks racing
// on the same URL can never both win. That is also what stops a cycle in
// the link graph from recursing forever.
// =============================================================================

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::links::CanonicalUrl;

/// Concurrency-safe set of visited URLs, shared by every crawl task
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<CanonicalUrl>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url` for the caller
    ///
    /// Returns true if this call inserted it, false if some task already had.
    pub fn try_insert(&self, url: &CanonicalUrl) -> bool {
        let mut urls = self.lock();
        // Checked first only so a URL that's already claimed isn't cloned
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.clone());
        true
    }

    /// Every URL inserted so far, each exactly once, in no particular order
    pub fn snapshot(&self) -> Vec<CanonicalUrl> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // A task that panicked while holding the lock can't have left the set
    // half-updated (HashSet::insert is the only mutation), so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashSet<CanonicalUrl>> {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use url::Url;

    fn canonical(url: &str) -> CanonicalUrl {
        CanonicalUrl::from_url(&Url::parse(url).unwrap())
    }

    #[test]
    fn test_first_insert_wins() {
        let visited = VisitedSet::new();
        let url = canonical("https://example.com/a");
        assert!(visited.try_insert(&url));
        assert!(!visited.try_insert(&url));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_trailing_slash_variants_collide() {
        let visited = VisitedSet::new();
        assert!(visited.try_insert(&canonical("https://example.com/a/")));
        assert!(!visited.try_insert(&canonical("https://example.com/a")));
    }

    #[test]
    fn test_snapshot_has_every_url_once() {
        let visited = VisitedSet::new();
        for url in ["https://e.com/b", "https://e.com/a", "https://e.com/b"] {
            visited.try_insert(&canonical(url));
        }
        let mut urls = visited.snapshot();
        urls.sort();
        assert_eq!(urls, vec![canonical("https://e.com/a"), canonical("https://e.com/b")]);
    }

    #[test]
    fn test_racing_inserts_have_one_winner() {
        let visited = Arc::new(VisitedSet::new());
        let url = canonical("https://example.com/contended");

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let visited = Arc::clone(&visited);
                let url = url.clone();
                std::thread::spawn(move || visited.try_insert(&url))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(visited.len(), 1);
    }
}
