//! Page-lifetime image preload cache
//!
//! Keyed by URL. The first encounter of a URL starts exactly one load through
//! an [`ImageLoader`]; the entry is settled once when that load finishes and
//! is never evicted. The modal does not wait on it; preloading only warms the
//! browser's own cache.

use std::collections::HashMap;

use tracing::debug;

/// Starts out-of-band image loads
pub trait ImageLoader {
    /// Whatever must stay alive for the load to complete
    type Handle;

    /// Begin loading `url`. Completion is reported back through
    /// [`ImageCache::settle`].
    fn begin(&self, url: &str) -> Self::Handle;
}

/// Load state of a cached image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug, Clone)]
pub struct CacheEntry<H> {
    pub state: LoadState,
    pub handle: H,
}

/// Append-only map from image URL to its load state
#[derive(Debug, Clone)]
pub struct ImageCache<H> {
    entries: HashMap<String, CacheEntry<H>>,
}

impl<H> Default for ImageCache<H> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<H> ImageCache<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load for `url` unless it is empty or already known.
    ///
    /// Returns `true` when a new load was started.
    pub fn ensure_preloaded<L>(&mut self, url: &str, loader: &L) -> bool
    where
        L: ImageLoader<Handle = H>,
    {
        if url.is_empty() || self.entries.contains_key(url) {
            return false;
        }

        debug!(url, "preloading image");
        let handle = loader.begin(url);
        self.entries.insert(
            url.to_string(),
            CacheEntry {
                state: LoadState::Pending,
                handle,
            },
        );
        true
    }

    /// Record the terminal state of a pending load.
    ///
    /// Returns `false` if the URL is unknown or already settled.
    pub fn settle(&mut self, url: &str, loaded: bool) -> bool {
        match self.entries.get_mut(url) {
            Some(entry) if entry.state == LoadState::Pending => {
                entry.state = if loaded {
                    LoadState::Loaded
                } else {
                    LoadState::Failed
                };
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn state(&self, url: &str) -> Option<LoadState> {
        self.entries.get(url).map(|entry| entry.state)
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct CountingLoader {
        started: RefCell<Vec<String>>,
    }

    impl ImageLoader for CountingLoader {
        type Handle = usize;

        fn begin(&self, url: &str) -> usize {
            let mut started = self.started.borrow_mut();
            started.push(url.to_string());
            started.len()
        }
    }

    #[test]
    fn test_same_url_loads_once() {
        let loader = CountingLoader::default();
        let mut cache = ImageCache::new();

        assert!(cache.ensure_preloaded("https://img/x.png", &loader));
        assert!(!cache.ensure_preloaded("https://img/x.png", &loader));

        assert_eq!(loader.started.borrow().len(), 1);
        assert_eq!(cache.state("https://img/x.png"), Some(LoadState::Pending));
    }

    #[test]
    fn test_empty_url_is_ignored() {
        let loader = CountingLoader::default();
        let mut cache = ImageCache::new();
        assert!(!cache.ensure_preloaded("", &loader));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_settles_once() {
        let loader = CountingLoader::default();
        let mut cache = ImageCache::new();
        cache.ensure_preloaded("a", &loader);

        assert!(cache.settle("a", true));
        assert!(!cache.settle("a", false));
        assert_eq!(cache.state("a"), Some(LoadState::Loaded));
    }

    #[test]
    fn test_failed_load_stays_cached() {
        let loader = CountingLoader::default();
        let mut cache = ImageCache::new();
        cache.ensure_preloaded("broken", &loader);
        cache.settle("broken", false);

        assert!(!cache.ensure_preloaded("broken", &loader));
        assert_eq!(cache.state("broken"), Some(LoadState::Failed));
        assert_eq!(loader.started.borrow().len(), 1);
    }

    #[test]
    fn test_settle_unknown_url() {
        let mut cache: ImageCache<()> = ImageCache::new();
        assert!(!cache.settle("nope", true));
        assert!(!cache.contains("nope"));
    }
}
