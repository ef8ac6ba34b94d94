//! Browser image preloading
//!
//! Backs [`folio_core::ImageCache`] with detached `<img>` elements. Each load
//! reports its outcome back to the cache through load and error listeners.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_core::{ImageCache, ImageLoader};
use tracing::{debug, warn};
use web_sys::HtmlImageElement;

use crate::dom::{self, Listener};
use crate::error::describe;

/// Keeps a preload alive until the page goes away
pub struct Preload {
    image: Option<HtmlImageElement>,
    _listeners: Vec<Listener>,
}

impl std::fmt::Debug for Preload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preload")
            .field("src", &self.image.as_ref().map(HtmlImageElement::src))
            .finish_non_exhaustive()
    }
}

/// Page-wide preload cache
pub type SharedImageCache = Rc<RefCell<ImageCache<Preload>>>;

#[must_use]
pub fn shared_cache() -> SharedImageCache {
    Rc::new(RefCell::new(ImageCache::new()))
}

/// Starts loads with detached image elements
pub struct BrowserImageLoader {
    cache: Weak<RefCell<ImageCache<Preload>>>,
}

impl BrowserImageLoader {
    #[must_use]
    pub fn new(cache: &SharedImageCache) -> Self {
        Self {
            cache: Rc::downgrade(cache),
        }
    }

    fn settle_listener(&self, image: &HtmlImageElement, event: &'static str, url: &str) -> Option<Listener> {
        let cache = self.cache.clone();
        let url = url.to_string();
        let loaded = event == "load";
        Listener::new(image, event, move |_| {
            if let Some(cache) = cache.upgrade() {
                if let Ok(mut cache) = cache.try_borrow_mut() {
                    cache.settle(&url, loaded);
                    debug!(url = %url, loaded, "preload settled");
                }
            }
        })
        .map_err(|error| warn!(%error, event, "preload listener failed"))
        .ok()
    }
}

impl ImageLoader for BrowserImageLoader {
    type Handle = Preload;

    fn begin(&self, url: &str) -> Preload {
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(error) => {
                warn!(url, error = %describe(&error), "could not create preload image");
                return Preload {
                    image: None,
                    _listeners: Vec::new(),
                };
            }
        };

        image.set_decoding("async");
        dom::set_attr(&image, "loading", "lazy");
        image.set_referrer_policy("no-referrer");

        let listeners = ["load", "error"]
            .into_iter()
            .filter_map(|event| self.settle_listener(&image, event, url))
            .collect();

        image.set_src(url);
        Preload {
            image: Some(image),
            _listeners: listeners,
        }
    }
}

/// Warm the cache for `url`; known and empty URLs are ignored.
pub fn warm(cache: &SharedImageCache, url: &str) {
    let loader = BrowserImageLoader::new(cache);
    match cache.try_borrow_mut() {
        Ok(mut cache) => {
            cache.ensure_preloaded(url, &loader);
        }
        Err(_) => debug!(url, "image cache busy, skipping preload"),
    }
}
