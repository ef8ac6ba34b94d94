//! Page start-up
//!
//! Builds the [`Page`] context every component shares and installs the
//! components in order: effects, authored cards, contact form, then the
//! asynchronous project feed.

use std::rc::Rc;

use folio_core::SiteConfig;
use tracing::{error, info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::animator::Animator;
use crate::error::Result;
use crate::image_loader::{self, SharedImageCache};
use crate::modal::ModalController;
use crate::{card, contact, dom, effects, feed, logging};

/// Inline JSON that overrides the built-in site configuration
pub const CONFIG_SCRIPT_SELECTOR: &str = "script#folio-config";

/// Shared page context
pub struct Page {
    pub config: SiteConfig,
    pub animator: Animator,
    pub images: SharedImageCache,
    /// `None` on pages without the project dialog
    pub modal: Option<ModalController>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("config", &self.config)
            .field("animator", &self.animator)
            .field("modal", &self.modal)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Detect the animation engine and mount the dialog.
    ///
    /// # Errors
    ///
    /// Returns an error outside a browser window.
    pub fn new(config: SiteConfig) -> Result<Rc<Self>> {
        let window = dom::window()?;
        let animator = Animator::detect(&window);
        let modal = ModalController::mount(animator.clone(), config.timings.spinner_delay_ms);

        Ok(Rc::new(Self {
            config,
            animator,
            images: image_loader::shared_cache(),
            modal,
        }))
    }

    /// Install every component.
    pub fn run(page: &Rc<Self>) {
        effects::install(page);
        card::bind_all(page);
        if let Err(error) = contact::mount(page) {
            warn!(%error, "contact form unavailable");
        }
        spawn_local(feed::load(Rc::clone(page)));
    }
}

/// Site configuration, with the inline override applied when present. A
/// rejected override is returned alongside the defaults.
#[must_use]
pub fn read_config() -> (SiteConfig, Option<folio_core::Error>) {
    let Some(raw) = dom::query(CONFIG_SCRIPT_SELECTOR).and_then(|script| script.text_content()) else {
        return (SiteConfig::default(), None);
    };
    match SiteConfig::from_json(&raw) {
        Ok(config) => (config, None),
        Err(error) => (SiteConfig::default(), Some(error)),
    }
}

fn start() {
    let (config, rejected) = read_config();
    logging::init(config.max_level());
    if let Some(error) = rejected {
        warn!(%error, "config override ignored, using defaults");
    }

    match Page::new(config) {
        Ok(page) => {
            info!(
                user = %page.config.github_user,
                policy = ?page.animator.policy(),
                modal = page.modal.is_some(),
                "folio starting"
            );
            Page::run(&page);
        }
        Err(error) => error!(%error, "page failed to start"),
    }
}

/// Start once the document is parsed.
pub fn boot() {
    let document = match dom::document() {
        Ok(document) => document,
        Err(error) => {
            web_sys::console::error_1(&error.to_string().into());
            return;
        }
    };

    if document.ready_state() != "loading" {
        start();
        return;
    }
    if let Err(error) = dom::on(&document, "DOMContentLoaded", |_| start()) {
        web_sys::console::error_1(&error.to_string().into());
    }
}
