//! Project grid loader
//!
//! Fetches the repository listing, looks up languages for the picked
//! repositories concurrently, and replaces the grid with cards. Any failure
//! of the listing leaves the placeholder message in the grid instead.

use std::rc::Rc;

use folio_core::feed::{self, LanguageLookup};
use folio_core::repo::{self, LanguageBreakdown, Repository};
use folio_core::{Error, SiteConfig, motion};
use futures::future::join_all;
use gloo_net::http::Request;
use tracing::{debug, info, warn};
use web_sys::Element;

use crate::app::Page;
use crate::card;
use crate::dom;
use crate::error::Result;

pub const GRID_SELECTOR: &str = ".projects .grid";

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

async fn fetch_listing(config: &SiteConfig) -> folio_core::Result<Vec<Repository>> {
    let response = Request::get(&config.listing_url())
        .header("Accept", GITHUB_ACCEPT)
        .send()
        .await
        .map_err(|e| Error::listing_request_failed(e.to_string()))?;

    if !response.ok() {
        return Err(Error::ListingStatus {
            status: response.status(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| Error::listing_request_failed(e.to_string()))?;
    repo::parse_listing(&body)
}

async fn fetch_languages(config: &SiteConfig, repo: &Repository) -> LanguageLookup {
    let url = config.languages_url(&repo.owner.login, &repo.name);
    let response = match Request::get(&url).header("Accept", GITHUB_ACCEPT).send().await {
        Ok(response) => response,
        Err(error) => {
            return LanguageLookup::Failed {
                reason: error.to_string(),
            };
        }
    };

    if !response.ok() {
        return LanguageLookup::Rejected {
            status: response.status(),
        };
    }

    match response.text().await {
        Ok(body) => LanguageBreakdown::parse(&repo.name, &body).map_or_else(
            |error| LanguageLookup::Failed {
                reason: error.to_string(),
            },
            LanguageLookup::Fetched,
        ),
        Err(error) => LanguageLookup::Failed {
            reason: error.to_string(),
        },
    }
}

/// Listing, selection, and language lookups, as card views.
async fn fetch_cards(config: &SiteConfig) -> folio_core::Result<Vec<folio_core::CardView>> {
    let listing = fetch_listing(config).await?;
    let picked = feed::select_repositories(listing, &config.featured_repo, config.project_limit)?;

    let lookups = join_all(picked.iter().map(|repo| fetch_languages(config, repo))).await;
    feed::assemble_cards(&picked, &lookups, config)
}

/// Replace the grid contents with the placeholder message.
///
/// # Errors
///
/// Returns an error if the message element cannot be created.
pub fn show_placeholder(grid: &Element, message: &str) -> Result<()> {
    let document = dom::document()?;
    grid.set_inner_html("");
    let placeholder = document.create_element("div")?;
    placeholder.set_class_name("projects-empty");
    dom::set_attr(&placeholder, "role", "status");
    dom::set_attr(&placeholder, "aria-live", "polite");
    placeholder.set_text_content(Some(message));
    grid.append_child(&placeholder)?;
    Ok(())
}

fn show_cards(grid: &Element, views: &[folio_core::CardView], page: &Rc<Page>) -> Result<()> {
    let document = dom::document()?;
    grid.set_inner_html("");

    let (tween, cue) = motion::card_reveal();
    for view in views {
        let element = card::render(&document, view)?;
        grid.append_child(&element)?;
        card::bind(&element, page)?;
        crate::effects::lift_card(&page.animator, &element);
        if let Err(error) = page
            .animator
            .on_scroll(&element, &element, &motion::StepKind::To, &tween, &cue)
        {
            debug!(%error, "card reveal failed");
        }
    }
    Ok(())
}

/// Populate the project grid. Does nothing when the page has no grid or no
/// account is configured.
pub async fn load(page: Rc<Page>) {
    let Some(grid) = dom::query(GRID_SELECTOR) else {
        debug!("no project grid on page");
        return;
    };
    if page.config.github_user.trim().is_empty() {
        debug!("no account configured, keeping authored cards");
        return;
    }

    let shown = match fetch_cards(&page.config).await {
        Ok(views) => {
            info!(cards = views.len(), "project feed loaded");
            show_cards(&grid, &views, &page)
        }
        Err(error) => {
            if error.is_listing_failure() {
                warn!(%error, "project feed unavailable");
            } else {
                warn!(%error, "project feed produced no cards");
            }
            show_placeholder(&grid, feed::PLACEHOLDER_MESSAGE)
        }
    };

    if let Err(error) = shown {
        warn!(%error, "could not update project grid");
        if let Err(error) = show_placeholder(&grid, feed::PLACEHOLDER_MESSAGE) {
            warn!(%error, "placeholder failed");
        }
    }
}
