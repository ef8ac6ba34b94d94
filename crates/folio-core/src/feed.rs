//! Project feed pipeline
//!
//! Pure half of the feed loader: filter, prioritize, and limit the listing,
//! then merge language lookups into card views. The browser shell performs
//! the requests and hands the outcomes to these functions.
//!
//! # Ordering
//!
//! The listing arrives most-recently-updated first. [`select_repositories`]
//! re-sorts it with a stable sort: the featured repository first, the rest
//! by descending star count. Equal star counts therefore keep the recency
//! order of the source.

use std::cmp::Reverse;

use itertools::Itertools;
use tracing::{debug, warn};

use crate::card::{self, CardView};
use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::repo::{LanguageBreakdown, Repository};

/// Shown in place of cards when the listing is unusable
pub const PLACEHOLDER_MESSAGE: &str = "No projects available right now. Please check back later.";

/// Tech list length when the language breakdown is available
pub const RICH_TECH_LIMIT: usize = 8;

/// Outcome of the per-repository languages request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageLookup {
    /// The request succeeded and the body decoded
    Fetched(LanguageBreakdown),
    /// The server answered with a non-success status
    Rejected { status: u16 },
    /// Transport or decode failure
    Failed { reason: String },
}

/// Filter, prioritize, and limit the raw listing.
///
/// # Errors
///
/// Returns `Error::NoEligibleRepositories` when nothing survives filtering.
pub fn select_repositories(
    repos: Vec<Repository>,
    featured: &str,
    limit: usize,
) -> Result<Vec<Repository>> {
    let total = repos.len();
    let picked: Vec<Repository> = repos
        .into_iter()
        .filter(Repository::is_eligible)
        .sorted_by_key(|repo| (!repo.is_named(featured), Reverse(repo.stargazers_count)))
        .take(limit)
        .collect();

    debug!(total, picked = picked.len(), "selected repositories");

    if picked.is_empty() {
        Err(Error::NoEligibleRepositories)
    } else {
        Ok(picked)
    }
}

/// Ordered, deduplicated tech list from ranked languages, the primary
/// language, and topics.
#[must_use]
pub fn merge_technologies(ranked_languages: &[String], repo: &Repository, limit: usize) -> Vec<String> {
    ranked_languages
        .iter()
        .chain(repo.language.iter())
        .chain(repo.topics.iter())
        .filter(|tech| !tech.is_empty())
        .unique()
        .take(limit)
        .cloned()
        .collect()
}

/// Tech list for one repository given its languages lookup.
///
/// A rejected request counts as an empty breakdown; a failed one degrades
/// to the shorter primary-language-and-topics list.
#[must_use]
pub fn technologies_for(repo: &Repository, lookup: &LanguageLookup) -> Vec<String> {
    match lookup {
        LanguageLookup::Fetched(breakdown) => {
            merge_technologies(&breakdown.ranked(), repo, RICH_TECH_LIMIT)
        }
        LanguageLookup::Rejected { status } => {
            debug!(repo = %repo.name, status, "languages request rejected");
            merge_technologies(&[], repo, RICH_TECH_LIMIT)
        }
        LanguageLookup::Failed { reason } => {
            warn!(repo = %repo.name, %reason, "languages lookup failed, using basic tech list");
            card::basic_technologies(repo, card::BASIC_TECH_LIMIT)
        }
    }
}

/// Pair each picked repository with its lookup, in priority order.
///
/// `lookups` must be in the same order as `picked`; a missing lookup is
/// treated as failed.
///
/// # Errors
///
/// Returns `Error::RecordEncodeFailed` if any card record cannot be
/// serialized.
pub fn assemble_cards(
    picked: &[Repository],
    lookups: &[LanguageLookup],
    config: &SiteConfig,
) -> Result<Vec<CardView>> {
    let missing = LanguageLookup::Failed {
        reason: "no lookup result".to_string(),
    };

    picked
        .iter()
        .enumerate()
        .map(|(i, repo)| {
            let lookup = lookups.get(i).unwrap_or(&missing);
            let tech = technologies_for(repo, lookup);
            CardView::from_repository(repo, Some(&tech), config)
        })
        .collect()
}
