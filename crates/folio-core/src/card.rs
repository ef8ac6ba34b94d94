//! Project card construction
//!
//! Pure construction from a [`Repository`] to the [`CardView`] the browser
//! shell turns into DOM. The view embeds the serialized [`ProjectRecord`],
//! so nothing downstream needs the repository again.

use itertools::Itertools;
use url::Url;

use crate::config::SiteConfig;
use crate::error::Result;
use crate::record::{Link, ProjectRecord};
use crate::repo::Repository;

/// Visible description length on a card, in characters
pub const DESCRIPTION_EXCERPT_CHARS: usize = 140;

/// Tech list length when built from primary language and topics only
pub const BASIC_TECH_LIMIT: usize = 6;

/// Social preview image for a repository.
#[must_use]
pub fn preview_image_url(owner: &str, name: &str) -> String {
    format!("https://opengraph.githubassets.com/1/{owner}/{name}")
}

/// Absolute `http`/`https` URL check used for repository homepages.
#[must_use]
pub fn is_http_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

/// Live-demo URL in priority order: override table, homepage, pages
/// hosting, else absent.
#[must_use]
pub fn resolve_demo(repo: &Repository, config: &SiteConfig) -> Link {
    let owner = repo.owner.login.as_str();

    config
        .demo_override(owner, &repo.name)
        .or_else(|| {
            repo.homepage
                .as_deref()
                .filter(|homepage| is_http_url(homepage))
                .map(str::to_string)
        })
        .or_else(|| {
            repo.has_pages
                .then(|| format!("https://{owner}.github.io/{}/", repo.name))
        })
        .map_or(Link::Absent, |url| Link::from_raw(&url))
}

/// Primary language followed by topics, deduplicated, capped at `limit`.
#[must_use]
pub fn basic_technologies(repo: &Repository, limit: usize) -> Vec<String> {
    repo.language
        .iter()
        .chain(repo.topics.iter())
        .filter(|tech| !tech.is_empty())
        .unique()
        .take(limit)
        .cloned()
        .collect()
}

/// The override list when it has entries, otherwise the basic list.
#[must_use]
pub fn technologies(repo: &Repository, tech_override: Option<&[String]>) -> Vec<String> {
    let overridden: Vec<String> = tech_override
        .unwrap_or_default()
        .iter()
        .filter(|tech| !tech.is_empty())
        .unique()
        .cloned()
        .collect();

    if overridden.is_empty() {
        basic_technologies(repo, BASIC_TECH_LIMIT)
    } else {
        overridden
    }
}

/// Normalized record for a repository.
#[must_use]
pub fn project_record(
    repo: &Repository,
    tech_override: Option<&[String]>,
    config: &SiteConfig,
) -> ProjectRecord {
    ProjectRecord::new(repo.name.clone())
        .with_description(repo.description.clone().unwrap_or_default())
        .with_image(preview_image_url(&repo.owner.login, &repo.name))
        .with_technologies(technologies(repo, tech_override))
        .with_demo(resolve_demo(repo, config))
        .with_code(Link::from_raw(&repo.html_url))
}

/// Shorten `text` to at most `max_chars` characters, ending in an ellipsis
/// when anything was cut.
#[must_use]
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let kept: String = trimmed.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Everything needed to render one project card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub record: ProjectRecord,
    pub image_alt: String,
    pub excerpt: String,
    /// Serialized record for the `data-project` attribute
    pub data_attribute: String,
}

impl CardView {
    /// Build a view from a record.
    ///
    /// # Errors
    ///
    /// Returns `Error::RecordEncodeFailed` if the record cannot be serialized.
    pub fn from_record(record: ProjectRecord) -> Result<Self> {
        let data_attribute = record.to_attribute()?;
        Ok(Self {
            image_alt: format!("{} preview", record.title),
            excerpt: excerpt(&record.description, DESCRIPTION_EXCERPT_CHARS),
            data_attribute,
            record,
        })
    }

    /// Build a view straight from a repository.
    ///
    /// # Errors
    ///
    /// Returns `Error::RecordEncodeFailed` if the record cannot be serialized.
    pub fn from_repository(
        repo: &Repository,
        tech_override: Option<&[String]>,
        config: &SiteConfig,
    ) -> Result<Self> {
        Self::from_record(project_record(repo, tech_override, config))
    }
}
