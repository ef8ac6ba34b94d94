//! Site configuration
//!
//! Every value has a compiled-in default. The page may embed a JSON object
//! to override any subset of fields; unknown keys are ignored.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::error::{Error, Result};

/// GitHub account whose public repositories fill the project grid.
pub const DEFAULT_GITHUB_USER: &str = "Hossam-Mahmoud293";
/// Repository always pinned to the first grid slot.
pub const DEFAULT_FEATURED_REPO: &str = "Bondi";
/// Number of cards rendered from the feed.
pub const DEFAULT_PROJECT_LIMIT: usize = 6;
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://formspree.io/f/xnnlqewj";

/// Delays and thresholds used by the page effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Delay before the modal image spinner becomes visible
    pub spinner_delay_ms: u32,
    /// How long a contact status message stays visible
    pub status_hide_ms: u32,
    /// Scroll offset past which the header sticks
    pub sticky_offset_px: f64,
    /// Viewport width above which the mobile nav is forced closed
    pub nav_desktop_min_px: f64,
    /// Distance from the document bottom that reveals the back-to-top button
    pub back_to_top_margin_px: f64,
    /// Interval between testimonial switches
    pub carousel_interval_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            spinner_delay_ms: 300,
            status_hide_ms: 4000,
            sticky_offset_px: 80.0,
            nav_desktop_min_px: 1000.0,
            back_to_top_margin_px: 200.0,
            carousel_interval_ms: 3200,
        }
    }
}

/// Page-wide configuration, passed by reference to every component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub github_user: String,
    pub featured_repo: String,
    pub project_limit: usize,
    pub api_base: String,
    pub relay_endpoint: String,
    /// Live-demo URLs keyed by exact repository name. `{owner}` is replaced
    /// with the repository owner's login.
    pub demo_overrides: BTreeMap<String, String>,
    pub log_level: String,
    pub timings: Timings,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut demo_overrides = BTreeMap::new();
        demo_overrides.insert(
            DEFAULT_FEATURED_REPO.to_string(),
            "https://{owner}.github.io/Bondi/".to_string(),
        );

        Self {
            github_user: DEFAULT_GITHUB_USER.to_string(),
            featured_repo: DEFAULT_FEATURED_REPO.to_string(),
            project_limit: DEFAULT_PROJECT_LIMIT,
            api_base: DEFAULT_API_BASE.to_string(),
            relay_endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            demo_overrides,
            log_level: "info".to_string(),
            timings: Timings::default(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate an embedded JSON override.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the JSON is malformed or a field
    /// fails validation.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str::<Self>(raw)
            .map_err(|e| Error::invalid_config("<root>", e.to_string()))
            .and_then(Self::validated)
    }

    /// Check field invariants.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming the first offending field.
    pub fn validated(self) -> Result<Self> {
        if self.project_limit == 0 {
            return Err(Error::invalid_config("project_limit", "must be at least 1"));
        }
        require_http_url("api_base", &self.api_base)?;
        require_http_url("relay_endpoint", &self.relay_endpoint)?;
        LevelFilter::from_str(&self.log_level)
            .map_err(|e| Error::invalid_config("log_level", e.to_string()))?;
        Ok(self)
    }

    /// Maximum tracing level; unparseable levels fall back to `INFO`.
    #[must_use]
    pub fn max_level(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::INFO)
    }

    /// `GET` endpoint listing the user's repositories, most recently updated first.
    #[must_use]
    pub fn listing_url(&self) -> String {
        format!(
            "{}/users/{}/repos?sort=updated&per_page=100",
            self.api_base.trim_end_matches('/'),
            self.github_user
        )
    }

    /// `GET` endpoint with the byte count per language of one repository.
    #[must_use]
    pub fn languages_url(&self, owner: &str, name: &str) -> String {
        format!(
            "{}/repos/{owner}/{name}/languages",
            self.api_base.trim_end_matches('/')
        )
    }

    /// Live-demo override for a repository, with the owner substituted.
    #[must_use]
    pub fn demo_override(&self, owner: &str, name: &str) -> Option<String> {
        self.demo_overrides
            .get(name)
            .map(|template| template.replace("{owner}", owner))
    }
}

fn require_http_url(field: &str, value: &str) -> Result<()> {
    Url::parse(value)
        .map_err(|e| Error::invalid_config(field, e.to_string()))
        .and_then(|url| match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::invalid_config(
                field,
                format!("unsupported scheme '{other}'"),
            )),
        })
}
