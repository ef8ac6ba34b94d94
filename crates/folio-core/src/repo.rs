//! Repository records from the hosting API

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default, deserialize_with = "null_as_default")]
    pub login: String,
}

/// The subset of a repository listing entry the page uses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: Owner,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_pages: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub html_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stargazers_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fork: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub archived: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disabled: bool,
}

impl Repository {
    /// Creates a repository with a name and owner
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: Owner {
                login: owner.into(),
            },
            ..Self::default()
        }
    }

    /// Builder pattern: set star count
    #[must_use]
    pub const fn with_stars(mut self, stars: u64) -> Self {
        self.stargazers_count = stars;
        self
    }

    /// Builder pattern: set primary language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builder pattern: set topics
    #[must_use]
    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Publicly listable: not a fork, not archived, not disabled.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        !self.fork && !self.archived && !self.disabled
    }

    /// Case-insensitive name match.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Decode the body of the repository listing endpoint.
///
/// # Errors
///
/// Returns `Error::ListingDecodeFailed` if the body is not a JSON array of
/// repository objects.
pub fn parse_listing(body: &str) -> Result<Vec<Repository>> {
    serde_json::from_str(body).map_err(|e| Error::listing_decode_failed(e.to_string()))
}

/// Bytes of source per language for one repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageBreakdown(BTreeMap<String, u64>);

impl LanguageBreakdown {
    /// Decode the body of the languages endpoint.
    ///
    /// # Errors
    ///
    /// Returns `Error::LanguagesDecodeFailed` if the body is not a map of
    /// language name to byte count.
    pub fn parse(repo: &str, body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::languages_decode_failed(repo, e.to_string()))
    }

    /// Language names by descending byte count; equal counts stay in name order.
    #[must_use]
    pub fn ranked(&self) -> Vec<String> {
        let mut entries: Vec<(&String, &u64)> = self.0.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1));
        entries.into_iter().map(|(name, _)| name.clone()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for LanguageBreakdown {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
