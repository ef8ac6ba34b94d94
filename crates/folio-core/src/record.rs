//! Project record model
//!
//! A [`ProjectRecord`] is the normalized shape every card carries and the
//! modal displays. It travels as JSON on the card's `data-project`
//! attribute, so the modal never needs the repository it came from.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};

/// Serialized form of an absent link
pub const ABSENT_LINK: &str = "#";

/// Link target of a modal action
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Link {
    /// No URL available; rendered as a disabled control
    #[default]
    Absent,
    /// Navigable URL
    Url(String),
}

impl Link {
    /// Empty text and the `#` marker both mean absent.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() || raw == ABSENT_LINK {
            Self::Absent
        } else {
            Self::Url(raw.to_string())
        }
    }

    #[must_use]
    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Url(url) => Some(url),
        }
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.href().unwrap_or(ABSENT_LINK)
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(|raw| Self::from_raw(&raw))
    }
}

/// Normalized project data shown on a card and in the modal
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(rename = "image")]
    pub image_url: String,
    #[serde(rename = "tech")]
    pub technologies: Vec<String>,
    pub demo: Link,
    pub code: Link,
}

impl ProjectRecord {
    /// Creates a record with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Builder pattern: set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder pattern: set image URL
    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Builder pattern: set technologies
    #[must_use]
    pub fn with_technologies<I, S>(mut self, technologies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.technologies = technologies.into_iter().map(Into::into).collect();
        self
    }

    /// Builder pattern: set demo link
    #[must_use]
    pub fn with_demo(mut self, demo: Link) -> Self {
        self.demo = demo;
        self
    }

    /// Builder pattern: set code link
    #[must_use]
    pub fn with_code(mut self, code: Link) -> Self {
        self.code = code;
        self
    }

    /// Coerce an arbitrary JSON value into a record.
    ///
    /// Non-string fields become empty text, a non-array `tech` becomes an
    /// empty list, and chips that are not non-empty strings are dropped.
    /// A non-object value yields the empty record.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let technologies = value
            .get("tech")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|chip| !chip.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            title: text("title"),
            description: text("desc"),
            image_url: text("image"),
            technologies,
            demo: Link::from_raw(&text("demo")),
            code: Link::from_raw(&text("code")),
        }
    }

    /// Serialize for the card's `data-project` attribute.
    ///
    /// # Errors
    ///
    /// Returns `Error::RecordEncodeFailed` if serialization fails.
    pub fn to_attribute(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::RecordEncodeFailed {
            reason: e.to_string(),
        })
    }
}

/// Text visible on a card, used when its embedded data is unusable
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardText {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

impl CardText {
    /// Minimal record from the visible card text; links are absent.
    #[must_use]
    pub fn into_record(self) -> ProjectRecord {
        ProjectRecord::new(self.title.trim())
            .with_description(self.description.trim())
            .with_image(self.image_url)
    }
}

/// Structured decode of a raw `data-project` attribute.
///
/// # Errors
///
/// Returns `Error::RecordDecodeFailed` when the attribute is missing or is
/// not valid JSON.
pub fn parse_attribute(raw: Option<&str>) -> Result<ProjectRecord> {
    let raw = raw.ok_or_else(|| Error::record_decode_failed("attribute missing"))?;
    serde_json::from_str::<Value>(raw)
        .map(|value| ProjectRecord::from_value(&value))
        .map_err(|e| Error::record_decode_failed(e.to_string()))
}

/// Two-tier decode: the embedded attribute when usable, otherwise a record
/// rebuilt from the visible card text.
///
/// `scrape` is only invoked on the fallback path.
pub fn decode_card(raw: Option<&str>, scrape: impl FnOnce() -> CardText) -> ProjectRecord {
    parse_attribute(raw).unwrap_or_else(|error| {
        warn!(%error, "falling back to visible card text");
        scrape().into_record()
    })
}
