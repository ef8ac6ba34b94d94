//! Core error types for portfolio operations.
//!
//! All errors are explicit, typed, and recoverable - no panics allowed.
//! Every variant has a user-facing recovery path in the browser shell
//! (placeholder grid, degraded tech list, fallback record).

use thiserror::Error;

/// Core error type for portfolio operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // Project feed
    #[error("repository listing request failed: {reason}")]
    ListingRequestFailed { reason: String },

    #[error("repository listing returned status {status}")]
    ListingStatus { status: u16 },

    #[error("failed to decode repository listing: {reason}")]
    ListingDecodeFailed { reason: String },

    #[error("no eligible repositories to show")]
    NoEligibleRepositories,

    #[error("failed to decode languages for '{repo}': {reason}")]
    LanguagesDecodeFailed { repo: String, reason: String },

    // Card data
    #[error("failed to decode project record: {reason}")]
    RecordDecodeFailed { reason: String },

    #[error("failed to encode project record: {reason}")]
    RecordEncodeFailed { reason: String },

    // Configuration
    #[error("invalid config field '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl Error {
    /// Create a listing transport error.
    pub fn listing_request_failed(reason: impl Into<String>) -> Self {
        Self::ListingRequestFailed {
            reason: reason.into(),
        }
    }

    /// Create a listing decode error.
    pub fn listing_decode_failed(reason: impl Into<String>) -> Self {
        Self::ListingDecodeFailed {
            reason: reason.into(),
        }
    }

    /// Create a languages decode error.
    pub fn languages_decode_failed(repo: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LanguagesDecodeFailed {
            repo: repo.into(),
            reason: reason.into(),
        }
    }

    /// Create a record decode error.
    pub fn record_decode_failed(reason: impl Into<String>) -> Self {
        Self::RecordDecodeFailed {
            reason: reason.into(),
        }
    }

    /// Create an invalid config error.
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error means the project grid should show its placeholder.
    #[must_use]
    pub const fn is_listing_failure(&self) -> bool {
        matches!(
            self,
            Self::ListingRequestFailed { .. }
                | Self::ListingStatus { .. }
                | Self::ListingDecodeFailed { .. }
                | Self::NoEligibleRepositories
        )
    }
}

/// Result type alias for portfolio operations.
pub type Result<T> = std::result::Result<T, Error>;
