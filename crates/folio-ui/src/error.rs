//! Error types for the browser shell
//!
//! Every DOM, JS, and network failure is converted into [`UiError`] at the
//! boundary. Event handlers log these and carry on; nothing here panics.

use wasm_bindgen::{JsCast, JsValue};

/// Errors that can occur while driving the page
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    /// Not running in a browser window
    #[error("window is not available")]
    WindowNotAvailable,

    #[error("document is not available")]
    DocumentNotAvailable,

    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// Element exists but is not the expected interface
    #[error("element {0} has an unexpected type")]
    WrongElementType(String),

    /// A JS call threw or returned something unusable
    #[error("javascript error: {0}")]
    Js(String),

    #[error("http request failed: {0}")]
    Http(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Core(#[from] folio_core::Error),
}

impl UiError {
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        Self::ElementNotFound(selector.into())
    }

    pub fn wrong_element_type(selector: impl Into<String>) -> Self {
        Self::WrongElementType(selector.into())
    }
}

/// Human-readable text for a thrown JS value.
#[must_use]
pub fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|error| String::from(error.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        Self::Js(describe(&value))
    }
}

impl From<gloo_net::Error> for UiError {
    fn from(error: gloo_net::Error) -> Self {
        Self::Http(error.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for UiError {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Result type alias for browser shell operations
pub type Result<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = UiError::element_not_found("#project-modal");
        assert_eq!(error.to_string(), "element not found: #project-modal");

        let error = UiError::Http("timeout".to_string());
        assert_eq!(error.to_string(), "http request failed: timeout");
    }

    #[test]
    fn test_core_errors_pass_through() {
        let error = UiError::from(folio_core::Error::NoEligibleRepositories);
        assert_eq!(error.to_string(), "no eligible repositories to show");
    }

    #[test]
    fn test_result_type() {
        let failure: Result<()> = Err(UiError::WindowNotAvailable);
        assert!(failure.is_err());
    }
}
