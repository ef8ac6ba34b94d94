//! Folio UI - browser shell of the portfolio page
//!
//! Wraps `folio-core` in DOM, network, and animation glue compiled to WASM.
//!
//! ## Module Structure
//! - `app`: Page context and start-up
//! - `animator`: Animation engine bridge with a static fallback
//! - `card`: Project card rendering and binding
//! - `contact`: Contact form submission and status feedback
//! - `dom`: Element lookups, style helpers, and listener handles
//! - `effects`: Installs the page effect bindings
//! - `error`: Error types and handling
//! - `feed`: Project grid loader
//! - `image_loader`: Image preloading behind the core cache
//! - `logging`: Console subscriber for `tracing`
//! - `modal`: Project dialog controller

#![forbid(unsafe_code)]

pub mod animator;
pub mod app;
pub mod card;
pub mod contact;
pub mod dom;
pub mod effects;
pub mod error;
pub mod feed;
pub mod image_loader;
pub mod logging;
pub mod modal;

pub use app::{Page, boot};
pub use error::{Result, UiError};

#[cfg(all(test, target_arch = "wasm32"))]
mod tests;
