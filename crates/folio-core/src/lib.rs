//! Folio core - DOM-free logic of the portfolio page runtime
//!
//! Everything here runs and tests on the host. The `folio-ui` crate wraps
//! these types in browser glue.
//!
//! ## Module Structure
//! - `config`: Site configuration with defaults and validation
//! - `error`: Error types and handling
//! - `repo`: Repository listing and language breakdown decoding
//! - `record`: Normalized project record and its two-tier decode
//! - `card`: Repository to card view construction
//! - `feed`: Selection, ordering, and tech-list merging for the project grid
//! - `image_cache`: Page-lifetime image preload cache
//! - `modal`: Project modal state machine, content, and keyboard rules
//! - `contact`: Contact form validation and relay payload
//! - `motion`: Animation plans as data
//! - `nav`: Navigation and scroll thresholds
//! - `bindings`: Declarative table of page effects

#![forbid(unsafe_code)]

pub mod bindings;
pub mod card;
pub mod config;
pub mod contact;
pub mod error;
pub mod feed;
pub mod image_cache;
pub mod modal;
pub mod motion;
pub mod nav;
pub mod record;
pub mod repo;

pub use card::CardView;
pub use config::SiteConfig;
pub use error::{Error, Result};
pub use feed::{LanguageLookup, PLACEHOLDER_MESSAGE};
pub use image_cache::{ImageCache, ImageLoader, LoadState};
pub use modal::{ModalContent, ModalMachine, ModalPhase, ModalSession, OpenOutcome};
pub use record::{Link, ProjectRecord};
pub use repo::{LanguageBreakdown, Repository};

#[cfg(test)]
mod tests;
