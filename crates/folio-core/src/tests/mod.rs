//! Behavioral tests for the page runtime
//!
//! BDD-style tests using the given-when-then naming convention. They drive
//! the public operations the browser shell calls, not module internals.

mod card_behaviors;
mod feed_behaviors;
mod modal_behaviors;
