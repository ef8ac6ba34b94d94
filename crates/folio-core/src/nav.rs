//! Navigation and scroll affordances
//!
//! Threshold checks behind the sticky header, mobile nav, back-to-top
//! button, skill bars, and testimonial rotation.

use crate::config::Timings;

pub const STUCK_CLASS: &str = "is-stuck";
pub const OPEN_CLASS: &str = "is-open";
pub const VISIBLE_CLASS: &str = "is-visible";
pub const ACTIVE_CLASS: &str = "is-active";

/// Scroll geometry sampled on scroll and resize
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_y: f64,
    pub inner_height: f64,
    pub inner_width: f64,
    /// Largest of the document and body scroll/offset heights
    pub document_height: f64,
}

impl Viewport {
    /// Header sticks once the page scrolls past the offset.
    #[must_use]
    pub fn header_stuck(&self, timings: &Timings) -> bool {
        self.scroll_y > timings.sticky_offset_px
    }

    /// The mobile nav is forced closed on wide viewports.
    #[must_use]
    pub fn should_collapse_nav(&self, timings: &Timings) -> bool {
        self.inner_width > timings.nav_desktop_min_px
    }

    /// Back-to-top shows near the bottom of the document.
    #[must_use]
    pub fn back_to_top_visible(&self, timings: &Timings) -> bool {
        self.scroll_y + self.inner_height >= self.document_height - timings.back_to_top_margin_px
    }
}

/// Element id an in-page link scrolls to; `None` for a bare `#` or a
/// non-fragment link.
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Skill level from a `data-level` attribute: leading integer, clamped to
/// `0..=100`. Unparseable levels read as zero.
#[must_use]
pub fn skill_level(raw: Option<&str>) -> u8 {
    let raw = raw.unwrap_or_default().trim();
    let (sign, digits) = raw
        .strip_prefix('-')
        .map_or((1_i64, raw), |rest| (-1_i64, rest));
    let digits: String = digits.chars().take_while(char::is_ascii_digit).collect();

    digits
        .parse::<i64>()
        .map(|value| (sign * value).clamp(0, 100))
        .ok()
        .and_then(|value| u8::try_from(value).ok())
        .unwrap_or_default()
}

/// Counter text for a skill bar.
#[must_use]
pub fn percent_label(value: f64) -> String {
    format!("{}%", value.clamp(0.0, 100.0).round())
}

/// Testimonial shown after `current`, wrapping around.
#[must_use]
pub const fn next_quote(current: usize, count: usize) -> usize {
    if count == 0 { 0 } else { (current + 1) % count }
}

/// Only rotate when there is something to rotate to.
#[must_use]
pub const fn carousel_enabled(count: usize) -> bool {
    count > 1
}
