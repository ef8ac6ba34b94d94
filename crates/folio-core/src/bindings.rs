//! Page effect bindings
//!
//! The declarative table of page effects. Each [`Binding`] names the event
//! category it reacts to, the elements it targets, and the [`Effect`] the
//! browser shell runs. The shell walks [`BINDINGS`] once at start-up; an
//! entry whose selector matches nothing is skipped.

/// Event category a binding reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Runs once at start-up
    Load,
    /// Element scrolls into view
    ScrollIntoView,
    /// Window scroll position
    Scroll,
    /// Pointer hover or keyboard focus
    HoverFocus,
    Click,
    /// Timer
    Interval,
}

/// What a binding does to its targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Write the current year
    YearStamp,
    /// Scroll in-page anchors smoothly to their target
    SmoothScroll,
    /// Staggered hero entrance
    HeroIntro,
    /// Fade and rise on entering the viewport
    Reveal,
    /// Timeline entries slide in one after another
    TimelineStagger,
    /// Skill rows fill their bar and count up once
    SkillBars,
    /// Rotate testimonials
    Carousel,
    /// Subtle scale and raise
    HoverLift { scale_milli: u16, raise: bool },
    /// Header sticks past the scroll offset
    StickyHeader,
    /// Mobile navigation open/close
    NavToggle,
    /// Back-to-top visibility and click
    BackToTop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub trigger: Trigger,
    pub selector: &'static str,
    pub effect: Effect,
}

impl Binding {
    const fn new(trigger: Trigger, selector: &'static str, effect: Effect) -> Self {
        Self {
            trigger,
            selector,
            effect,
        }
    }

    /// Whether the effect still has work to do when nothing animates.
    ///
    /// Static bindings put their targets in the final state; purely
    /// decorative ones are skipped.
    #[must_use]
    pub const fn runs_without_motion(&self) -> bool {
        !matches!(self.effect, Effect::HoverLift { .. })
    }
}

impl Effect {
    /// Hover scale as a float
    #[must_use]
    pub fn hover_scale(self) -> Option<f64> {
        match self {
            Self::HoverLift { scale_milli, .. } => Some(f64::from(scale_milli) / 1000.0),
            _ => None,
        }
    }
}

pub const BINDINGS: &[Binding] = &[
    Binding::new(Trigger::Load, "#year", Effect::YearStamp),
    Binding::new(Trigger::Click, r##"a[href^="#"]"##, Effect::SmoothScroll),
    Binding::new(
        Trigger::Load,
        ".badge, .headline, .tagline, .start-journey, .hero-media img",
        Effect::HeroIntro,
    ),
    Binding::new(Trigger::ScrollIntoView, ".reveal", Effect::Reveal),
    Binding::new(Trigger::ScrollIntoView, ".timeline-item", Effect::TimelineStagger),
    Binding::new(Trigger::ScrollIntoView, "#skills .skills li", Effect::SkillBars),
    Binding::new(Trigger::Interval, ".quote", Effect::Carousel),
    Binding::new(
        Trigger::HoverFocus,
        ".main-nav a, .social, a.logo",
        Effect::HoverLift {
            scale_milli: 1020,
            raise: true,
        },
    ),
    Binding::new(
        Trigger::HoverFocus,
        ".projects .card",
        Effect::HoverLift {
            scale_milli: 1010,
            raise: false,
        },
    ),
    Binding::new(Trigger::Scroll, ".site-header", Effect::StickyHeader),
    Binding::new(Trigger::Click, ".nav-toggle", Effect::NavToggle),
    Binding::new(Trigger::Scroll, "#back-to-top", Effect::BackToTop),
];

/// Hover reset duration per hover target kind
#[must_use]
pub const fn hover_duration(raise: bool) -> f64 {
    if raise { 0.18 } else { 0.2 }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_each_effect_bound_once_except_hover() {
        let mut seen = HashSet::new();
        for binding in BINDINGS {
            if matches!(binding.effect, Effect::HoverLift { .. }) {
                continue;
            }
            assert!(
                seen.insert(format!("{:?}", binding.effect)),
                "duplicate binding for {:?}",
                binding.effect
            );
        }
    }

    #[test]
    fn test_selectors_are_non_empty() {
        assert!(BINDINGS.iter().all(|b| !b.selector.trim().is_empty()));
    }

    #[test]
    fn test_hover_scales() {
        let scales: Vec<f64> = BINDINGS
            .iter()
            .filter_map(|b| b.effect.hover_scale())
            .collect();
        assert_eq!(scales.len(), 2);
        assert!(scales.iter().all(|s| *s > 1.0 && *s < 1.05));
    }

    #[test]
    fn test_static_mode_skips_decoration_only() {
        let skipped: Vec<&Binding> = BINDINGS
            .iter()
            .filter(|b| !b.runs_without_motion())
            .collect();
        assert!(skipped
            .iter()
            .all(|b| b.trigger == Trigger::HoverFocus));
    }
}
