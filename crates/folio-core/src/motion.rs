//! Animation plans
//!
//! Every animation on the page is described here as data: a [`Tween`] is one
//! property transition, a [`Timeline`] is an ordered list of named [`Step`]s
//! with declared duration, easing, stagger and position. The browser shell
//! feeds these to the animation engine when it is present, and applies the
//! end states directly as inline styles when it is not.
//!
//! Property names and vars serialize to the engine's camelCase keys.

use serde::Serialize;

pub const POWER2_OUT: &str = "power2.out";
pub const POWER2_IN: &str = "power2.in";
pub const POWER2_IN_OUT: &str = "power2.inOut";
pub const POWER3_OUT: &str = "power3.out";

/// Whether effects animate or snap to their end state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPolicy {
    Animated,
    /// No engine, or the user asked for reduced motion
    Static,
}

impl MotionPolicy {
    #[must_use]
    pub const fn resolve(engine_available: bool, reduced_motion: bool) -> Self {
        if engine_available && !reduced_motion {
            Self::Animated
        } else {
            Self::Static
        }
    }

    #[must_use]
    pub const fn is_animated(self) -> bool {
        matches!(self, Self::Animated)
    }
}

/// Vertical offset in pixels or as a CSS expression such as `15%`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Offset {
    Px(f64),
    Css(&'static str),
}

impl Offset {
    fn css(&self) -> String {
        match self {
            Self::Px(px) => format!("{px}px"),
            Self::Css(expr) => (*expr).to_string(),
        }
    }
}

/// Animatable properties
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Props {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Opacity that also toggles `visibility: hidden` at zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Offset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Numeric field of a plain counter object, not an element
    #[serde(rename = "v", skip_serializing_if = "Option::is_none")]
    pub counter: Option<f64>,
}

impl Props {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    #[must_use]
    pub const fn auto_alpha(mut self, value: f64) -> Self {
        self.auto_alpha = Some(value);
        self
    }

    #[must_use]
    pub const fn x(mut self, px: f64) -> Self {
        self.x = Some(px);
        self
    }

    #[must_use]
    pub fn y(mut self, px: f64) -> Self {
        self.y = Some(Offset::Px(px));
        self
    }

    #[must_use]
    pub fn y_css(mut self, expr: &'static str) -> Self {
        self.y = Some(Offset::Css(expr));
        self
    }

    #[must_use]
    pub const fn scale(mut self, value: f64) -> Self {
        self.scale = Some(value);
        self
    }

    #[must_use]
    pub const fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }

    #[must_use]
    pub fn width(mut self, css: impl Into<String>) -> Self {
        self.width = Some(css.into());
        self
    }

    #[must_use]
    pub const fn counter(mut self, value: f64) -> Self {
        self.counter = Some(value);
        self
    }

    /// CSS declarations equivalent to this end state.
    #[must_use]
    pub fn inline_styles(&self) -> Vec<(&'static str, String)> {
        let mut styles = Vec::new();

        if let Some(opacity) = self.opacity {
            styles.push(("opacity", opacity.to_string()));
        }
        if let Some(alpha) = self.auto_alpha {
            styles.push(("opacity", alpha.to_string()));
            let visibility = if alpha <= 0.0 { "hidden" } else { "inherit" };
            styles.push(("visibility", visibility.to_string()));
        }

        let mut transform = Vec::new();
        if self.x.is_some() || self.y.is_some() {
            let x = self.x.unwrap_or_default();
            let y = self.y.as_ref().map_or_else(|| "0px".to_string(), Offset::css);
            transform.push(format!("translate({x}px, {y})"));
        }
        if let Some(scale) = self.scale {
            transform.push(format!("scale({scale})"));
        }
        if let Some(rotate) = self.rotate {
            transform.push(format!("rotate({rotate}deg)"));
        }
        if !transform.is_empty() {
            styles.push(("transform", transform.join(" ")));
        }

        if let Some(width) = &self.width {
            styles.push(("width", width.clone()));
        }
        styles
    }
}

/// Per-target delay for tweens over several elements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stagger {
    pub each: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<&'static str>,
}

impl Stagger {
    #[must_use]
    pub const fn each(each: f64) -> Self {
        Self { each, from: None }
    }

    #[must_use]
    pub const fn from_end(each: f64) -> Self {
        Self {
            each,
            from: Some("end"),
        }
    }
}

/// One property transition with its timing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tween {
    #[serde(flatten)]
    pub props: Props,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagger: Option<Stagger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_props: Option<&'static str>,
}

impl Tween {
    #[must_use]
    pub fn to(props: Props) -> Self {
        Self {
            props,
            ..Self::default()
        }
    }

    /// Remove every inline style the engine set.
    #[must_use]
    pub fn clear_all() -> Self {
        Self {
            clear_props: Some("all"),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    #[must_use]
    pub const fn delay(mut self, seconds: f64) -> Self {
        self.delay = Some(seconds);
        self
    }

    #[must_use]
    pub const fn ease(mut self, ease: &'static str) -> Self {
        self.ease = Some(ease);
        self
    }

    #[must_use]
    pub const fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = Some(stagger);
        self
    }

    /// Time from start to the last target finishing, for `targets` elements.
    #[must_use]
    pub fn span(&self, targets: usize) -> f64 {
        let base = self.duration.unwrap_or_default();
        let stagger = self.stagger.as_ref().map_or(0.0, |s| s.each);
        let extra = u32::try_from(targets.saturating_sub(1)).unwrap_or(u32::MAX);
        self.delay.unwrap_or_default() + base + stagger * f64::from(extra)
    }
}

/// Scroll-position trigger attached to a tween
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollCue {
    pub start: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle_actions: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub once: bool,
}

impl ScrollCue {
    #[must_use]
    pub const fn at(start: &'static str) -> Self {
        Self {
            start,
            toggle_actions: None,
            once: false,
        }
    }
}

/// How a step animates its target
#[derive(Debug, Clone, PartialEq)]
pub enum StepKind {
    /// From the current state to the tween's props
    To,
    /// From the tween's props to the current state
    From,
    /// From the given props to the tween's props
    FromTo(Props),
    /// Apply instantly
    Set,
}

/// Where a step starts relative to the steps before it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// After everything added so far
    Sequence,
    /// Together with the previous step
    WithPrevious,
    /// Relative to the end of everything added so far
    Offset(f64),
}

impl Position {
    /// Position parameter in the engine's syntax.
    #[must_use]
    pub fn as_engine_param(self) -> Option<String> {
        match self {
            Self::Sequence => None,
            Self::WithPrevious => Some("<".to_string()),
            Self::Offset(seconds) if seconds < 0.0 => Some(format!("-={}", -seconds)),
            Self::Offset(seconds) => Some(format!("+={seconds}")),
        }
    }
}

/// One named step of a timeline
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Named part the shell resolves to elements
    pub part: &'static str,
    pub kind: StepKind,
    pub tween: Tween,
    pub position: Position,
}

/// Ordered animation sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub name: &'static str,
    /// Default ease for steps without their own
    pub ease: &'static str,
    pub steps: Vec<Step>,
}

impl Timeline {
    /// Start and end time of every step, given how many elements each part
    /// resolves to.
    #[must_use]
    pub fn schedule(&self, targets: impl Fn(&str) -> usize) -> Vec<(f64, f64)> {
        let mut slots: Vec<(f64, f64)> = Vec::with_capacity(self.steps.len());
        let mut end_of_timeline: f64 = 0.0;

        for step in &self.steps {
            let start = match step.position {
                Position::Sequence => end_of_timeline,
                Position::WithPrevious => slots.last().map_or(0.0, |slot| slot.0),
                Position::Offset(seconds) => (end_of_timeline + seconds).max(0.0),
            };
            let span = match step.kind {
                StepKind::Set => 0.0,
                _ => step.tween.span(targets(step.part)),
            };
            let end = start + span;
            end_of_timeline = end_of_timeline.max(end);
            slots.push((start, end));
        }
        slots
    }

    /// Total running time.
    #[must_use]
    pub fn duration(&self, targets: impl Fn(&str) -> usize) -> f64 {
        self.schedule(targets)
            .into_iter()
            .fold(0.0, |acc, (_, end)| acc.max(end))
    }
}

/// Named parts of the project modal
pub mod parts {
    pub const OVERLAY: &str = "overlay";
    pub const DIALOG: &str = "dialog";
    pub const BODY_CHILDREN: &str = "body-children";
}

/// Overlay fades in while the dialog scales up, then the body children
/// fade in one after another.
#[must_use]
pub fn modal_entrance() -> Timeline {
    Timeline {
        name: "modal-entrance",
        ease: POWER2_OUT,
        steps: vec![
            Step {
                part: parts::OVERLAY,
                kind: StepKind::FromTo(Props::new().opacity(0.0)),
                tween: Tween::to(Props::new().opacity(1.0)).duration(0.25),
                position: Position::Sequence,
            },
            Step {
                part: parts::DIALOG,
                kind: StepKind::FromTo(Props::new().opacity(0.0).scale(0.96).y_css("15%")),
                tween: Tween::to(Props::new().opacity(1.0).scale(1.0).y(0.0)).duration(0.35),
                position: Position::WithPrevious,
            },
            Step {
                part: parts::BODY_CHILDREN,
                kind: StepKind::From,
                tween: Tween::to(Props::new().y(8.0).opacity(0.0))
                    .stagger(Stagger::each(0.06))
                    .duration(0.28),
                position: Position::Offset(-0.1),
            },
        ],
    }
}

/// Reverse of the entrance; inline styles are cleared at the end.
#[must_use]
pub fn modal_exit() -> Timeline {
    Timeline {
        name: "modal-exit",
        ease: POWER2_IN_OUT,
        steps: vec![
            Step {
                part: parts::BODY_CHILDREN,
                kind: StepKind::To,
                tween: Tween::to(Props::new().y(-8.0).opacity(0.0))
                    .stagger(Stagger::from_end(0.05))
                    .duration(0.2),
                position: Position::Sequence,
            },
            Step {
                part: parts::DIALOG,
                kind: StepKind::To,
                tween: Tween::to(Props::new().opacity(0.0).y(-12.0).scale(0.98)).duration(0.25),
                position: Position::WithPrevious,
            },
            Step {
                part: parts::OVERLAY,
                kind: StepKind::To,
                tween: Tween::to(Props::new().opacity(0.0)).duration(0.25),
                position: Position::WithPrevious,
            },
            Step {
                part: parts::DIALOG,
                kind: StepKind::Set,
                tween: Tween::clear_all(),
                position: Position::Sequence,
            },
            Step {
                part: parts::OVERLAY,
                kind: StepKind::Set,
                tween: Tween::clear_all(),
                position: Position::Sequence,
            },
            Step {
                part: parts::BODY_CHILDREN,
                kind: StepKind::Set,
                tween: Tween::clear_all(),
                position: Position::Sequence,
            },
        ],
    }
}

/// Hero entrance: selector, starting props, and the tween to the rest state
#[must_use]
pub fn hero_intro() -> Vec<(&'static str, Props, Tween)> {
    let rise = || Props::new().y(14.0).opacity(0.0);
    let rest = || Props::new().y(0.0).opacity(1.0);

    vec![
        (".badge", rise(), Tween::to(rest()).duration(0.8).ease(POWER3_OUT)),
        (
            ".headline",
            rise(),
            Tween::to(rest()).duration(1.05).delay(0.08).ease(POWER3_OUT),
        ),
        (
            ".tagline",
            rise(),
            Tween::to(rest()).duration(1.05).delay(0.18).ease(POWER3_OUT),
        ),
        (
            ".start-journey",
            rise(),
            Tween::to(rest()).duration(1.05).delay(0.26).ease(POWER3_OUT),
        ),
        (
            ".hero-media img",
            Props::new().y(18.0).opacity(0.0).scale(0.985),
            Tween::to(Props::new().y(0.0).opacity(1.0).scale(1.0))
                .duration(1.15)
                .delay(0.22)
                .ease(POWER3_OUT),
        ),
    ]
}

/// Generic `.reveal` element entering the viewport
#[must_use]
pub fn reveal() -> (Tween, ScrollCue) {
    (
        Tween::to(Props::new().opacity(1.0).y(0.0)).duration(0.8).ease(POWER2_OUT),
        ScrollCue {
            start: "top 76%",
            toggle_actions: Some("play none none reverse"),
            once: false,
        },
    )
}

/// Feed card inserted after load
#[must_use]
pub fn card_reveal() -> (Tween, ScrollCue) {
    (
        Tween::to(Props::new().opacity(1.0).y(0.0)).duration(0.6).ease(POWER2_OUT),
        ScrollCue::at("top 86%"),
    )
}

/// Rest state of a revealed element when nothing animates
#[must_use]
pub fn revealed() -> Props {
    Props::new().opacity(1.0)
}

/// Timeline entry content sliding in, staggered by position
#[must_use]
pub fn timeline_item(index: usize) -> (Tween, ScrollCue) {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    (
        Tween::to(Props::new().x(20.0).opacity(0.0))
            .duration(0.6)
            .delay(f64::from(index) * 0.1),
        ScrollCue::at("top 80%"),
    )
}

/// Skill row entrance, bar fill, and counter
#[must_use]
pub fn skill_bar(level: u8) -> (Tween, Tween, Tween) {
    let level = f64::from(level);
    (
        Tween::to(Props::new().y(16.0).opacity(0.0).scale(0.985))
            .duration(0.6)
            .ease(POWER2_OUT),
        Tween::to(Props::new().width(format!("{level}%")))
            .duration(1.1)
            .delay(0.15)
            .ease(POWER2_OUT),
        Tween::to(Props::new().counter(level))
            .duration(1.1)
            .delay(0.15)
            .ease(POWER2_OUT),
    )
}

/// Trigger for a skill row; fires once
#[must_use]
pub const fn skill_cue() -> ScrollCue {
    ScrollCue {
        start: "top 85%",
        toggle_actions: None,
        once: true,
    }
}

/// Contact status message: hidden state, show, and auto-hide
#[must_use]
pub fn status_hidden() -> Props {
    Props::new().auto_alpha(0.0).y(6.0)
}

#[must_use]
pub fn status_show() -> Tween {
    Tween::to(Props::new().auto_alpha(1.0).y(0.0)).duration(0.25).ease(POWER2_OUT)
}

#[must_use]
pub fn status_hide() -> Tween {
    Tween::to(Props::new().auto_alpha(0.0).y(-4.0)).duration(0.3).ease(POWER2_IN_OUT)
}

/// Header sliding in as it sticks
#[must_use]
pub fn header_stick() -> (Props, Tween) {
    (
        Props::new().y(-60.0),
        Tween::to(Props::new().y(0.0)).duration(0.25).ease(POWER2_OUT),
    )
}

#[must_use]
pub fn header_unstick() -> Tween {
    Tween::to(Props::new().y(0.0)).duration(0.2).ease(POWER2_OUT)
}

/// Hover or focus lift, and its reset
#[must_use]
pub fn hover_lift(scale: f64, raise: bool, duration: f64) -> (Tween, Tween) {
    let lifted = if raise {
        Props::new().y(-1.0).scale(scale)
    } else {
        Props::new().scale(scale)
    };
    let rest = if raise {
        Props::new().y(0.0).scale(1.0)
    } else {
        Props::new().scale(1.0)
    };
    (
        Tween::to(lifted).duration(duration).ease(POWER2_OUT),
        Tween::to(rest).duration(duration).ease(POWER2_OUT),
    )
}

/// Modal close control: hover in, hover out, press, fade, reset
#[must_use]
pub fn close_control() -> [Tween; 5] {
    [
        Tween::to(Props::new().rotate(15.0).scale(1.05)).duration(0.18).ease(POWER2_OUT),
        Tween::to(Props::new().rotate(0.0).scale(1.0)).duration(0.18).ease(POWER2_OUT),
        Tween::to(Props::new().scale(0.9)).duration(0.12).ease(POWER2_IN),
        Tween::to(Props::new().auto_alpha(0.0)).duration(0.12).ease(POWER2_OUT),
        Tween {
            props: Props::new().auto_alpha(1.0).scale(1.0).rotate(0.0),
            clear_props: Some("all"),
            ..Tween::default()
        },
    ]
}

/// Testimonial quote fading in and out
#[must_use]
pub fn quote_in() -> Tween {
    Tween::to(Props::new().auto_alpha(1.0).y(0.0)).duration(0.6)
}

#[must_use]
pub fn quote_out() -> Tween {
    Tween::to(Props::new().auto_alpha(0.0).y(-10.0)).duration(0.6)
}
