//! Project modal lifecycle
//!
//! The state machine, content model, and keyboard rules of the single
//! project-detail dialog, independent of the DOM. The browser shell owns
//! one [`ModalMachine`] parameterized by its node and focus handle types.
//!
//! ```text
//! Closed --open--> Opening --entrance done--> Open
//!    ^                |  ^                      |
//!    |                |  +--------open----------+  (repopulate in place)
//!    |              close                     close
//!    |                v                         v
//!    +--exit done-- Closing <-------------------+
//!                     |
//!                     +--open--> Opening (pending exit is superseded)
//! ```
//!
//! Every transition bumps a generation counter. Animation completions carry
//! the generation they were started with, so a superseded completion is
//! ignored instead of tearing down a dialog that was re-opened.

use tracing::debug;

use crate::record::{Link, ProjectRecord};

/// Elements that take part in the Tab cycle inside the dialog
pub const FOCUSABLE_SELECTOR: &str =
    r#"a[href], button:not([disabled]), textarea, input, select, [tabindex]:not([tabindex="-1"])"#;

pub const DEMO_LABEL: &str = "Live Demo";
pub const CODE_LABEL: &str = "Source Code";
pub const IMAGE_ALT_FALLBACK: &str = "Project preview";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Where the dialog lived before it was moved to the top level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor<N> {
    pub parent: N,
    pub next_sibling: Option<N>,
}

/// State captured when the dialog opens and consumed when it closes
#[derive(Debug, Clone, PartialEq)]
pub struct ModalSession<N, F> {
    /// `None` when the dialog already lived at the top level
    pub anchor: Option<Anchor<N>>,
    pub scroll_lock_offset: f64,
    pub previously_focused: Option<F>,
}

/// Where to reinsert the dialog on close
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restore<N> {
    Before { parent: N, sibling: N },
    Append { parent: N },
    /// Nothing recorded; leave the dialog where it is
    Stay,
}

impl<N: Clone, F> ModalSession<N, F> {
    /// Reinsert before the recorded sibling while it is still a child of the
    /// recorded parent, else append to the parent.
    pub fn restore_point(&self, is_child_of: impl Fn(&N, &N) -> bool) -> Restore<N> {
        match &self.anchor {
            None => Restore::Stay,
            Some(Anchor {
                parent,
                next_sibling: Some(sibling),
            }) if is_child_of(sibling, parent) => Restore::Before {
                parent: parent.clone(),
                sibling: sibling.clone(),
            },
            Some(Anchor { parent, .. }) => Restore::Append {
                parent: parent.clone(),
            },
        }
    }
}

/// What a call to [`ModalMachine::open`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A new session started; the shell locks scroll and relocates the dialog
    Fresh { generation: u64 },
    /// Already opening or open; content and entrance reset in place
    Refreshed { generation: u64 },
    /// A pending close was superseded
    Resumed { generation: u64 },
}

impl OpenOutcome {
    #[must_use]
    pub const fn generation(self) -> u64 {
        match self {
            Self::Fresh { generation }
            | Self::Refreshed { generation }
            | Self::Resumed { generation } => generation,
        }
    }

    #[must_use]
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh { .. })
    }
}

/// Single-dialog lifecycle
#[derive(Debug)]
pub struct ModalMachine<N, F> {
    phase: ModalPhase,
    session: Option<ModalSession<N, F>>,
    generation: u64,
}

impl<N, F> Default for ModalMachine<N, F> {
    fn default() -> Self {
        Self {
            phase: ModalPhase::Closed,
            session: None,
            generation: 0,
        }
    }
}

impl<N, F> ModalMachine<N, F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> ModalPhase {
        self.phase
    }

    /// Opening or open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.phase, ModalPhase::Opening | ModalPhase::Open)
    }

    #[must_use]
    pub const fn session(&self) -> Option<&ModalSession<N, F>> {
        self.session.as_ref()
    }

    /// Begin opening. `capture` runs only when no session exists yet.
    pub fn open(&mut self, capture: impl FnOnce() -> ModalSession<N, F>) -> OpenOutcome {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let previous = self.phase;
        self.phase = ModalPhase::Opening;

        let outcome = match previous {
            ModalPhase::Closed => {
                self.session = Some(capture());
                OpenOutcome::Fresh { generation }
            }
            ModalPhase::Opening | ModalPhase::Open => OpenOutcome::Refreshed { generation },
            ModalPhase::Closing => OpenOutcome::Resumed { generation },
        };
        debug!(?previous, ?outcome, "modal open");
        outcome
    }

    /// Entrance finished. Returns `false` for a stale generation.
    pub fn entrance_finished(&mut self, generation: u64) -> bool {
        if self.phase == ModalPhase::Opening && self.generation == generation {
            self.phase = ModalPhase::Open;
            true
        } else {
            false
        }
    }

    /// Begin closing. Returns the generation of the exit, or `None` when
    /// there is nothing to close.
    pub fn close(&mut self) -> Option<u64> {
        if !self.is_open() {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.phase = ModalPhase::Closing;
        debug!(generation = self.generation, "modal close");
        Some(self.generation)
    }

    /// Exit finished. Hands back the session to undo, or `None` for a
    /// stale generation.
    pub fn exit_finished(&mut self, generation: u64) -> Option<ModalSession<N, F>> {
        if self.phase == ModalPhase::Closing && self.generation == generation {
            self.phase = ModalPhase::Closed;
            self.session.take()
        } else {
            None
        }
    }
}

/// One action control in the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalAction {
    pub label: &'static str,
    pub link: Link,
}

impl ModalAction {
    /// Absent links render as disabled, non-navigable controls.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.link.is_absent()
    }
}

/// Everything the dialog displays for one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    pub title: String,
    pub description: String,
    /// `None` hides the image
    pub image: Option<String>,
    pub image_alt: String,
    pub chips: Vec<String>,
    pub actions: [ModalAction; 2],
}

impl ModalContent {
    #[must_use]
    pub fn from_record(record: &ProjectRecord) -> Self {
        let image_alt = if record.title.is_empty() {
            IMAGE_ALT_FALLBACK.to_string()
        } else {
            record.title.clone()
        };

        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            image: Some(record.image_url.clone()).filter(|url| !url.is_empty()),
            image_alt,
            chips: record
                .technologies
                .iter()
                .filter(|chip| !chip.is_empty())
                .cloned()
                .collect(),
            actions: [
                ModalAction {
                    label: DEMO_LABEL,
                    link: record.demo.clone(),
                },
                ModalAction {
                    label: CODE_LABEL,
                    link: record.code.clone(),
                },
            ],
        }
    }
}

/// What a key press means while the dialog is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    Close,
    CycleFocus { backwards: bool },
    Ignore,
}

#[must_use]
pub fn key_intent(key: &str, shift: bool) -> KeyIntent {
    match key {
        "Escape" => KeyIntent::Close,
        "Tab" => KeyIntent::CycleFocus { backwards: shift },
        _ => KeyIntent::Ignore,
    }
}

/// Focus wrap target for a Tab press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusJump {
    ToFirst,
    ToLast,
}

/// Wrap focus at the ends of the focusable list; `None` lets the browser
/// move focus normally.
///
/// `active` is the index of the focused element within the list, if it is
/// in the list at all.
#[must_use]
pub fn focus_jump(active: Option<usize>, count: usize, backwards: bool) -> Option<FocusJump> {
    let last = count.checked_sub(1)?;
    match (active, backwards) {
        (Some(0), true) => Some(FocusJump::ToLast),
        (Some(i), false) if i == last => Some(FocusJump::ToFirst),
        _ => None,
    }
}

/// Whether the spinner is needed for an image in this state.
#[must_use]
pub const fn image_needs_spinner(complete: bool, natural_width: u32) -> bool {
    !(complete && natural_width > 0)
}

/// Scroll offset to return to on close: the magnitude of the body's
/// locked `top` when it parses, else the recorded offset.
#[must_use]
pub fn scroll_restore_offset(body_top: &str, recorded: f64) -> f64 {
    let trimmed = body_top.trim();
    let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
    let number = unsigned.strip_suffix("px").unwrap_or(unsigned).trim();

    match number.parse::<f64>() {
        Ok(px) if px.is_finite() && px > 0.0 => px,
        _ => recorded,
    }
}

/// Inline `top` that pins the body at `offset`.
#[must_use]
pub fn scroll_lock_top(offset: f64) -> String {
    format!("-{offset}px")
}
