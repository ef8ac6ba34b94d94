//! Project modal controller
//!
//! Browser half of [`folio_core::ModalMachine`]: fills the dialog, moves it to
//! the top level, locks page scroll, traps focus, and plays the entrance and
//! exit timelines. Completion callbacks carry the generation they were
//! started with so a superseded animation cannot close or reopen anything.
//!
//! Page-lifetime listeners (overlay, close control, keyboard) are bound once
//! in [`ModalController::mount`] and check the machine's phase on each event.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_core::modal::{
    self as rules, Anchor, FocusJump, KeyIntent, ModalContent, ModalMachine, ModalSession, Restore,
};
use folio_core::motion::{self, Props, Tween, parts};
use folio_core::ProjectRecord;
use gloo_timers::callback::Timeout;
use tracing::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, HtmlElement, HtmlImageElement, KeyboardEvent, Node};

use crate::animator::Animator;
use crate::dom::{self, Listener};
use crate::error::Result;

pub const MODAL_SELECTOR: &str = "#project-modal";

const SCROLL_LOCK_PROPERTIES: [&str; 5] = ["position", "top", "left", "right", "width"];

/// Elements of the dialog, looked up once
#[derive(Debug, Clone)]
struct Parts {
    root: Element,
    dialog: Option<Element>,
    overlay: Option<Element>,
    body: Option<Element>,
    title: Option<Element>,
    description: Option<Element>,
    image: Option<HtmlImageElement>,
    close: Option<Element>,
}

impl Parts {
    fn locate(root: Element) -> Self {
        Self {
            dialog: dom::query_in(&root, ".dialog"),
            overlay: dom::query_in(&root, ".overlay"),
            body: dom::query_in(&root, ".modal-body"),
            title: dom::query_in(&root, ".modal-title"),
            description: dom::query_in(&root, ".modal-desc"),
            image: dom::query_as::<HtmlImageElement>(&root, ".modal-image").ok(),
            close: dom::query_in(&root, ".close"),
            root,
        }
    }

    fn body_children(&self) -> Vec<Element> {
        self.body.as_ref().map(dom::children).unwrap_or_default()
    }

    /// Elements behind a named timeline part
    fn resolve(&self, part: &str) -> Vec<Element> {
        match part {
            parts::OVERLAY => self.overlay.iter().cloned().collect(),
            parts::DIALOG => self.dialog.iter().cloned().collect(),
            parts::BODY_CHILDREN => self.body_children(),
            _ => Vec::new(),
        }
    }
}

#[derive(Default)]
struct State {
    machine: ModalMachine<Node, Element>,
    /// Timeline currently driving the dialog
    running: Option<JsValue>,
    spinner_timer: Option<Timeout>,
    image_listeners: Vec<Listener>,
}

struct Inner {
    parts: Parts,
    animator: Animator,
    spinner_delay_ms: u32,
    state: RefCell<State>,
}

/// Handle to the page's single project dialog
#[derive(Clone)]
pub struct ModalController {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for ModalController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = self.inner.state.try_borrow().map(|state| state.machine.phase()).ok();
        f.debug_struct("ModalController").field("phase", &phase).finish()
    }
}

impl ModalController {
    /// Find the dialog and bind its page-lifetime listeners. Returns `None`
    /// when the page has no dialog.
    #[must_use]
    pub fn mount(animator: Animator, spinner_delay_ms: u32) -> Option<Self> {
        let root = dom::query(MODAL_SELECTOR)?;
        let controller = Self {
            inner: Rc::new(Inner {
                parts: Parts::locate(root),
                animator,
                spinner_delay_ms,
                state: RefCell::new(State::default()),
            }),
        };

        if let Err(error) = controller.bind() {
            warn!(%error, "modal listeners incomplete");
        }
        info!("project modal ready");
        Some(controller)
    }

    fn downgrade(&self) -> Weak<Inner> {
        Rc::downgrade(&self.inner)
    }

    fn upgrade(weak: &Weak<Inner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner
            .state
            .try_borrow()
            .is_ok_and(|state| state.machine.is_open())
    }

    fn bind(&self) -> Result<()> {
        let parts = &self.inner.parts;

        let weak = self.downgrade();
        dom::on(&parts.root, "click", move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if target.has_attribute("data-close") || dom::has_class(&target, "overlay") {
                if let Some(modal) = Self::upgrade(&weak) {
                    modal.close();
                }
            }
        })?;

        let weak = self.downgrade();
        dom::on(dom::window()?.as_ref(), "keydown", move |event: Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Some(modal) = Self::upgrade(&weak) else {
                return;
            };
            if !modal.is_open() {
                return;
            }
            match rules::key_intent(&key.key(), key.shift_key()) {
                KeyIntent::Close => modal.close(),
                KeyIntent::CycleFocus { backwards } => modal.trap_focus(&event, backwards),
                KeyIntent::Ignore => {}
            }
        })?;

        if let Some(close) = parts.close.clone() {
            self.bind_close_control(&close)?;
        }
        Ok(())
    }

    /// Hover tilt and a press-then-fade before closing
    fn bind_close_control(&self, close: &Element) -> Result<()> {
        let [hover_in, hover_out, press, fade, _] = motion::close_control();

        for (event, tween) in [("mouseenter", hover_in), ("mouseleave", hover_out)] {
            let weak = self.downgrade();
            let target = close.clone();
            dom::on(close, event, move |_| {
                if let Some(modal) = Self::upgrade(&weak).filter(Self::is_open) {
                    if let Err(error) = modal.inner.animator.to(std::slice::from_ref(&target), &tween) {
                        debug!(%error, "close hover failed");
                    }
                }
            })?;
        }

        let weak = self.downgrade();
        let target = close.clone();
        dom::on(close, "click", move |event: Event| {
            event.prevent_default();
            event.stop_propagation();
            let Some(modal) = Self::upgrade(&weak).filter(Self::is_open) else {
                return;
            };
            let animator = modal.inner.animator.clone();
            if !animator.is_animated() {
                modal.close();
                return;
            }

            let pressed = target.clone();
            let fade = fade.clone();
            let fader = animator.clone();
            let then = move || {
                if let Err(error) = fader.to(std::slice::from_ref(&pressed), &fade) {
                    debug!(%error, "close fade failed");
                }
                modal.close();
            };
            if let Err(error) = animator.to_then(std::slice::from_ref(&target), &press, then) {
                warn!(%error, "close press failed");
            }
        })
    }

    /// Fill the dialog from `record` and open it.
    ///
    /// Opening while already open refreshes the content in place; opening
    /// during the exit animation cancels the exit.
    pub fn open(&self, record: &ProjectRecord) {
        let content = ModalContent::from_record(record);
        if let Err(error) = self.render(&content) {
            warn!(%error, "modal content incomplete");
        }

        let Ok(body) = dom::body() else {
            warn!("no document body, modal not opened");
            return;
        };
        let root = self.inner.parts.root.clone();
        let focused = dom::document().ok().and_then(|doc| doc.active_element());

        let (outcome, lock_offset) = {
            let Ok(mut state) = self.inner.state.try_borrow_mut() else {
                debug!("modal busy, open ignored");
                return;
            };
            if let Some(handle) = state.running.take() {
                Animator::kill(&handle);
            }
            let outcome = state.machine.open(|| capture_session(&root, &body, focused));
            let offset = state.machine.session().map_or(0.0, |s| s.scroll_lock_offset);
            (outcome, offset)
        };

        if outcome.is_fresh() {
            let body_node: &Node = &body;
            if root.parent_node().as_ref() != Some(body_node) {
                if let Err(error) = body.append_child(&root) {
                    warn!(error = %crate::error::describe(&error), "could not relocate modal");
                }
            }
            lock_scroll(&body, lock_offset);
        }

        dom::set_attr(&root, "open", "");
        dom::set_attr(&root, "aria-hidden", "false");
        dom::set_attr(&root, "aria-modal", "true");

        let animator = &self.inner.animator;
        animator.disable_scroll_triggers();

        let settle = Tween {
            props: Props::new().opacity(1.0).y(0.0).auto_alpha(1.0),
            clear_props: Some("all"),
            ..Tween::default()
        };
        if let Err(error) = animator.set(&self.inner.parts.body_children(), &settle) {
            debug!(%error, "body reset failed");
        }
        if let Some(dialog) = &self.inner.parts.dialog {
            dialog.set_scroll_top(0);
        }

        self.arm_spinner(content.image.is_some());

        if let Some(close) = &self.inner.parts.close {
            dom::focus(close);
        }

        let generation = outcome.generation();
        let weak = self.downgrade();
        let parts = self.inner.parts.clone();
        let played = animator.play(
            &motion::modal_entrance(),
            move |part| parts.resolve(part),
            move || {
                if let Some(modal) = Self::upgrade(&weak) {
                    if let Ok(mut state) = modal.inner.state.try_borrow_mut() {
                        state.machine.entrance_finished(generation);
                    }
                }
            },
        );
        match played {
            Ok(Some(handle)) => self.keep_running(handle),
            Ok(None) => {}
            Err(error) => warn!(%error, "modal entrance failed"),
        }
        debug!(?outcome, title = %content.title, "modal opened");
    }

    /// Start the exit animation; the dialog is torn down when it finishes.
    pub fn close(&self) {
        let generation = {
            let Ok(mut state) = self.inner.state.try_borrow_mut() else {
                return;
            };
            let Some(generation) = state.machine.close() else {
                return;
            };
            if let Some(handle) = state.running.take() {
                Animator::kill(&handle);
            }
            generation
        };

        let animator = &self.inner.animator;
        if let Some(close) = &self.inner.parts.close {
            let [.., reset] = motion::close_control();
            if let Err(error) = animator.set(std::slice::from_ref(close), &reset) {
                debug!(%error, "close control reset failed");
            }
        }

        let weak = self.downgrade();
        let parts = self.inner.parts.clone();
        let played = animator.play(
            &motion::modal_exit(),
            move |part| parts.resolve(part),
            move || {
                if let Some(modal) = Self::upgrade(&weak) {
                    modal.finish_exit(generation);
                }
            },
        );
        match played {
            Ok(Some(handle)) => self.keep_running(handle),
            Ok(None) => {}
            Err(error) => {
                warn!(%error, "modal exit animation failed");
                self.finish_exit(generation);
            }
        }
    }

    fn keep_running(&self, handle: JsValue) {
        if let Ok(mut state) = self.inner.state.try_borrow_mut() {
            state.running = Some(handle);
        }
    }

    /// Undo everything the session set up.
    fn finish_exit(&self, generation: u64) {
        let session = {
            let Ok(mut state) = self.inner.state.try_borrow_mut() else {
                return;
            };
            let Some(session) = state.machine.exit_finished(generation) else {
                debug!(generation, "stale exit ignored");
                return;
            };
            state.running = None;
            state.spinner_timer = None;
            state.image_listeners.clear();
            session
        };

        let root = &self.inner.parts.root;
        dom::remove_attr(root, "open");
        dom::set_attr(root, "aria-hidden", "true");
        dom::set_attr(root, "aria-modal", "false");

        if let Ok(body) = dom::body() {
            let locked_top = body.style().get_property_value("top").unwrap_or_default();
            let offset = rules::scroll_restore_offset(&locked_top, session.scroll_lock_offset);
            for property in SCROLL_LOCK_PROPERTIES {
                dom::clear_style(&body, property);
            }
            if let Ok(window) = dom::window() {
                window.scroll_to_with_x_and_y(0.0, offset);
            }
        }

        self.inner.animator.enable_scroll_triggers();

        if let Some(previous) = &session.previously_focused {
            dom::focus(previous);
        }

        let placed = match session.restore_point(|sibling, parent| sibling.parent_node().as_ref() == Some(parent)) {
            Restore::Before { parent, sibling } => parent.insert_before(root, Some(&sibling)).map(|_| ()),
            Restore::Append { parent } => parent.append_child(root).map(|_| ()),
            Restore::Stay => Ok(()),
        };
        if let Err(error) = placed {
            warn!(error = %crate::error::describe(&error), "could not restore modal position");
        }
        debug!(generation, "modal closed");
    }

    /// Keep Tab and Shift+Tab inside the dialog.
    fn trap_focus(&self, event: &Event, backwards: bool) {
        let focusable = dom::query_all_in(&self.inner.parts.root, rules::FOCUSABLE_SELECTOR);
        let active = dom::document().ok().and_then(|doc| doc.active_element());
        let index = active.and_then(|active| focusable.iter().position(|el| *el == active));

        let target = match rules::focus_jump(index, focusable.len(), backwards) {
            Some(FocusJump::ToFirst) => focusable.first(),
            Some(FocusJump::ToLast) => focusable.last(),
            None => None,
        };
        if let Some(target) = target {
            event.prevent_default();
            dom::focus(target);
        }
    }

    fn render(&self, content: &ModalContent) -> Result<()> {
        let parts = &self.inner.parts;
        if let Some(title) = &parts.title {
            title.set_text_content(Some(&content.title));
        }
        if let Some(description) = &parts.description {
            description.set_text_content(Some(&content.description));
        }

        if let Some(body) = &parts.body {
            let document = dom::document()?;

            let tech = dom::ensure_child(body, ".modal-tech", "div", "modal-tech")?;
            tech.set_inner_html("");
            for chip in &content.chips {
                let span = document.create_element("span")?;
                span.set_class_name("chip");
                span.set_text_content(Some(chip));
                tech.append_child(&span)?;
            }

            let actions = dom::ensure_child(body, ".modal-actions", "div", "modal-actions")?;
            actions.set_inner_html("");
            for action in &content.actions {
                let anchor = document.create_element("a")?;
                anchor.set_class_name("btn-outline");
                anchor.set_text_content(Some(action.label));
                match action.link.href() {
                    Some(href) => {
                        dom::set_attr(&anchor, "href", href);
                        dom::set_attr(&anchor, "target", "_blank");
                        dom::set_attr(&anchor, "rel", "noopener");
                    }
                    None => {
                        dom::add_class(&anchor, "is-disabled");
                        dom::set_attr(&anchor, "aria-disabled", "true");
                        dom::set_attr(&anchor, "tabindex", "-1");
                    }
                }
                actions.append_child(&anchor)?;
            }
        }

        if let Some(image) = &parts.image {
            match &content.image {
                Some(url) => {
                    dom::clear_style(image, "display");
                    image.set_src(url);
                    image.set_alt(&content.image_alt);
                    dom::set_attr(image, "decoding", "async");
                    dom::set_attr(image, "fetchpriority", "low");
                    dom::set_attr(image, "loading", "lazy");
                }
                None => {
                    dom::set_style(image, "display", "none");
                    dom::remove_attr(image, "src");
                }
            }
        }
        Ok(())
    }

    /// Hide the spinner, and show it after a delay unless the image is
    /// already decoded. A failed image is hidden.
    fn arm_spinner(&self, has_image: bool) {
        let (Some(dialog), Some(image)) = (&self.inner.parts.dialog, &self.inner.parts.image) else {
            return;
        };
        let spinner = match dom::ensure_child(dialog, ".spinner", "div", "spinner") {
            Ok(spinner) => spinner,
            Err(error) => {
                debug!(%error, "spinner unavailable");
                return;
            }
        };
        dom::set_style(&spinner, "display", "none");

        let Ok(mut state) = self.inner.state.try_borrow_mut() else {
            return;
        };
        state.spinner_timer = None;
        state.image_listeners.clear();
        if !has_image {
            return;
        }

        let settle = |event: &'static str, hide_image: bool| {
            let weak = self.downgrade();
            let spinner = spinner.clone();
            let shown = image.clone();
            Listener::new(image, event, move |_| {
                dom::set_style(&spinner, "display", "none");
                if hide_image {
                    dom::set_style(&shown, "display", "none");
                }
                if let Some(modal) = Self::upgrade(&weak) {
                    if let Ok(mut state) = modal.inner.state.try_borrow_mut() {
                        state.spinner_timer = None;
                    }
                }
            })
        };
        match (settle("load", false), settle("error", true)) {
            (Ok(on_load), Ok(on_error)) => state.image_listeners = vec![on_load, on_error],
            (Err(error), _) | (_, Err(error)) => debug!(%error, "image listeners failed"),
        }

        if rules::image_needs_spinner(image.complete(), image.natural_width()) {
            let shown = spinner.clone();
            state.spinner_timer = Some(Timeout::new(self.inner.spinner_delay_ms, move || {
                dom::set_style(&shown, "display", "grid");
            }));
        }
    }
}

fn capture_session(root: &Element, body: &HtmlElement, focused: Option<Element>) -> ModalSession<Node, Element> {
    let body_node: &Node = body;
    let anchor = root
        .parent_node()
        .filter(|parent| parent != body_node)
        .map(|parent| Anchor {
            parent,
            next_sibling: root.next_sibling(),
        });
    let scroll_lock_offset = dom::window()
        .ok()
        .and_then(|window| window.scroll_y().ok())
        .unwrap_or_default();

    ModalSession {
        anchor,
        scroll_lock_offset,
        previously_focused: focused,
    }
}

fn lock_scroll(body: &HtmlElement, offset: f64) {
    let style = body.style();
    let top = rules::scroll_lock_top(offset);
    for (property, value) in [
        ("position", "fixed"),
        ("top", top.as_str()),
        ("left", "0"),
        ("right", "0"),
        ("width", "100%"),
    ] {
        if let Err(error) = style.set_property(property, value) {
            debug!(property, error = %crate::error::describe(&error), "scroll lock failed");
        }
    }
}
