//! Page effects
//!
//! Walks [`BINDINGS`] once at start-up and installs each effect on the
//! elements its selector matches. Purely decorative effects are skipped when
//! nothing animates; the rest put their targets in the final state.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::bindings::{self, BINDINGS, Binding, Effect};
use folio_core::motion::{self, StepKind};
use folio_core::nav::{self, Viewport};
use folio_core::SiteConfig;
use gloo_timers::callback::Interval;
use js_sys::{Array, Object, Reflect};
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    Node, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions,
};

use crate::animator::{Animator, apply_props};
use crate::app::Page;
use crate::card::CARD_SELECTOR;
use crate::dom;
use crate::error::Result;

/// Install every binding whose selector matches something.
pub fn install(page: &Rc<Page>) {
    for binding in BINDINGS {
        if !page.animator.is_animated() && !binding.runs_without_motion() {
            debug!(selector = binding.selector, "decorative binding skipped");
            continue;
        }
        let targets = dom::query_all(binding.selector);
        if targets.is_empty() {
            debug!(selector = binding.selector, "binding matched nothing");
            continue;
        }
        match run(page, binding, &targets) {
            Ok(()) => debug!(trigger = ?binding.trigger, selector = binding.selector, "binding installed"),
            Err(error) => warn!(%error, selector = binding.selector, "binding failed"),
        }
    }
}

fn run(page: &Rc<Page>, binding: &Binding, targets: &[Element]) -> Result<()> {
    let animator = &page.animator;
    match binding.effect {
        Effect::YearStamp => {
            let year = js_sys::Date::new_0().get_full_year().to_string();
            for target in targets {
                target.set_text_content(Some(&year));
            }
            Ok(())
        }
        Effect::SmoothScroll => smooth_scroll(targets),
        Effect::HeroIntro => {
            hero_intro(animator);
            Ok(())
        }
        Effect::Reveal => {
            reveal(animator, targets);
            Ok(())
        }
        Effect::TimelineStagger => {
            timeline_stagger(animator, targets);
            Ok(())
        }
        Effect::SkillBars => skill_bars(animator, targets),
        Effect::Carousel => {
            carousel(animator, &page.config, targets);
            Ok(())
        }
        effect @ Effect::HoverLift { .. } => {
            for target in targets {
                hover_lift(animator, target, effect);
            }
            Ok(())
        }
        Effect::StickyHeader => sticky_header(animator, &page.config, targets),
        Effect::NavToggle => nav_toggle(&page.config, targets),
        Effect::BackToTop => back_to_top(&page.config, targets),
    }
}

/// Current scroll geometry
fn viewport() -> Viewport {
    let Ok(window) = dom::window() else {
        return Viewport::default();
    };
    let read = |value: std::result::Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or_default();

    let root = window.document().and_then(|doc| doc.document_element());
    let body = dom::body().ok();
    let document_height = [
        root.as_ref().map(Element::scroll_height),
        root.as_ref().and_then(dom::html).map(|html| html.offset_height()),
        body.as_ref().map(|body| body.scroll_height()),
        body.as_ref().map(|body| body.offset_height()),
    ]
    .into_iter()
    .flatten()
    .max()
    .map_or(0.0, f64::from);

    Viewport {
        scroll_y: window.scroll_y().unwrap_or_default(),
        inner_height: read(window.inner_height()),
        inner_width: read(window.inner_width()),
        document_height,
    }
}

fn smooth_scroll(links: &[Element]) -> Result<()> {
    for link in links {
        let anchor = link.clone();
        dom::on(link, "click", move |event: Event| {
            let href = anchor.get_attribute("href").unwrap_or_default();
            let Some(id) = nav::anchor_target(&href) else {
                return;
            };
            event.prevent_default();
            if let Some(target) = dom::document().ok().and_then(|doc| doc.get_element_by_id(id)) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?;
    }
    Ok(())
}

fn hero_intro(animator: &Animator) {
    for (selector, from, tween) in motion::hero_intro() {
        let targets = dom::query_all(selector);
        if targets.is_empty() {
            continue;
        }
        if let Err(error) = animator.from_to(&targets, &from, &tween) {
            debug!(%error, selector, "hero intro failed");
        }
    }
}

/// Final state of anything that would have faded in
fn settle(targets: &[Element]) {
    apply_props(targets, &motion::revealed());
    for target in targets {
        dom::set_style(target, "transform", "none");
    }
}

fn reveal(animator: &Animator, targets: &[Element]) {
    if !animator.is_animated() {
        settle(targets);
        return;
    }
    let (tween, cue) = motion::reveal();
    for target in targets {
        if let Err(error) = animator.on_scroll(target, target, &StepKind::To, &tween, &cue) {
            debug!(%error, "reveal failed");
        }
    }
}

fn timeline_stagger(animator: &Animator, items: &[Element]) {
    for (index, item) in items.iter().enumerate() {
        let Some(content) = dom::query_in(item, ".content") else {
            continue;
        };
        let (tween, cue) = motion::timeline_item(index);
        if let Err(error) = animator.on_scroll(&content, item, &StepKind::From, &tween, &cue) {
            debug!(%error, index, "timeline item failed");
        }
    }
}

/// Fill one skill row and count its label up.
fn animate_skill(animator: &Animator, row: &Element) {
    let fill = dom::query_in(row, ".fill");
    let level = nav::skill_level(fill.as_ref().and_then(|f| f.get_attribute("data-level")).as_deref());
    let (entrance, bar, counter) = motion::skill_bar(level);
    let row_targets = std::slice::from_ref(row);

    if animator.is_animated() {
        if let Err(error) = animator.from(row_targets, &entrance) {
            debug!(%error, "skill entrance failed");
        }
    } else {
        settle(row_targets);
    }

    if let Some(fill) = &fill {
        if let Err(error) = animator.to(std::slice::from_ref(fill), &bar) {
            debug!(%error, "skill fill failed");
        }
    }
    if let Some(value) = dom::query_in(row, ".value") {
        let counted = animator.count_up(&counter, move |v| {
            value.set_text_content(Some(&nav::percent_label(v)));
        });
        if let Err(error) = counted {
            debug!(%error, "skill counter failed");
        }
    }
}

fn skill_bars(animator: &Animator, rows: &[Element]) -> Result<()> {
    if animator.has_scroll_triggers() {
        let cue = motion::skill_cue();
        for row in rows {
            let vars = Object::new();
            Reflect::set(&vars, &"trigger".into(), row)?;
            Reflect::set(&vars, &"start".into(), &cue.start.into())?;
            Reflect::set(&vars, &"once".into(), &cue.once.into())?;
            let (engine, target) = (animator.clone(), row.clone());
            let on_enter = Closure::once_into_js(move || animate_skill(&engine, &target));
            Reflect::set(&vars, &"onEnter".into(), &on_enter)?;
            animator.scroll_trigger(&vars)?;
        }
        return Ok(());
    }

    let observable = dom::window()
        .ok()
        .and_then(|window| Reflect::has(&window, &"IntersectionObserver".into()).ok())
        .unwrap_or(false);
    if !observable {
        for row in rows {
            animate_skill(animator, row);
        }
        return Ok(());
    }

    let engine = animator.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let row = entry.target();
                    animate_skill(&engine, &row);
                    observer.unobserve(&row);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_root_margin("0px 0px -15% 0px");
    init.set_threshold(&JsValue::from_f64(0.1));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for row in rows {
        observer.observe(row);
    }
    callback.forget();
    Ok(())
}

/// Rotate testimonials on a timer. Without motion the first one stays shown.
fn carousel(animator: &Animator, config: &SiteConfig, quotes: &[Element]) {
    let Some(first) = quotes.first() else {
        return;
    };
    for quote in quotes {
        dom::toggle_class(quote, nav::ACTIVE_CLASS, quote == first);
    }
    let first = std::slice::from_ref(first);

    if !animator.is_animated() || !nav::carousel_enabled(quotes.len()) {
        apply_props(first, &motion::quote_in().props);
        return;
    }
    if let Err(error) = animator.to(first, &motion::quote_in()) {
        debug!(%error, "carousel start failed");
    }

    let quotes = quotes.to_vec();
    let engine = animator.clone();
    let mut current = 0;
    Interval::new(config.timings.carousel_interval_ms, move || {
        let next = nav::next_quote(current, quotes.len());
        if let (Some(leaving), Some(entering)) = (quotes.get(current), quotes.get(next)) {
            dom::remove_class(leaving, nav::ACTIVE_CLASS);
            dom::add_class(entering, nav::ACTIVE_CLASS);
            let out = engine.to(std::slice::from_ref(leaving), &motion::quote_out());
            let into = engine.to(std::slice::from_ref(entering), &motion::quote_in());
            if let Err(error) = out.and(into) {
                debug!(%error, "carousel step failed");
            }
        }
        current = next;
    })
    .forget();
}

/// Lift on hover or focus; the running lift is cut short on leave.
pub fn hover_lift(animator: &Animator, element: &Element, effect: Effect) {
    let (Effect::HoverLift { raise, .. }, Some(scale)) = (effect, effect.hover_scale()) else {
        return;
    };
    if !animator.is_animated() {
        return;
    }
    let (lifted, rest) = motion::hover_lift(scale, raise, bindings::hover_duration(raise));
    let running: Rc<RefCell<Option<JsValue>>> = Rc::new(RefCell::new(None));

    let attach = |event: &'static str, tween: motion::Tween, keep: bool| {
        let engine = animator.clone();
        let target = element.clone();
        let running = Rc::clone(&running);
        dom::on(element, event, move |_| {
            if let Some(handle) = running.borrow_mut().take() {
                Animator::kill(&handle);
            }
            match engine.to(std::slice::from_ref(&target), &tween) {
                Ok(handle) if keep => *running.borrow_mut() = handle,
                Ok(_) => {}
                Err(error) => debug!(%error, "hover tween failed"),
            }
        })
    };

    let attached = attach("mouseenter", lifted.clone(), true)
        .and_then(|()| attach("focus", lifted, true))
        .and_then(|()| attach("mouseleave", rest.clone(), false))
        .and_then(|()| attach("blur", rest, false));
    if let Err(error) = attached {
        debug!(%error, "hover listeners incomplete");
    }
}

/// Hover lift for a card added after start-up
pub fn lift_card(animator: &Animator, card: &Element) {
    if let Some(binding) = BINDINGS.iter().find(|b| b.selector == CARD_SELECTOR) {
        hover_lift(animator, card, binding.effect);
    }
}

fn sticky_header(animator: &Animator, config: &SiteConfig, targets: &[Element]) -> Result<()> {
    let Some(header) = targets.first().cloned() else {
        return Ok(());
    };

    if animator.has_scroll_triggers() {
        animator.set(std::slice::from_ref(&header), &motion::Tween::to(motion::Props::new().y(0.0)))?;

        let (engine, stuck) = (animator.clone(), header.clone());
        let on_enter = Closure::<dyn FnMut()>::new(move || {
            dom::add_class(&stuck, nav::STUCK_CLASS);
            let (from, tween) = motion::header_stick();
            if let Err(error) = engine.from_to(std::slice::from_ref(&stuck), &from, &tween) {
                debug!(%error, "header stick failed");
            }
        });
        let (engine, loose) = (animator.clone(), header);
        let on_leave_back = Closure::<dyn FnMut()>::new(move || {
            if let Err(error) = engine.to(std::slice::from_ref(&loose), &motion::header_unstick()) {
                debug!(%error, "header unstick failed");
            }
            dom::remove_class(&loose, nav::STUCK_CLASS);
        });

        let vars = Object::new();
        Reflect::set(&vars, &"start".into(), &config.timings.sticky_offset_px.into())?;
        Reflect::set(&vars, &"onEnter".into(), on_enter.as_ref())?;
        Reflect::set(&vars, &"onLeaveBack".into(), on_leave_back.as_ref())?;
        animator.scroll_trigger(&vars)?;
        on_enter.forget();
        on_leave_back.forget();
        return Ok(());
    }

    let timings = config.timings;
    let update = move || dom::toggle_class(&header, nav::STUCK_CLASS, viewport().header_stuck(&timings));
    update();
    dom::on_passive(dom::window()?.as_ref(), "scroll", move |_| update())
}

fn nav_toggle(config: &SiteConfig, targets: &[Element]) -> Result<()> {
    let (Some(toggle), Some(menu)) = (
        targets.first().cloned(),
        dom::document()?.get_element_by_id("main-nav"),
    ) else {
        return Ok(());
    };

    let set_open = {
        let (toggle, menu) = (toggle.clone(), menu.clone());
        Rc::new(move |open: bool| {
            dom::toggle_class(&menu, nav::OPEN_CLASS, open);
            dom::set_attr(&toggle, "aria-expanded", if open { "true" } else { "false" });
        })
    };

    let (flip, opened) = (Rc::clone(&set_open), menu.clone());
    dom::on(&toggle, "click", move |_| flip(!dom::has_class(&opened, nav::OPEN_CLASS)))?;

    for link in dom::query_all_in(&menu, r##"a[href^="#"]"##) {
        let close = Rc::clone(&set_open);
        dom::on(&link, "click", move |_| close(false))?;
    }

    let timings = config.timings;
    if viewport().should_collapse_nav(&timings) {
        set_open(false);
    }
    let window = dom::window()?;
    let close = Rc::clone(&set_open);
    dom::on(&window, "resize", move |_| {
        if viewport().should_collapse_nav(&timings) {
            close(false);
        }
    })?;

    let close = Rc::clone(&set_open);
    dom::on(dom::document()?.as_ref(), "click", move |event: Event| {
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        if !menu.contains(target.as_ref()) && !toggle.contains(target.as_ref()) {
            close(false);
        }
    })?;

    let close = set_open;
    dom::on(&window, "keydown", move |event: Event| {
        if event.dyn_ref::<KeyboardEvent>().is_some_and(|key| key.key() == "Escape") {
            close(false);
        }
    })
}

fn back_to_top(config: &SiteConfig, targets: &[Element]) -> Result<()> {
    let Some(button) = targets.first().cloned() else {
        return Ok(());
    };
    let window = dom::window()?;
    let timings = config.timings;

    let shown = button.clone();
    let update = Rc::new(move || {
        dom::toggle_class(&shown, nav::VISIBLE_CLASS, viewport().back_to_top_visible(&timings));
    });
    update();
    let on_scroll = Rc::clone(&update);
    dom::on_passive(&window, "scroll", move |_| on_scroll())?;
    dom::on(&window, "resize", move |_| update())?;

    dom::on(&button, "click", move |event: Event| {
        event.prevent_default();
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        let behavior = if dom::media_matches(dom::REDUCED_MOTION_QUERY) {
            ScrollBehavior::Auto
        } else {
            ScrollBehavior::Smooth
        };
        options.set_behavior(behavior);
        if let Ok(window) = dom::window() {
            window.scroll_to_with_scroll_to_options(&options);
        }
    })
}
