//! Static animation fallback tests

use std::cell::Cell;
use std::rc::Rc;

use folio_core::motion::{self, Props, StepKind, Tween, parts};
use wasm_bindgen_test::wasm_bindgen_test;

use super::Fixture;
use crate::animator::Animator;
use crate::dom;

#[wasm_bindgen_test]
fn test_page_without_engine_is_static() {
    let window = dom::window().unwrap();
    let animator = Animator::detect(&window);
    assert!(!animator.is_animated());
    assert!(!animator.has_scroll_triggers());
}

#[wasm_bindgen_test]
fn test_static_timeline_applies_end_state_and_completes() {
    let _fixture = Fixture::new(r#"<div id="ov"></div><div id="dl"></div>"#);
    let overlay = dom::query("#ov").unwrap();
    let dialog = dom::query("#dl").unwrap();
    let done = Rc::new(Cell::new(false));

    let finished = Rc::clone(&done);
    let handle = Animator::inert()
        .play(
            &motion::modal_entrance(),
            |part| match part {
                parts::OVERLAY => vec![overlay.clone()],
                parts::DIALOG => vec![dialog.clone()],
                _ => Vec::new(),
            },
            move || finished.set(true),
        )
        .unwrap();

    assert!(handle.is_none());
    assert!(done.get());
    assert_eq!(dom::inline_style(&overlay, "opacity"), "1");
    assert_eq!(dom::inline_style(&dialog, "opacity"), "1");
}

#[wasm_bindgen_test]
fn test_static_exit_clears_inline_styles() {
    let _fixture = Fixture::new(r#"<div id="gone"></div>"#);
    let dialog = dom::query("#gone").unwrap();
    dom::set_style(&dialog, "transform", "scale(0.5)");

    Animator::inert()
        .play(
            &motion::modal_exit(),
            |part| {
                if part == parts::DIALOG {
                    vec![dialog.clone()]
                } else {
                    Vec::new()
                }
            },
            || {},
        )
        .unwrap();

    assert_eq!(dom::inline_style(&dialog, "opacity"), "");
    assert_eq!(dom::inline_style(&dialog, "transform"), "");
}

#[wasm_bindgen_test]
fn test_static_from_leaves_element_alone() {
    let _fixture = Fixture::new(r#"<div id="still" style="opacity: 0.7"></div>"#);
    let el = dom::query("#still").unwrap();
    let tween = Tween::to(Props::new().opacity(0.0).x(20.0));

    Animator::inert()
        .on_scroll(&el, &el, &StepKind::From, &tween, &motion::ScrollCue::at("top 80%"))
        .unwrap();

    assert_eq!(dom::inline_style(&el, "opacity"), "0.7");
}

#[wasm_bindgen_test]
fn test_static_counter_reports_end_value() {
    let seen = Rc::new(Cell::new(0.0));
    let last = Rc::clone(&seen);
    let (_, _, counter) = motion::skill_bar(85);

    Animator::inert().count_up(&counter, move |v| last.set(v)).unwrap();

    assert!((seen.get() - 85.0).abs() < f64::EPSILON);
}
