//! DOM helper tests

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen_test::wasm_bindgen_test;
use web_sys::{HtmlButtonElement, HtmlImageElement};

use super::Fixture;
use crate::dom::{self, Listener};
use crate::error::UiError;

#[wasm_bindgen_test]
fn test_listener_is_removed_on_drop() {
    let _fixture = Fixture::new(r#"<button id="counted" type="button">+</button>"#);
    let button = dom::query("#counted").unwrap();
    let clicks = Rc::new(Cell::new(0_u32));

    let counter = Rc::clone(&clicks);
    let listener = Listener::new(&button, "click", move |_| counter.set(counter.get() + 1)).unwrap();
    let html = dom::html(&button).unwrap();
    html.click();
    assert_eq!(clicks.get(), 1);

    drop(listener);
    html.click();
    assert_eq!(clicks.get(), 1);
}

#[wasm_bindgen_test]
fn test_ensure_child_reuses_existing() {
    let _fixture = Fixture::new(r#"<div id="host"></div>"#);
    let host = dom::query("#host").unwrap();

    let first = dom::ensure_child(&host, ".spinner", "div", "spinner").unwrap();
    let second = dom::ensure_child(&host, ".spinner", "div", "spinner").unwrap();

    assert_eq!(first, second);
    assert_eq!(dom::children(&host).len(), 1);
}

#[wasm_bindgen_test]
fn test_query_as_reports_wrong_type() {
    let _fixture = Fixture::new(r#"<div id="typed"><button class="go" type="button">go</button></div>"#);
    let host = dom::query("#typed").unwrap();

    assert!(dom::query_as::<HtmlButtonElement>(&host, ".go").is_ok());
    assert_eq!(
        dom::query_as::<HtmlImageElement>(&host, ".go"),
        Err(UiError::wrong_element_type(".go"))
    );
    assert_eq!(
        dom::query_as::<HtmlImageElement>(&host, ".missing"),
        Err(UiError::element_not_found(".missing"))
    );
}

#[wasm_bindgen_test]
fn test_style_helpers_round_trip() {
    let _fixture = Fixture::new(r#"<div id="styled"></div>"#);
    let el = dom::query("#styled").unwrap();

    dom::set_style(&el, "opacity", "0.5");
    assert_eq!(dom::inline_style(&el, "opacity"), "0.5");
    dom::clear_style(&el, "opacity");
    assert_eq!(dom::inline_style(&el, "opacity"), "");
}
