//! Project modal lifecycle tests

use folio_core::ProjectRecord;
use folio_core::record::Link;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::wasm_bindgen_test;
use web_sys::{HtmlElement, KeyboardEvent, KeyboardEventInit};

use super::{Fixture, MODAL_MARKUP};
use crate::animator::Animator;
use crate::dom;
use crate::modal::{MODAL_SELECTOR, ModalController};

fn bondi() -> ProjectRecord {
    ProjectRecord::new("Bondi")
        .with_description("A demo app")
        .with_image("https://img/x.png")
        .with_technologies(["Go", "Docker"])
        .with_demo(Link::Url("https://bondi.example/".to_string()))
        .with_code(Link::Url("https://github.com/x/Bondi".to_string()))
}

fn body_style(property: &str) -> String {
    dom::body().unwrap().style().get_property_value(property).unwrap()
}

fn mount() -> ModalController {
    ModalController::mount(Animator::inert(), 300).expect("modal in fixture")
}

#[wasm_bindgen_test]
fn test_mount_without_dialog_is_none() {
    assert!(ModalController::mount(Animator::inert(), 300).is_none());
}

#[wasm_bindgen_test]
fn test_open_lifts_dialog_and_locks_scroll() {
    let _fixture = Fixture::new(MODAL_MARKUP);
    let modal = mount();
    let root = dom::query(MODAL_SELECTOR).unwrap();

    modal.open(&bondi());

    assert!(modal.is_open());
    let body = dom::body().unwrap();
    assert_eq!(root.parent_element(), Some(body.into()));
    assert!(root.has_attribute("open"));
    assert_eq!(root.get_attribute("aria-modal").as_deref(), Some("true"));
    assert_eq!(dom::text_of(dom::query_in(&root, ".modal-title")), "Bondi");
    assert_eq!(dom::query_all_in(&root, ".modal-tech .chip").len(), 2);
    assert_eq!(body_style("position"), "fixed");

    modal.close();
}

#[wasm_bindgen_test]
fn test_open_renders_chips_and_links_in_order() {
    let _fixture = Fixture::new(MODAL_MARKUP);
    let modal = mount();

    modal.open(&bondi());

    let root = dom::query(MODAL_SELECTOR).unwrap();
    let chips: Vec<String> = dom::query_all_in(&root, ".modal-tech .chip")
        .into_iter()
        .map(|chip| dom::text_of(Some(chip)))
        .collect();
    assert_eq!(chips, ["Go", "Docker"]);

    let links = dom::query_all_in(&root, ".modal-actions a");
    assert_eq!(links.len(), 2);
    let hrefs: Vec<Option<String>> = links.iter().map(|a| a.get_attribute("href")).collect();
    assert_eq!(
        hrefs,
        [
            Some("https://bondi.example/".to_string()),
            Some("https://github.com/x/Bondi".to_string()),
        ]
    );
    for link in &links {
        assert!(!dom::has_class(link, "is-disabled"));
        assert_eq!(link.get_attribute("target").as_deref(), Some("_blank"));
        assert_eq!(link.get_attribute("rel").as_deref(), Some("noopener"));
    }
    assert_eq!(dom::text_of(dom::query_in(&root, ".modal-desc")), "A demo app");
    let image = dom::query_in(&root, ".modal-image").unwrap();
    assert_eq!(image.get_attribute("src").as_deref(), Some("https://img/x.png"));

    modal.close();
}

#[wasm_bindgen_test]
fn test_close_restores_position_focus_and_scroll() {
    let _fixture = Fixture::new(MODAL_MARKUP);
    let modal = mount();
    let opener = dom::query("#opener").unwrap();
    dom::focus(&opener);

    modal.open(&bondi());
    modal.close();

    let root = dom::query(MODAL_SELECTOR).unwrap();
    assert!(!modal.is_open());
    assert!(!root.has_attribute("open"));
    assert_eq!(root.get_attribute("aria-hidden").as_deref(), Some("true"));
    assert_eq!(root.next_element_sibling(), dom::query("#after-modal"));
    let active = dom::document().unwrap().active_element();
    assert_eq!(active, Some(opener));
    assert_eq!(body_style("position"), "");
    assert_eq!(body_style("top"), "");
}

#[wasm_bindgen_test]
fn test_absent_links_render_disabled_actions() {
    let _fixture = Fixture::new(MODAL_MARKUP);
    let modal = mount();

    modal.open(&ProjectRecord::new("Draft"));

    let disabled = dom::query_all(".modal-actions a.is-disabled");
    assert_eq!(disabled.len(), 2);
    for anchor in &disabled {
        assert!(!anchor.has_attribute("href"));
        assert_eq!(anchor.get_attribute("aria-disabled").as_deref(), Some("true"));
    }
    let image = dom::query(".modal-image").unwrap();
    assert_eq!(dom::inline_style(&image, "display"), "none");

    modal.close();
}

#[wasm_bindgen_test]
fn test_reopen_refreshes_content_in_place() {
    let _fixture = Fixture::new(MODAL_MARKUP);
    let modal = mount();

    modal.open(&bondi());
    modal.open(&ProjectRecord::new("Tide"));

    let root = dom::query(MODAL_SELECTOR).unwrap();
    assert_eq!(dom::text_of(dom::query_in(&root, ".modal-title")), "Tide");
    assert!(dom::query_all_in(&root, ".modal-tech .chip").is_empty());

    modal.close();
    assert_eq!(root.next_element_sibling(), dom::query("#after-modal"));
}

#[wasm_bindgen_test]
fn test_overlay_click_closes() {
    let _fixture = Fixture::new(MODAL_MARKUP);
    let modal = mount();
    modal.open(&bondi());

    let overlay = dom::query(".overlay").unwrap();
    overlay.dyn_ref::<HtmlElement>().unwrap().click();

    assert!(!modal.is_open());
}

#[wasm_bindgen_test]
fn test_escape_closes() {
    let _fixture = Fixture::new(MODAL_MARKUP);
    let modal = mount();
    modal.open(&bondi());

    let init = KeyboardEventInit::new();
    init.set_key("Escape");
    let escape = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    dom::window().unwrap().dispatch_event(&escape).unwrap();

    assert!(!modal.is_open());
}

#[wasm_bindgen_test]
fn test_close_when_closed_is_noop() {
    let _fixture = Fixture::new(MODAL_MARKUP);
    let modal = mount();

    modal.close();

    let root = dom::query(MODAL_SELECTOR).unwrap();
    assert!(!modal.is_open());
    assert_eq!(root.get_attribute("aria-hidden").as_deref(), Some("true"));
}
