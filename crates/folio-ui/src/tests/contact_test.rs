//! Contact form and image preload tests

use folio_core::SiteConfig;
use folio_core::contact::{ContactFields, INVALID_CLASS, Status};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::wasm_bindgen_test;
use web_sys::{Element, Event, FormData, HtmlButtonElement, HtmlFormElement};

use super::Fixture;
use crate::app::Page;
use crate::contact;
use crate::dom;
use crate::image_loader;

const UNREACHABLE_RELAY: &str = "http://127.0.0.1:9/relay";

fn form_markup(name: &str, email: &str, message: &str) -> String {
    format!(
        r#"
<section id="contact">
  <form class="form">
    <input name="name" value="{name}">
    <input name="email" value="{email}">
    <textarea name="message">{message}</textarea>
    <button type="submit">Send</button>
    <p class="form-status status-success" style="display: none"></p>
    <p class="form-status status-error" style="display: none">Please check the form.</p>
  </form>
</section>
"#
    )
}

fn invalid_form() -> String {
    form_markup("A", "not-an-address", "short")
}

fn valid_form() -> String {
    form_markup("Ada", "ada@example.com", "Hello there, nice site.")
}

fn valid_fields() -> ContactFields {
    ContactFields::new("Ada", "ada@example.com", "Hello there, nice site.")
}

fn page_with(configure: impl FnOnce(&mut SiteConfig)) -> std::rc::Rc<Page> {
    let mut config = SiteConfig::default();
    configure(&mut config);
    Page::new(config).unwrap()
}

fn form() -> HtmlFormElement {
    dom::query("#contact .form").unwrap().dyn_into().unwrap()
}

fn submit(form: &Element) {
    form.dispatch_event(&Event::new("submit").unwrap()).unwrap();
}

fn field(form: &HtmlFormElement, key: &str) -> String {
    FormData::new_with_form(form).unwrap().get(key).as_string().unwrap()
}

fn status_display(selector: &str) -> String {
    dom::inline_style(&dom::query(selector).unwrap(), "display")
}

#[wasm_bindgen_test]
fn test_page_without_form_mounts_nothing() {
    let page = Page::new(SiteConfig::default()).unwrap();
    assert!(contact::mount(&page).unwrap().is_none());
}

#[wasm_bindgen_test]
fn test_invalid_submit_marks_fields_and_shows_error() {
    let _fixture = Fixture::new(&invalid_form());
    let page = Page::new(SiteConfig::default()).unwrap();
    contact::mount(&page).unwrap();

    let form = dom::query("#contact .form").unwrap();
    submit(&form);

    let invalid = dom::query_all_in(&form, &format!(".{INVALID_CLASS}"));
    assert_eq!(invalid.len(), 3);
    let error = dom::query("#contact .status-error").unwrap();
    assert_eq!(dom::inline_style(&error, "display"), "block");
    assert_eq!(dom::inline_style(&error, "opacity"), "1");
    assert_eq!(status_display("#contact .status-success"), "none");

    let button = dom::query_as::<HtmlButtonElement>(&form, "button").unwrap();
    assert!(!button.disabled());
    assert_eq!(button.text_content().as_deref(), Some("Send"));
}

#[wasm_bindgen_test]
fn test_fixing_a_field_clears_its_marker() {
    let _fixture = Fixture::new(&invalid_form());
    let page = Page::new(SiteConfig::default()).unwrap();
    contact::mount(&page).unwrap();
    let form = dom::query("#contact .form").unwrap();

    submit(&form);
    dom::set_attr(&dom::query_in(&form, r#"input[name="name"]"#).unwrap(), "value", "Ada");
    submit(&form);

    let name = dom::query_in(&form, r#"input[name="name"]"#).unwrap();
    assert!(!dom::has_class(&name, INVALID_CLASS));
    assert_eq!(dom::query_all_in(&form, &format!(".{INVALID_CLASS}")).len(), 2);
}

#[wasm_bindgen_test]
async fn test_resubmit_cancels_pending_auto_hide() {
    let _fixture = Fixture::new(&invalid_form());
    let page = page_with(|config| config.timings.status_hide_ms = 300);
    contact::mount(&page).unwrap();
    let form = dom::query("#contact .form").unwrap();

    submit(&form);
    TimeoutFuture::new(200).await;
    submit(&form);

    // first deadline has passed, second has not
    TimeoutFuture::new(200).await;
    assert_eq!(status_display("#contact .status-error"), "block");

    TimeoutFuture::new(300).await;
    assert_eq!(status_display("#contact .status-error"), "none");
}

#[wasm_bindgen_test]
async fn test_failed_relay_keeps_form_and_restores_button() {
    let _fixture = Fixture::new(&valid_form());
    let page = page_with(|config| config.relay_endpoint = UNREACHABLE_RELAY.to_string());
    let contact = contact::mount(&page).unwrap().unwrap();

    let status = contact.send(&valid_fields()).await;

    assert_eq!(status, Status::Error);
    let form = form();
    assert_eq!(field(&form, "name"), "Ada");
    assert_eq!(field(&form, "email"), "ada@example.com");
    assert_eq!(field(&form, "message"), "Hello there, nice site.");
    assert_eq!(status_display("#contact .status-error"), "block");
    assert_eq!(status_display("#contact .status-success"), "none");

    let button = dom::query_as::<HtmlButtonElement>(&form, "button").unwrap();
    assert!(!button.disabled());
    assert_eq!(button.text_content().as_deref(), Some("Send"));
}

#[wasm_bindgen_test]
fn test_rejected_relay_answer_leaves_edits_in_place() {
    let _fixture = Fixture::new(&valid_form());
    let page = Page::new(SiteConfig::default()).unwrap();
    let contact = contact::mount(&page).unwrap().unwrap();
    let form = form();
    let name = dom::query_in(&form, r#"input[name="name"]"#).unwrap();
    js_sys::Reflect::set(&name, &"value".into(), &"Grace".into()).unwrap();

    contact.finish(Status::from_relay_status(422), &valid_fields());

    assert_eq!(field(&form, "name"), "Grace");
    assert_eq!(status_display("#contact .status-error"), "block");
}

#[wasm_bindgen_test]
fn test_delivered_message_resets_form_and_thanks_sender() {
    let _fixture = Fixture::new(&valid_form());
    let page = Page::new(SiteConfig::default()).unwrap();
    let contact = contact::mount(&page).unwrap().unwrap();
    let form = form();
    let name = dom::query_in(&form, r#"input[name="name"]"#).unwrap();
    js_sys::Reflect::set(&name, &"value".into(), &"Grace".into()).unwrap();

    contact.finish(Status::from_relay_status(200), &valid_fields());

    assert_eq!(field(&form, "name"), "Ada");
    let success = dom::query("#contact .status-success").unwrap();
    assert_eq!(dom::inline_style(&success, "display"), "block");
    assert_eq!(
        success.text_content().as_deref(),
        Some("Thanks, Ada! Your message was sent.")
    );
}

#[wasm_bindgen_test]
async fn test_unreachable_relay_is_an_error() {
    let outcome = contact::relay(UNREACHABLE_RELAY, &valid_fields()).await;

    assert!(outcome.is_err());
}

#[wasm_bindgen_test]
fn test_warming_twice_keeps_one_entry() {
    let cache = image_loader::shared_cache();

    image_loader::warm(&cache, "/img/bondi.png");
    image_loader::warm(&cache, "/img/bondi.png");
    image_loader::warm(&cache, "");

    assert_eq!(cache.borrow().len(), 1);
    assert!(cache.borrow().contains("/img/bondi.png"));
}
