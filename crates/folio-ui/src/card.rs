//! Project cards
//!
//! Renders [`CardView`]s into the grid and binds any card, rendered or
//! authored in the page, so that activating it opens the project modal.

use std::rc::Rc;

use folio_core::record::{self, CardText};
use folio_core::{CardView, ProjectRecord};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent};

use crate::app::Page;
use crate::dom;
use crate::error::Result;
use crate::image_loader;

pub const CARD_SELECTOR: &str = ".projects .card";

/// Marks a card whose listeners are attached
const BOUND_ATTRIBUTE: &str = "data-bound";

/// Build the element for one card.
///
/// # Errors
///
/// Returns an error if an element cannot be created.
pub fn render(document: &Document, view: &CardView) -> Result<Element> {
    let card = document.create_element("div")?;
    card.set_class_name("card reveal");
    dom::set_attr(&card, "tabindex", "0");
    dom::set_attr(&card, "data-project", &view.data_attribute);

    let thumb = document.create_element("img")?;
    thumb.set_class_name("thumb-img");
    for (name, value) in [
        ("src", view.record.image_url.as_str()),
        ("alt", view.image_alt.as_str()),
        ("loading", "lazy"),
        ("decoding", "async"),
        ("fetchpriority", "low"),
    ] {
        dom::set_attr(&thumb, name, value);
    }

    let body = document.create_element("div")?;
    body.set_class_name("card-body");
    let heading = document.create_element("h3")?;
    heading.set_text_content(Some(&view.record.title));
    let excerpt = document.create_element("p")?;
    excerpt.set_text_content(Some(&view.excerpt));
    body.append_child(&heading)?;
    body.append_child(&excerpt)?;

    card.append_child(&thumb)?;
    card.append_child(&body)?;
    Ok(card)
}

/// Visible text of a card, for cards without usable embedded data
#[must_use]
pub fn scrape(card: &Element) -> CardText {
    CardText {
        title: dom::text_of(dom::query_in(card, ".card-body h3")),
        description: dom::text_of(dom::query_in(card, ".card-body p")),
        image_url: dom::query_in(card, "img.thumb-img")
            .and_then(|img| img.get_attribute("src"))
            .unwrap_or_default(),
    }
}

/// The record a card opens with.
#[must_use]
pub fn decode(card: &Element) -> ProjectRecord {
    let raw = card.get_attribute("data-project");
    record::decode_card(raw.as_deref(), || scrape(card))
}

/// Attach click and keyboard activation, and warm the image cache. Binding
/// a card twice is a no-op.
///
/// # Errors
///
/// Returns an error if a listener cannot be added.
pub fn bind(card: &Element, page: &Rc<Page>) -> Result<()> {
    if card.has_attribute(BOUND_ATTRIBUTE) {
        return Ok(());
    }
    dom::set_attr(card, BOUND_ATTRIBUTE, "");

    let record = Rc::new(decode(card));
    image_loader::warm(&page.images, &record.image_url);

    let Some(modal) = page.modal.clone() else {
        debug!(title = %record.title, "no modal on page, card left inert");
        return Ok(());
    };

    let on_click = Rc::clone(&record);
    let click_modal = modal.clone();
    dom::on(card, "click", move |_| click_modal.open(&on_click))?;

    dom::on(card, "keydown", move |event: Event| {
        let activates = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key| matches!(key.key().as_str(), "Enter" | " "));
        if activates {
            event.prevent_default();
            modal.open(&record);
        }
    })
}

/// Bind every card already in the page.
pub fn bind_all(page: &Rc<Page>) {
    for card in dom::query_all(CARD_SELECTOR) {
        if let Err(error) = bind(&card, page) {
            warn!(%error, "could not bind project card");
        }
    }
}
