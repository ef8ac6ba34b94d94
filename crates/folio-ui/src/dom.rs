//! DOM helpers
//!
//! Panic-free lookups, class and style helpers, and event listener handles.
//! Lookups return `Option`; a missing element is normal on pages that omit a
//! section.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, NodeList, Window,
};

use crate::error::{Result, UiError};

/// # Errors
///
/// Returns `UiError::WindowNotAvailable` outside a browser.
pub fn window() -> Result<Window> {
    web_sys::window().ok_or(UiError::WindowNotAvailable)
}

/// # Errors
///
/// Returns an error outside a browser or without a document.
pub fn document() -> Result<Document> {
    window()?.document().ok_or(UiError::DocumentNotAvailable)
}

/// `document.body` as an element
///
/// # Errors
///
/// Returns an error when the document has no body yet.
pub fn body() -> Result<HtmlElement> {
    document()?
        .body()
        .ok_or_else(|| UiError::element_not_found("body"))
}

/// First match in the document.
#[must_use]
pub fn query(selector: &str) -> Option<Element> {
    document()
        .ok()
        .and_then(|doc| doc.query_selector(selector).ok().flatten())
}

/// First match below `root`.
#[must_use]
pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// All matches in the document, in document order.
#[must_use]
pub fn query_all(selector: &str) -> Vec<Element> {
    document()
        .ok()
        .and_then(|doc| doc.query_selector_all(selector).ok())
        .map(elements)
        .unwrap_or_default()
}

/// All matches below `root`, in document order.
#[must_use]
pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .ok()
        .map(elements)
        .unwrap_or_default()
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Element children of `parent`.
#[must_use]
pub fn children(parent: &Element) -> Vec<Element> {
    let collection = parent.children();
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}

/// `element` as an `HtmlElement`, if it is one.
#[must_use]
pub fn html(element: &Element) -> Option<HtmlElement> {
    element.dyn_ref::<HtmlElement>().cloned()
}

/// First match cast to `T`.
///
/// # Errors
///
/// Returns `UiError::ElementNotFound` or `UiError::WrongElementType`.
pub fn query_as<T: JsCast>(root: &Element, selector: &str) -> Result<T> {
    query_in(root, selector)
        .ok_or_else(|| UiError::element_not_found(selector))?
        .dyn_into::<T>()
        .map_err(|_| UiError::wrong_element_type(selector))
}

/// Existing child matching `selector`, or a new `<tag class=..>` appended
/// to `parent`.
///
/// # Errors
///
/// Returns an error if the element cannot be created or appended.
pub fn ensure_child(parent: &Element, selector: &str, tag: &str, class: &str) -> Result<Element> {
    if let Some(existing) = query_in(parent, selector) {
        return Ok(existing);
    }
    let created = document()?.create_element(tag)?;
    created.set_class_name(class);
    parent.append_child(&created)?;
    Ok(created)
}

pub fn add_class(element: &Element, class: &str) {
    if let Err(error) = element.class_list().add_1(class) {
        tracing::debug!(class, error = %crate::error::describe(&error), "add class failed");
    }
}

pub fn remove_class(element: &Element, class: &str) {
    if let Err(error) = element.class_list().remove_1(class) {
        tracing::debug!(class, error = %crate::error::describe(&error), "remove class failed");
    }
}

pub fn toggle_class(element: &Element, class: &str, on: bool) {
    if on {
        add_class(element, class);
    } else {
        remove_class(element, class);
    }
}

#[must_use]
pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

/// Set an inline style on anything that is an `HtmlElement`.
pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = html(element) {
        if let Err(error) = html.style().set_property(property, value) {
            tracing::debug!(property, error = %crate::error::describe(&error), "set style failed");
        }
    }
}

/// Remove an inline style.
pub fn clear_style(element: &Element, property: &str) {
    if let Some(html) = html(element) {
        let _ = html.style().remove_property(property);
    }
}

#[must_use]
pub fn inline_style(element: &Element, property: &str) -> String {
    html(element)
        .and_then(|html| html.style().get_property_value(property).ok())
        .unwrap_or_default()
}

pub fn set_attr(element: &Element, name: &str, value: &str) {
    if let Err(error) = element.set_attribute(name, value) {
        tracing::debug!(name, error = %crate::error::describe(&error), "set attribute failed");
    }
}

pub fn remove_attr(element: &Element, name: &str) {
    let _ = element.remove_attribute(name);
}

/// Visible text, trimmed.
#[must_use]
pub fn text_of(element: Option<Element>) -> String {
    element
        .and_then(|el| el.text_content())
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

/// Focus anything focusable.
pub fn focus(element: &Element) {
    if let Some(html) = html(element) {
        let _ = html.focus();
    }
}

/// Event listener removed when dropped
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Attach `handler` to `target` for `event`.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be added.
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Keep the listener for the lifetime of the page.
    pub fn persist(self) {
        std::mem::forget(self);
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Attach a page-lifetime listener.
///
/// # Errors
///
/// Returns an error if the listener cannot be added.
pub fn on<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    Listener::new(target, event, handler).map(Listener::persist)
}

/// Attach a page-lifetime passive listener, for scroll.
///
/// # Errors
///
/// Returns an error if the listener cannot be added.
pub fn on_passive<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    callback.forget();
    Ok(())
}

/// Whether the media query currently matches.
#[must_use]
pub fn media_matches(query: &str) -> bool {
    window()
        .ok()
        .and_then(|window| window.match_media(query).ok().flatten())
        .is_some_and(|list| list.matches())
}

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
