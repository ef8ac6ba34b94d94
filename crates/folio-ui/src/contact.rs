//! Contact form
//!
//! Validates on submit, highlights failing fields, relays valid messages to
//! the form endpoint, and shows a self-hiding status message.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::contact::{self, ContactFields, Field, Status};
use folio_core::motion;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, FormData, HtmlButtonElement, HtmlFormElement};

use crate::animator::apply_props;
use crate::app::Page;
use crate::dom;
use crate::error::{Result, UiError};

/// Text of a named form field, empty when missing
fn field_value(data: &FormData, key: &str) -> String {
    data.get(key).as_string().unwrap_or_default()
}

/// Disables the submit control and swaps its label while a message is in
/// flight
struct SubmitLock {
    button: Option<HtmlButtonElement>,
    label: String,
}

impl SubmitLock {
    fn engage(form: &HtmlFormElement) -> Self {
        let button = dom::query_as::<HtmlButtonElement>(form, contact::SUBMIT_SELECTOR).ok();
        let label = button
            .as_ref()
            .and_then(|b| b.text_content())
            .unwrap_or_default();
        if let Some(button) = &button {
            button.set_disabled(true);
            button.set_text_content(Some(contact::SENDING_LABEL));
        }
        Self { button, label }
    }
}

impl Drop for SubmitLock {
    fn drop(&mut self) {
        if let Some(button) = &self.button {
            button.set_disabled(false);
            button.set_text_content(Some(&self.label));
        }
    }
}

/// Post a validated message to the relay and map its answer to a status.
///
/// # Errors
///
/// Returns an error if the payload cannot be built or the request fails in
/// transport.
pub async fn relay(endpoint: &str, fields: &ContactFields) -> Result<Status> {
    let payload = FormData::new()?;
    for (key, value) in fields.relay_fields() {
        payload.append_with_str(key, &value)?;
    }

    let response = Request::post(endpoint)
        .header("Accept", "application/json")
        .body(payload)?
        .send()
        .await?;
    Ok(Status::from_relay_status(response.status()))
}

/// Status auto-hide timers still pending in static mode
#[derive(Default)]
struct HideTimers {
    success: Option<Timeout>,
    error: Option<Timeout>,
}

impl HideTimers {
    const fn slot(&mut self, status: Status) -> &mut Option<Timeout> {
        match status {
            Status::Success => &mut self.success,
            Status::Error => &mut self.error,
        }
    }
}

/// The page's contact form and its pending status timers
pub struct ContactForm {
    form: HtmlFormElement,
    page: Rc<Page>,
    hide_timers: RefCell<HideTimers>,
}

impl std::fmt::Debug for ContactForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactForm").finish_non_exhaustive()
    }
}

impl ContactForm {
    fn mark_invalid(&self, invalid: &[Field]) {
        for field in Field::ALL {
            if let Some(input) = dom::query_in(&self.form, field.selector()) {
                dom::toggle_class(&input, contact::INVALID_CLASS, invalid.contains(&field));
            }
        }
    }

    /// Both status elements hidden, with no tween or timer left to touch
    /// them.
    fn hide_statuses(&self) {
        if let Ok(mut timers) = self.hide_timers.try_borrow_mut() {
            *timers = HideTimers::default();
        }
        let animator = &self.page.animator;
        for status in [Status::Success, Status::Error] {
            if let Some(element) = dom::query(status.selector()) {
                let targets = std::slice::from_ref(&element);
                animator.kill_tweens_of(targets);
                dom::set_style(&element, "display", "none");
                if let Err(error) = animator.set(targets, &motion::Tween::to(motion::status_hidden())) {
                    debug!(%error, "status reset failed");
                }
            }
        }
    }

    /// Show a status and hide it again after the configured delay.
    fn show_status(&self, status: Status) {
        let Some(element) = dom::query(status.selector()) else {
            return;
        };
        dom::set_style(&element, "display", "block");
        let animator = &self.page.animator;
        let hide_ms = self.page.config.timings.status_hide_ms;
        let targets = std::slice::from_ref(&element);

        if !animator.is_animated() {
            apply_props(targets, &motion::status_show().props);
            let hidden = element.clone();
            let timer = Timeout::new(hide_ms, move || {
                dom::set_style(&hidden, "display", "none");
            });
            match self.hide_timers.try_borrow_mut() {
                Ok(mut timers) => *timers.slot(status) = Some(timer),
                Err(_) => debug!("status timers busy, message stays shown"),
            }
            return;
        }

        if let Err(error) = animator.from_to(targets, &motion::status_hidden(), &motion::status_show()) {
            debug!(%error, "status show failed");
        }
        let hidden = element.clone();
        let hide = motion::status_hide().delay(f64::from(hide_ms) / 1000.0);
        let result = animator.to_then(targets, &hide, move || {
            dom::set_style(&hidden, "display", "none");
        });
        if let Err(error) = result {
            debug!(%error, "status hide failed");
        }
    }

    fn submit(contact: &Rc<Self>) -> Result<()> {
        let data = FormData::new_with_form(&contact.form)?;
        let fields = ContactFields::new(
            &field_value(&data, Field::Name.key()),
            &field_value(&data, Field::Email.key()),
            &field_value(&data, Field::Message.key()),
        );

        let invalid = fields.validate();
        contact.mark_invalid(&invalid);
        contact.hide_statuses();

        if !invalid.is_empty() {
            debug!(?invalid, "contact form rejected");
            contact.show_status(Status::Error);
            return Ok(());
        }

        let contact = Rc::clone(contact);
        spawn_local(async move {
            contact.send(&fields).await;
        });
        Ok(())
    }

    /// Relay a validated message with the submit control locked, then show
    /// the outcome.
    pub async fn send(&self, fields: &ContactFields) -> Status {
        let lock = SubmitLock::engage(&self.form);
        let status = relay(&self.page.config.relay_endpoint, fields)
            .await
            .unwrap_or_else(|error| {
                warn!(%error, "contact relay failed");
                Status::Error
            });
        self.finish(status, fields);
        drop(lock);
        status
    }

    /// Apply a relay outcome. Only a delivered message resets the form.
    pub fn finish(&self, status: Status, fields: &ContactFields) {
        if status == Status::Success {
            info!("contact message delivered");
            if let Some(element) = dom::query(status.selector()) {
                element.set_text_content(Some(&fields.success_message()));
            }
            self.form.reset();
        }
        self.show_status(status);
    }
}

/// Wire the contact form, when the page has one.
///
/// # Errors
///
/// Returns an error if the form element has the wrong type or the submit
/// listener cannot be added.
pub fn mount(page: &Rc<Page>) -> Result<Option<Rc<ContactForm>>> {
    let Some(form) = dom::query(contact::FORM_SELECTOR) else {
        debug!("no contact form on page");
        return Ok(None);
    };
    let form = form
        .dyn_into::<HtmlFormElement>()
        .map_err(|_: Element| UiError::wrong_element_type(contact::FORM_SELECTOR))?;

    let contact = Rc::new(ContactForm {
        form,
        page: Rc::clone(page),
        hide_timers: RefCell::default(),
    });
    let listener = Rc::clone(&contact);
    dom::on(&contact.form, "submit", move |event: Event| {
        event.prevent_default();
        if let Err(error) = ContactForm::submit(&listener) {
            warn!(%error, "contact submit failed");
            listener.show_status(Status::Error);
        }
    })?;
    Ok(Some(contact))
}
