//! Contact form rules
//!
//! Field extraction and validation, the relay payload, and the status
//! copy. The browser shell reads the form, calls [`ContactFields::validate`],
//! and posts [`ContactFields::relay_fields`] when nothing failed.

use std::sync::LazyLock;

use regex::Regex;

pub const FORM_SELECTOR: &str = "#contact .form";
pub const SUBMIT_SELECTOR: &str = r#"button[type="submit"]"#;
pub const STATUS_SUCCESS_SELECTOR: &str = "#contact .form-status.status-success";
pub const STATUS_ERROR_SELECTOR: &str = "#contact .form-status.status-error";
pub const INVALID_CLASS: &str = "is-invalid";
pub const SENDING_LABEL: &str = "Sending…";

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// `local@domain.tld`-shaped address.
#[must_use]
pub fn is_plausible_email(candidate: &str) -> bool {
    matches!(&*EMAIL_PATTERN, Ok(pattern) if pattern.is_match(candidate))
}

/// Validated form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// Form-data key
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    /// Control within the form
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Name => r#"input[name="name"]"#,
            Self::Email => r#"input[name="email"]"#,
            Self::Message => r#"textarea[name="message"]"#,
        }
    }
}

/// Trimmed values of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    /// Fields that fail their rule, in form order. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| !self.passes(*field))
            .collect()
    }

    fn passes(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name.chars().count() >= MIN_NAME_CHARS,
            Field::Email => is_plausible_email(&self.email),
            Field::Message => self.message.chars().count() >= MIN_MESSAGE_CHARS,
        }
    }

    /// Multipart fields posted to the relay, in order.
    #[must_use]
    pub fn relay_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("message", self.message.clone()),
            ("_subject", format!("New message from {}", self.name)),
            ("_replyto", self.email.clone()),
        ]
    }

    #[must_use]
    pub fn success_message(&self) -> String {
        format!("Thanks, {}! Your message was sent.", self.name)
    }
}

/// Which status element a submission attempt ends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
}

impl Status {
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Success => STATUS_SUCCESS_SELECTOR,
            Self::Error => STATUS_ERROR_SELECTOR,
        }
    }

    /// Any 2xx relay response counts as delivered.
    #[must_use]
    pub const fn from_relay_status(status: u16) -> Self {
        if matches!(status, 200..=299) {
            Self::Success
        } else {
            Self::Error
        }
    }
}
