//! Handoff to the chat messaging channel.
//!
//! Quotes and contact requests leave the application as a chat link that
//! opens a conversation with the consultancy's contact number, the message
//! body pre-filled. This module only builds the link; opening it is up to
//! the caller.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_CHAT_BASE_URL: &str = "https://wa.me/";

/// Consultancy contact number in international format, digits only.
pub const DEFAULT_CONTACT_NUMBER: &str = "919647457831";

/// Characters escaped in the message body: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, the set web clients leave as is.
const MESSAGE_BODY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagingError {
    #[error("invalid chat base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("chat base URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("contact phone number '{0}' contains no digits")]
    EmptyPhoneNumber(String),
}

/// Builds chat links addressed to a single contact number.
///
/// # Example
///
/// ```
/// use quote_core::ChatLinkBuilder;
///
/// let builder = ChatLinkBuilder::new("https://wa.me/", "+91 96474 57831").unwrap();
/// let link = builder.link("Hello there!");
///
/// assert_eq!(link.as_str(), "https://wa.me/919647457831?text=Hello%20there!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLinkBuilder {
    target: Url,
    phone_number: String,
}

impl ChatLinkBuilder {
    /// Creates a builder for `phone_number` under `base_url`.
    ///
    /// Everything but ASCII digits is stripped from the phone number, so
    /// `+91 96474 57831` and `919647457831` address the same chat.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError`] if the base URL does not parse, is not
    /// http(s), or the phone number has no digits.
    pub fn new(
        base_url: &str,
        phone_number: &str,
    ) -> Result<Self, MessagingError> {
        let mut base = Url::parse(base_url)?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(MessagingError::UnsupportedScheme(base.scheme().to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let digits: String = phone_number.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(MessagingError::EmptyPhoneNumber(phone_number.to_string()));
        }

        let target = base.join(&digits)?;
        Ok(Self {
            target,
            phone_number: digits,
        })
    }

    /// The normalized, digits-only contact number.
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Returns the chat link with `text` percent-encoded as the message body.
    ///
    /// Spaces become `%20`, never `+`.
    pub fn link(
        &self,
        text: &str,
    ) -> Url {
        let encoded = utf8_percent_encode(text, MESSAGE_BODY);
        let mut url = self.target.clone();
        url.set_query(Some(&format!("text={encoded}")));
        url
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("name is required")]
    MissingName,

    #[error("email is required")]
    MissingEmail,

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

/// Details entered in the contact form.
///
/// Optional fields left blank are treated the same as absent ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub budget: Option<String>,
    pub services: Vec<String>,
    pub message: Option<String>,
}

impl ContactDetails {
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::MissingName);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ContactError::MissingEmail);
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ContactError::InvalidEmail(self.email.clone())),
        }
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Composes the chat message for a contact form submission.
pub fn compose_contact_message(details: &ContactDetails) -> String {
    let mut message = String::from("Hi! I'm interested in your IT services.\n\n");
    message.push_str("*Contact Details:*\n");
    message.push_str(&format!("Name: {}\n", details.name.trim()));
    message.push_str(&format!("Email: {}\n", details.email.trim()));

    if let Some(phone) = present(&details.phone) {
        message.push_str(&format!("Phone: {phone}\n"));
    }
    if let Some(company) = present(&details.company) {
        message.push_str(&format!("Company: {company}\n"));
    }
    if let Some(budget) = present(&details.budget) {
        message.push_str(&format!("Budget: {budget}\n"));
    }
    if !details.services.is_empty() {
        message.push_str(&format!(
            "Services Interested: {}\n",
            details.services.join(", ")
        ));
    }
    if let Some(project) = present(&details.message) {
        message.push_str(&format!("\n*Project Details:*\n{project}"));
    }

    message.push_str("\n\nPlease contact me to discuss further. Thank you!");
    message
}
