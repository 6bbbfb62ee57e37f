//! Simulated contact form submission.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use handcraft_core::{Email, EmailError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Raw form input, as typed by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Check that every field is filled in and the email is well formed.
    ///
    /// Fields are checked in form order and the first problem is reported.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::MissingField`] for a blank field or
    /// [`ContactError::InvalidEmail`] for a malformed address.
    pub fn validate(&self) -> Result<ContactMessage, ContactError> {
        let name = required("name", &self.name)?;
        let email = Email::parse(&required("email", &self.email)?)?;
        let subject = required("subject", &self.subject)?;
        let message = required("message", &self.message)?;
        Ok(ContactMessage {
            name,
            email,
            subject,
            message,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ContactError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContactError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

/// Acknowledgement returned after a message is accepted.
#[derive(Debug, Clone, Serialize)]
pub struct ContactReceipt {
    pub reference: Uuid,
    pub received_at: DateTime<Utc>,
    pub email: Email,
    pub subject: String,
}

/// Validate `form`, wait out `delay`, and acknowledge it.
///
/// Validation happens before the delay, so a bad form fails immediately.
///
/// # Errors
///
/// Returns a [`ContactError`] if the form does not validate.
pub async fn submit(form: &ContactForm, delay: Duration) -> Result<ContactReceipt, ContactError> {
    let message = form.validate()?;
    tokio::time::sleep(delay).await;

    let receipt = ContactReceipt {
        reference: Uuid::new_v4(),
        received_at: Utc::now(),
        email: message.email,
        subject: message.subject,
    };
    tracing::info!(reference = %receipt.reference, "contact message received");
    Ok(receipt)
}
