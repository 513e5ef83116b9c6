//! Email delivery connectors.
//!
//! The contact endpoint performs exactly one outbound delivery call per
//! submission, awaited to completion, with no retries. Implementations
//! of [`Mailer`] are expected to surface failures through
//! [`DeliveryError`]; the API layer decides what (little) of that the
//! caller gets to see.

pub mod mock;
pub mod smtp2go;

pub use mock::MockMailer;
pub use smtp2go::Smtp2goMailer;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while relaying an email.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The connector was constructed with unusable configuration.
    #[error("invalid mailer configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP request could not be completed.
    #[error("email API request failed: {0}")]
    Transport(String),

    /// The delivery API rejected the message.
    #[error("email API returned {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The delivery API rate limit was hit.
    #[error("email API rate limit exceeded")]
    RateLimited,
}

/// A fully prepared outbound message.
///
/// Free-text fields are expected to be sanitized before construction;
/// connectors transmit them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to_email: String,
    pub to_name: Option<String>,
    pub from_email: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

impl EmailMessage {
    /// The destination in `Name <address>` form when a name is present.
    pub fn to_header(&self) -> String {
        match &self.to_name {
            Some(name) => format!("{} <{}>", name, self.to_email),
            None => self.to_email.clone(),
        }
    }
}

/// Acknowledgement returned by the delivery API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Provider-assigned message identifier, when one is returned.
    pub email_id: Option<String>,
    /// Number of recipients the provider accepted the message for.
    pub succeeded: u32,
    /// When this service recorded the acceptance.
    pub accepted_at: DateTime<Utc>,
}

/// An email delivery collaborator.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Relays one message, awaited to completion.
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, DeliveryError>;

    /// Connector name for logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_header_with_name() {
        let message = EmailMessage {
            to_email: "owner@example.com".to_string(),
            to_name: Some("Site Owner".to_string()),
            from_email: "noreply@example.com".to_string(),
            subject: "s".to_string(),
            text: "t".to_string(),
            html: None,
        };
        assert_eq!(message.to_header(), "Site Owner <owner@example.com>");
    }

    #[test]
    fn test_to_header_without_name() {
        let message = EmailMessage {
            to_email: "owner@example.com".to_string(),
            to_name: None,
            from_email: "noreply@example.com".to_string(),
            subject: "s".to_string(),
            text: "t".to_string(),
            html: None,
        };
        assert_eq!(message.to_header(), "owner@example.com");
    }
}
