//! Mock mailer for testing.
//!
//! Records every message handed to it and can be switched into a
//! failing mode to exercise delivery-error paths without network access.

use super::{DeliveryError, DeliveryReceipt, EmailMessage, Mailer};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A [`Mailer`] that records sent messages in memory.
#[derive(Clone, Default)]
pub struct MockMailer {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
    failure: Arc<RwLock<Option<String>>>,
}

impl MockMailer {
    /// Creates a mock mailer that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock mailer that fails every send with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: Arc::default(),
            failure: Arc::new(RwLock::new(Some(reason.into()))),
        }
    }

    /// Switches the mailer into failing mode.
    pub async fn set_failure(&self, reason: impl Into<String>) {
        *self.failure.write().await = Some(reason.into());
    }

    /// Clears failing mode.
    pub async fn clear_failure(&self) {
        *self.failure.write().await = None;
    }

    /// Messages accepted so far, in send order.
    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }

    /// Number of messages accepted so far.
    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, DeliveryError> {
        if let Some(reason) = self.failure.read().await.clone() {
            return Err(DeliveryError::Transport(reason));
        }

        self.sent.write().await.push(message.clone());
        Ok(DeliveryReceipt {
            email_id: Some(format!("mock-{}", self.sent.read().await.len())),
            succeeded: 1,
            accepted_at: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
