//! SMTP2GO transactional email client.
//!
//! Speaks the v3 `/email/send` contract: a JSON payload authenticated
//! with an `X-Smtp2go-Api-Key` header.

use super::{DeliveryError, DeliveryReceipt, EmailMessage, Mailer};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Production endpoint for the delivery API.
const DEFAULT_BASE_URL: &str = "https://api.smtp2go.com/v3";

/// Request timeout for the single delivery call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A [`Mailer`] backed by the SMTP2GO HTTP API.
pub struct Smtp2goMailer {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl Smtp2goMailer {
    /// Creates a mailer against the production endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, DeliveryError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a mailer against a custom endpoint (used by tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DeliveryError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(DeliveryError::InvalidConfig(
                "API key cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DeliveryError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn payload<'a>(&self, message: &'a EmailMessage) -> SendPayload<'a> {
        SendPayload {
            sender: &message.from_email,
            to: vec![message.to_header()],
            subject: &message.subject,
            text_body: &message.text,
            html_body: message.html.as_deref(),
        }
    }
}

#[async_trait]
impl Mailer for Smtp2goMailer {
    #[instrument(skip(self, message), fields(to = %message.to_email))]
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, DeliveryError> {
        let url = format!("{}/email/send", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("X-Smtp2go-Api-Key", &self.api_key)
            .json(&self.payload(message))
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(format!("HTTP request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DeliveryError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            error!(status, "delivery API rejected message");
            return Err(DeliveryError::Rejected { status, body });
        }

        let parsed: SendResponse = response
            .json()
            .await
            .map_err(|e| DeliveryError::Transport(format!("invalid API response: {e}")))?;

        debug!(
            email_id = ?parsed.data.email_id,
            succeeded = parsed.data.succeeded,
            "delivery API accepted message"
        );

        Ok(DeliveryReceipt {
            email_id: parsed.data.email_id,
            succeeded: parsed.data.succeeded,
            accepted_at: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "smtp2go"
    }
}

/// Wire payload for `/email/send`.
#[derive(Debug, Serialize)]
struct SendPayload<'a> {
    sender: &'a str,
    to: Vec<String>,
    subject: &'a str,
    text_body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html_body: Option<&'a str>,
}

/// Wire response from `/email/send`.
#[derive(Debug, Deserialize)]
struct SendResponse {
    data: SendResponseData,
}

#[derive(Debug, Deserialize)]
struct SendResponseData {
    #[serde(default)]
    email_id: Option<String>,
    #[serde(default)]
    succeeded: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn message() -> EmailMessage {
        EmailMessage {
            to_email: "owner@example.com".to_string(),
            to_name: Some("Site Owner".to_string()),
            from_email: "noreply@example.com".to_string(),
            subject: "Contact From Portfolio".to_string(),
            text: "Name: Ada\nMessage: hello".to_string(),
            html: None,
        }
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let result = Smtp2goMailer::new("");
        assert!(matches!(result, Err(DeliveryError::InvalidConfig(_))));
    }

    #[test]
    fn test_name() {
        let mailer = Smtp2goMailer::new("key").unwrap();
        assert_eq!(mailer.name(), "smtp2go");
    }

    #[tokio::test]
    async fn test_send_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/email/send")
                    .header("X-Smtp2go-Api-Key", "test-key")
                    .json_body_partial(
                        r#"{
                            "sender": "noreply@example.com",
                            "to": ["Site Owner <owner@example.com>"],
                            "subject": "Contact From Portfolio"
                        }"#,
                    );
                then.status(200)
                    .json_body(serde_json::json!({
                        "data": { "email_id": "1a2b3c", "succeeded": 1 }
                    }));
            })
            .await;

        let mailer = Smtp2goMailer::with_base_url("test-key", server.base_url()).unwrap();
        let receipt = mailer.send(&message()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(receipt.email_id.as_deref(), Some("1a2b3c"));
        assert_eq!(receipt.succeeded, 1);
    }

    #[tokio::test]
    async fn test_send_omits_absent_html_body() {
        let server = MockServer::start_async().await;
        // Exact body match: an html_body key would fail the mock.
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/email/send").json_body(serde_json::json!({
                    "sender": "noreply@example.com",
                    "to": ["Site Owner <owner@example.com>"],
                    "subject": "Contact From Portfolio",
                    "text_body": "Name: Ada\nMessage: hello"
                }));
                then.status(200)
                    .json_body(serde_json::json!({ "data": { "succeeded": 1 } }));
            })
            .await;

        let mailer = Smtp2goMailer::with_base_url("test-key", server.base_url()).unwrap();
        mailer.send(&message()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/email/send");
                then.status(400).body(r#"{"data":{"error":"bad sender"}}"#);
            })
            .await;

        let mailer = Smtp2goMailer::with_base_url("test-key", server.base_url()).unwrap();
        let err = mailer.send(&message()).await.unwrap_err();
        match err {
            DeliveryError::Rejected { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("bad sender"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_rate_limited() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/email/send");
                then.status(429);
            })
            .await;

        let mailer = Smtp2goMailer::with_base_url("test-key", server.base_url()).unwrap();
        let err = mailer.send(&message()).await.unwrap_err();
        assert!(matches!(err, DeliveryError::RateLimited));
    }

    #[tokio::test]
    async fn test_send_unparsable_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/email/send");
                then.status(200).body("not json");
            })
            .await;

        let mailer = Smtp2goMailer::with_base_url("test-key", server.base_url()).unwrap();
        let err = mailer.send(&message()).await.unwrap_err();
        assert!(matches!(err, DeliveryError::Transport(_)));
    }
}
