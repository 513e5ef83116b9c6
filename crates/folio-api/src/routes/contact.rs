//! Contact-form relay endpoint.
//!
//! The body arrives as untyped JSON and is validated server-side; this
//! is the authoritative check regardless of what any form UI verified.
//! On success every free-text field is escaped once, here, before the
//! payload is handed to the delivery collaborator.

use axum::{extract::State, routing::post, Json, Router};
use serde_json::Value;
use tracing::info;

use crate::dto::ContactAccepted;
use crate::error::ApiError;
use crate::state::AppState;
use folio_connectors::EmailMessage;
use folio_core::sanitize::{escape_html, sanitize_subject};
use folio_core::validation::ContactSubmission;

/// Creates contact routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(submit_contact))
}

/// Relay a contact-form submission.
#[utoipa::path(
    post,
    path = "/api/contact",
    responses(
        (status = 200, description = "Submission relayed", body = ContactAccepted),
        (status = 400, description = "One or more fields failed validation", body = crate::error::ErrorResponse),
        (status = 500, description = "Delivery unconfigured or failed", body = crate::error::ErrorResponse)
    ),
    tag = "Contact"
)]
pub(crate) async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<ContactAccepted>, ApiError> {
    let submission = ContactSubmission::from_value(&payload).map_err(ApiError::Validation)?;

    // Credential presence is checked after validation so a caller with a
    // malformed request still gets the full rule report.
    let mailer = state.mailer.as_ref().ok_or(ApiError::Configuration)?;

    let message = EmailMessage {
        to_email: submission.to.email,
        to_name: submission.to.name,
        from_email: submission.from.email,
        subject: escape_html(&sanitize_subject(&submission.subject)),
        text: escape_html(&submission.text),
        html: submission.html,
    };

    let receipt = mailer.send(&message).await?;

    info!(
        mailer = mailer.name(),
        succeeded = receipt.succeeded,
        "contact submission relayed"
    );

    Ok(Json(ContactAccepted {
        ok: true,
        result: receipt.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use folio_connectors::{Mailer, MockMailer};
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::error::ErrorResponse;

    fn test_router(state: AppState) -> Router {
        Router::new().nest("/api/contact", routes()).with_state(state)
    }

    fn post_json(payload: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    fn valid_payload() -> serde_json::Value {
        json!({
            "to": { "email": "owner@example.com", "name": "Site Owner" },
            "from": { "email": "noreply@example.com" },
            "subject": "Contact From Portfolio",
            "text": "Name: Ada Lovelace\nMessage: hello"
        })
    }

    async fn response_json<T: serde::de::DeserializeOwned>(
        response: axum::response::Response,
    ) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_valid_submission_relayed() {
        let mailer = Arc::new(MockMailer::new());
        let state = AppState::default().with_mailer(mailer.clone());
        let app = test_router(state);

        let response = app.oneshot(post_json(&valid_payload())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: ContactAccepted = response_json(response).await;
        assert!(body.ok);
        assert_eq!(body.result.succeeded, 1);
        assert_eq!(mailer.sent_count().await, 1);
    }

    #[tokio::test]
    async fn test_free_text_escaped_before_relay() {
        let mailer = Arc::new(MockMailer::new());
        let state = AppState::default().with_mailer(mailer.clone());
        let app = test_router(state);

        let mut payload = valid_payload();
        payload["text"] = json!("Message: <script>alert('x')</script>");
        payload["subject"] = json!("Hi & bye");

        let response = app.oneshot(post_json(&payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let sent = mailer.sent().await;
        assert_eq!(
            sent[0].text,
            "Message: &lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"
        );
        assert_eq!(sent[0].subject, "Hi &amp; bye");
    }

    #[tokio::test]
    async fn test_subject_header_injection_stripped() {
        let mailer = Arc::new(MockMailer::new());
        let state = AppState::default().with_mailer(mailer.clone());
        let app = test_router(state);

        let mut payload = valid_payload();
        payload["subject"] = json!("Hello\r\nBcc: attacker@evil.example");

        app.oneshot(post_json(&payload)).await.unwrap();

        let sent = mailer.sent().await;
        assert!(!sent[0].subject.contains('\r'));
        assert!(!sent[0].subject.contains('\n'));
    }

    #[tokio::test]
    async fn test_validation_failure_reports_every_rule() {
        let mailer = Arc::new(MockMailer::new());
        let state = AppState::default().with_mailer(mailer.clone());
        let app = test_router(state);

        let response = app.oneshot(post_json(&json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = response_json(response).await;
        let details = body.details.unwrap();
        assert_eq!(details.len(), 4);
        assert!(details[0].contains("to.email"));
        assert!(details[1].contains("from.email"));

        // Nothing was relayed.
        assert_eq!(mailer.sent_count().await, 0);
    }

    #[tokio::test]
    async fn test_malformed_from_email_rejected() {
        let state = AppState::default().with_mailer(Arc::new(MockMailer::new()));
        let app = test_router(state);

        let mut payload = valid_payload();
        payload["from"]["email"] = json!("bad-email");

        let response = app.oneshot(post_json(&payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = response_json(response).await;
        assert!(body.details.unwrap()[0].contains("from.email"));
    }

    #[tokio::test]
    async fn test_missing_mailer_is_configuration_error() {
        let app = test_router(AppState::default());

        let response = app.oneshot(post_json(&valid_payload())).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorResponse = response_json(response).await;
        assert_eq!(body.error, "Email delivery is not configured");
    }

    #[tokio::test]
    async fn test_validation_reported_even_when_unconfigured() {
        // Input validation runs before the credential check.
        let app = test_router(AppState::default());

        let response = app.oneshot(post_json(&json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delivery_failure_hides_detail() {
        let mailer = Arc::new(MockMailer::failing("connection reset by provider"));
        let state = AppState::default().with_mailer(mailer.clone() as Arc<dyn Mailer>);
        let app = test_router(state);

        let response = app.oneshot(post_json(&valid_payload())).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorResponse = response_json(response).await;
        assert!(!body.error.contains("connection reset"));
        assert!(body.error.contains("try again later"));
    }

    #[tokio::test]
    async fn test_html_body_relayed_unescaped() {
        let mailer = Arc::new(MockMailer::new());
        let state = AppState::default().with_mailer(mailer.clone());
        let app = test_router(state);

        let mut payload = valid_payload();
        payload["html"] = json!("<p>formatted</p>");

        app.oneshot(post_json(&payload)).await.unwrap();
        assert_eq!(mailer.sent().await[0].html.as_deref(), Some("<p>formatted</p>"));
    }
}
