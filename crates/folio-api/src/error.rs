//! API error types and handling.
//!
//! Validation failures are reported in full; configuration and delivery
//! failures are logged server-side with complete detail and surfaced to
//! the caller only as fixed, generic messages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_connectors::{ContentError, DeliveryError};
use folio_core::validation::ValidationResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// API error type.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid query parameters, malformed input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Contact submission failed one or more validation rules.
    #[error("Validation failed")]
    Validation(ValidationResult),

    /// The delivery credential was not supplied at startup.
    #[error("Email delivery is not configured")]
    Configuration,

    /// The outbound email call failed.
    #[error("Email delivery failed: {0}")]
    Delivery(#[from] DeliveryError),

    /// The content store call failed.
    #[error("Content store request failed: {0}")]
    Content(#[from] ContentError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Per-rule failure messages, present for validation errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Content(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Validation(result) => ErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(result.messages()),
            },
            ApiError::Configuration => ErrorResponse {
                error: "Email delivery is not configured".to_string(),
                details: None,
            },
            ApiError::Delivery(err) => {
                // Full detail stays server-side.
                error!(error = %err, "email delivery failed");
                ErrorResponse {
                    error: "Unable to send your message right now. Please try again later."
                        .to_string(),
                    details: None,
                }
            }
            ApiError::Content(err) => {
                error!(error = %err, "content store request failed");
                ErrorResponse {
                    error: "Content is temporarily unavailable".to_string(),
                    details: None,
                }
            }
            ApiError::Internal(msg) => {
                error!(error = %msg, "internal error");
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    details: None,
                }
            }
            _ => ErrorResponse {
                error: self.to_string(),
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::validation::validate_submission;
    use serde_json::json;

    async fn body_of(response: Response) -> ErrorResponse {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation(ValidationResult::default()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Configuration.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Delivery(DeliveryError::RateLimited).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_validation_response_lists_all_details() {
        let result = validate_submission(&json!({}));
        let response = ApiError::Validation(result).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert_eq!(body.error, "Validation failed");
        assert_eq!(body.details.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_delivery_response_hides_detail() {
        let err = ApiError::Delivery(DeliveryError::Rejected {
            status: 400,
            body: "secret provider diagnostics".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert!(!body.error.contains("secret provider diagnostics"));
        assert!(body.details.is_none());
    }

    #[tokio::test]
    async fn test_configuration_response_fixed_message() {
        let body = body_of(ApiError::Configuration.into_response()).await;
        assert_eq!(body.error, "Email delivery is not configured");
    }
}
