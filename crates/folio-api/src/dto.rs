//! Data Transfer Objects (DTOs) for API requests and responses.

use folio_connectors::DeliveryReceipt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ============================================================================
// Contact DTOs
// ============================================================================

/// Response for an accepted contact submission.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactAccepted {
    pub ok: bool,
    pub result: DeliveryResult,
}

/// Delivery acknowledgement relayed to the caller.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeliveryResult {
    pub email_id: Option<String>,
    pub succeeded: u32,
}

impl From<DeliveryReceipt> for DeliveryResult {
    fn from(receipt: DeliveryReceipt) -> Self {
        Self {
            email_id: receipt.email_id,
            succeeded: receipt.succeeded,
        }
    }
}

// ============================================================================
// Project DTOs
// ============================================================================

/// Query parameters for listing projects.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ListProjectsQuery {
    /// Maximum number of projects to return.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

/// One project in the listing, with its summary rendered as a sanitized
/// HTML fragment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectSummary {
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Full project detail with rendered description.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectDetail {
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    /// Escaped plain-text summary, truncated for use as a meta description.
    pub meta_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// ============================================================================
// Health DTOs
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub mailer_configured: bool,
    pub content_configured: bool,
    pub uptime_seconds: u64,
}
