//! Health check endpoints.

use axum::{extract::State, routing::get, Json, Router};
use std::time::Instant;

use crate::dto::HealthResponse;
use crate::state::AppState;

/// Start time for uptime calculation.
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initialize the start time.
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/live", get(liveness_check))
}

/// Health check endpoint.
///
/// The service has no critical local dependency, so it always answers
/// 200; a missing delivery credential is reported as `degraded`.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "System health", body = HealthResponse)
    ),
    tag = "Health"
)]
pub(crate) async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);
    let mailer_configured = state.mailer.is_some();
    let content_configured = state.content.is_some();

    let status = if mailer_configured { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mailer_configured,
        content_configured,
        uptime_seconds: uptime,
    })
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = "Health"
)]
pub(crate) async fn liveness_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}
