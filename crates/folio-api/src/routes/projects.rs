//! Sanitized content endpoints.
//!
//! Projects come from the headless content store; their rich-text fields
//! are rendered to safe HTML fragments and their image references pass
//! through the media-CDN allow-list before anything reaches a caller.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::warn;
use validator::Validate;

use crate::dto::{ListProjectsQuery, ProjectDetail, ProjectSummary};
use crate::error::ApiError;
use crate::state::AppState;
use folio_connectors::content::{Entry, ImageAsset, ProjectFields};
use folio_core::sanitize::{escape_html, sanitize_image_url};

/// Plain-text summary length used for meta descriptions.
const META_DESCRIPTION_LENGTH: usize = 160;

/// Creates project routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects))
        .route("/:slug", get(get_project))
}

/// List projects marked for display, ordered for presentation.
#[utoipa::path(
    get,
    path = "/api/projects",
    params(
        ("limit" = Option<u32>, Query, description = "Maximum number of projects to return")
    ),
    responses(
        (status = 200, description = "Displayable projects", body = Vec<ProjectSummary>),
        (status = 400, description = "Invalid query parameters", body = crate::error::ErrorResponse),
        (status = 502, description = "Content store unavailable", body = crate::error::ErrorResponse)
    ),
    tag = "Projects"
)]
pub(crate) async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListProjectsQuery>,
) -> Result<Json<Vec<ProjectSummary>>, ApiError> {
    query.validate()?;
    let content = state.content.as_ref().ok_or_else(content_unconfigured)?;

    let projects = content.projects().await?;
    let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);

    let summaries = projects
        .into_iter()
        .filter(|entry| entry.fields.display_on_site)
        .take(limit)
        .map(to_summary)
        .collect();

    Ok(Json(summaries))
}

/// Get a single project by slug.
#[utoipa::path(
    get,
    path = "/api/projects/{slug}",
    params(
        ("slug" = String, Path, description = "Project slug")
    ),
    responses(
        (status = 200, description = "Project detail", body = ProjectDetail),
        (status = 404, description = "Unknown or invalid slug", body = crate::error::ErrorResponse),
        (status = 502, description = "Content store unavailable", body = crate::error::ErrorResponse)
    ),
    tag = "Projects"
)]
pub(crate) async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProjectDetail>, ApiError> {
    let content = state.content.as_ref().ok_or_else(content_unconfigured)?;

    let entry = content
        .project_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("project not found".to_string()))?;

    Ok(Json(to_detail(entry)))
}

fn content_unconfigured() -> ApiError {
    ApiError::Internal("content store is not configured".to_string())
}

/// Resolves an asset reference to a safe image URL.
///
/// An image outside the approved CDN is dropped and logged; it must not
/// fail the whole listing.
fn safe_image_url(asset: Option<&ImageAsset>) -> Option<String> {
    let asset = asset?;
    match sanitize_image_url(&asset.fields.file.url) {
        Ok(url) => Some(url),
        Err(err) => {
            warn!(error = %err, "dropping image with invalid source");
            None
        }
    }
}

fn to_summary(entry: Entry<ProjectFields>) -> ProjectSummary {
    let image_url = safe_image_url(entry.fields.featured_image.as_ref());
    ProjectSummary {
        title: entry.fields.title,
        slug: entry.fields.slug,
        url: entry.fields.url,
        summary_html: entry.fields.summary.map(|doc| doc.to_html()),
        image_url,
    }
}

fn to_detail(entry: Entry<ProjectFields>) -> ProjectDetail {
    let image_url = safe_image_url(entry.fields.featured_image.as_ref());
    let summary_text = entry
        .fields
        .summary
        .as_ref()
        .map(|doc| doc.to_plain_text())
        .unwrap_or_default();
    let meta_description = escape_html(
        &summary_text
            .chars()
            .take(META_DESCRIPTION_LENGTH)
            .collect::<String>(),
    );

    ProjectDetail {
        title: entry.fields.title,
        slug: entry.fields.slug,
        url: entry.fields.url,
        description_html: entry.fields.description.map(|doc| doc.to_html()),
        meta_description,
        image_url,
    }
}
