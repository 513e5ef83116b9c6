//! Content-delivery client for the headless content store.
//!
//! Entries are queried by content-type name from the store's CDN API.
//! Their fields carry the rich-text documents and asset references that
//! `folio-core` renders; this client only fetches and decodes them.

use folio_core::richtext::RichTextDocument;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Production CDN endpoint.
const DEFAULT_BASE_URL: &str = "https://cdn.contentful.com";

/// Request timeout for content queries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Maximum accepted slug length.
const MAX_SLUG_LENGTH: usize = 100;

fn slug_regex() -> &'static Regex {
    static SLUG_RE: OnceLock<Regex> = OnceLock::new();
    SLUG_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9\-_]+$").expect("invalid slug pattern"))
}

/// Errors that can occur while querying the content store.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The client was constructed with unusable configuration.
    #[error("invalid content client configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP request could not be completed.
    #[error("content API request failed: {0}")]
    Transport(String),

    /// The content API returned a non-success status.
    #[error("content API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body did not match the expected entry shape.
    #[error("content API response could not be decoded: {0}")]
    Decode(String),
}

/// A collection of entries returned by the content store.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryCollection<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<Entry<T>>,
}

/// A single content entry; all meaning lives in its `fields`.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry<T> {
    pub fields: T,
}

/// Fields of a portfolio project entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFields {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub display_on_site: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub summary: Option<RichTextDocument>,
    #[serde(default)]
    pub description: Option<RichTextDocument>,
    #[serde(default)]
    pub featured_image: Option<ImageAsset>,
}

/// An asset reference carrying an image URL.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageAsset {
    pub fields: ImageAssetFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageAssetFields {
    pub file: ImageFile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageFile {
    pub url: String,
}

/// Read-only client for the content store's delivery API.
pub struct ContentClient {
    space_id: String,
    access_token: String,
    base_url: String,
    client: reqwest::Client,
}

impl ContentClient {
    /// Creates a client against the production CDN.
    pub fn new(
        space_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, ContentError> {
        Self::with_base_url(space_id, access_token, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom endpoint (used by tests).
    pub fn with_base_url(
        space_id: impl Into<String>,
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ContentError> {
        let space_id = space_id.into();
        let access_token = access_token.into();
        if space_id.is_empty() {
            return Err(ContentError::InvalidConfig(
                "space id cannot be empty".to_string(),
            ));
        }
        if access_token.is_empty() {
            return Err(ContentError::InvalidConfig(
                "access token cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ContentError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            space_id,
            access_token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Checks whether a slug is safe to use in a query.
    ///
    /// Slugs come from request paths, so anything outside
    /// `[A-Za-z0-9-_]{1,100}` is refused before it reaches the store.
    pub fn is_valid_slug(slug: &str) -> bool {
        slug.len() <= MAX_SLUG_LENGTH && slug_regex().is_match(slug)
    }

    /// Fetches all entries of a content type.
    #[instrument(skip(self))]
    pub async fn entries<T: DeserializeOwned>(
        &self,
        content_type: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<EntryCollection<T>, ContentError> {
        let url = format!(
            "{}/spaces/{}/environments/master/entries",
            self.base_url, self.space_id
        );

        let mut params: Vec<(&str, &str)> = vec![
            ("content_type", content_type),
            ("access_token", self.access_token.as_str()),
        ];
        params.extend_from_slice(extra_params);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ContentError::Transport(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(ContentError::Api { status, body });
        }

        let collection: EntryCollection<T> = response
            .json()
            .await
            .map_err(|e| ContentError::Decode(e.to_string()))?;

        debug!(content_type, items = collection.items.len(), "fetched entries");
        Ok(collection)
    }

    /// Fetches every project entry, ordered for display.
    pub async fn projects(&self) -> Result<Vec<Entry<ProjectFields>>, ContentError> {
        let mut collection = self.entries::<ProjectFields>("project", &[]).await?;
        collection.items.sort_by_key(|entry| entry.fields.order);
        Ok(collection.items)
    }

    /// Looks up a single project by slug.
    ///
    /// An invalid slug short-circuits to `None` without touching the
    /// store, the same outcome as a slug that matches nothing.
    pub async fn project_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Entry<ProjectFields>>, ContentError> {
        if !Self::is_valid_slug(slug) {
            return Ok(None);
        }

        let collection = self
            .entries::<ProjectFields>("project", &[("fields.slug[match]", slug)])
            .await?;
        Ok(collection.items.into_iter().next())
    }
}
