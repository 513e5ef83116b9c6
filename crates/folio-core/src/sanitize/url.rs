//! URL validation and image-source allow-listing.

use thiserror::Error;
use tracing::warn;
use url::Url;

/// Maximum accepted URL length.
const MAX_URL_LENGTH: usize = 2048;

/// Hosts the approved media CDN serves images from.
const ALLOWED_IMAGE_HOSTS: &[&str] = &["contentful.com", "ctfassets.net"];

/// Errors signalled by [`sanitize_image_url`].
///
/// This is the only sanitizer operation that fails outright; an image
/// from an unapproved host must never be emitted, not degraded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageSourceError {
    #[error("invalid image source: host '{0}' is not an approved media CDN")]
    DisallowedHost(String),

    #[error("invalid image source: unparsable absolute URL")]
    Malformed,
}

/// Checks whether a URL is safe to render as a clickable link.
///
/// Accepts only `http:`/`https:` schemes. Any string whose trimmed,
/// lowercased form starts with `javascript:` is rejected even if URL
/// parsing would otherwise succeed, as are URLs longer than 2048
/// characters and anything unparsable.
pub fn is_valid_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    if url.trim().to_lowercase().starts_with("javascript:") {
        return false;
    }
    url.len() <= MAX_URL_LENGTH
}

/// Reduces a URL to its safe display form (`host` + `path`).
///
/// Unparsable or non-http(s) URLs yield the fixed string `"Invalid URL"`
/// instead of echoing attacker-controlled input back.
pub fn sanitize_url_for_display(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
            format!("{}{}", parsed.host_str().unwrap_or_default(), parsed.path())
        }
        Ok(_) => "Invalid URL".to_string(),
        Err(_) => {
            warn!(url, "failed to parse URL for display");
            "Invalid URL".to_string()
        }
    }
}

/// Normalizes an image URL against the approved media CDN.
///
/// Protocol-relative URLs (`//...`) are upgraded to `https:`. Absolute
/// `http(s)` URLs pass through only when their host contains one of the
/// approved CDN domains. Everything else is treated as a CDN-relative
/// path and prefixed with `https:`.
pub fn sanitize_image_url(url: &str) -> Result<String, ImageSourceError> {
    if url.starts_with("//") {
        return Ok(format!("https:{url}"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        let parsed = Url::parse(url).map_err(|_| ImageSourceError::Malformed)?;
        let host = parsed.host_str().unwrap_or_default();
        if ALLOWED_IMAGE_HOSTS.iter().any(|allowed| host.contains(allowed)) {
            return Ok(url.to_string());
        }
        return Err(ImageSourceError::DisallowedHost(host.to_string()));
    }
    Ok(format!("https:{url}"))
}
