//! Sanitization primitives for untrusted strings.
//!
//! These functions neutralize user-controlled or content-managed text
//! before it reaches an HTML or email rendering context. Every operation
//! is a stateless, idempotent transform; apart from [`sanitize_image_url`]
//! they degrade gracefully (substitute a safe default or drop unsafe
//! content) instead of failing.

mod html;
mod subject;
mod url;

pub use html::escape_html;
pub use subject::sanitize_subject;
pub use url::{is_valid_url, sanitize_image_url, sanitize_url_for_display, ImageSourceError};
