//! # folio-core
//!
//! Domain logic for the folio portfolio backend.
//!
//! This crate provides the contact-submission validator, the sanitization
//! primitives (HTML escaping, URL validation, image-source allow-listing),
//! and the rich-text document model with its safe HTML renderer.
//!
//! Everything here is a pure, synchronous transform over in-memory data;
//! the only side effect is diagnostic logging. All I/O lives in
//! `folio-connectors` and `folio-api`.

pub mod richtext;
pub mod sanitize;
pub mod validation;

pub use richtext::{HeadingLevel, Marks, RichTextDocument, RichTextNode};
pub use sanitize::{
    escape_html, is_valid_url, sanitize_image_url, sanitize_subject, sanitize_url_for_display,
    ImageSourceError,
};
pub use validation::{
    validate_submission, ContactSubmission, FieldViolation, Recipient, Sender, ValidationResult,
};
