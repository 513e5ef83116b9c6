//! Input validation for contact submissions.
//!
//! This module provides the authoritative rule set for contact-form
//! requests. The rules are defined once here so every check site (the
//! HTTP handler, any interactive front end) consumes the same
//! specification instead of drifting apart.
//!
//! # Security
//!
//! The validator operates on untyped JSON so it can report *shape*
//! failures (wrong type, missing field) the same way it reports format
//! and length failures, and it never panics on malformed input.

pub mod submission;

pub use submission::{
    validate_submission, ContactSubmission, FieldViolation, Recipient, Sender, ValidationResult,
};
