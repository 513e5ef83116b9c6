//! Contact-submission validation.
//!
//! A submission arrives as untyped JSON and is checked field by field.
//! Every failing rule is accumulated rather than short-circuiting, so a
//! caller fixing a malformed request sees the full picture in one round
//! trip. Rules are reported in field order (`to`, `from`, `subject`,
//! `text`, `html`), not alphabetically.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

/// Maximum length of an email address per RFC 5321.
const MAX_EMAIL_LENGTH: usize = 254;
/// Maximum length of the subject line.
const MAX_SUBJECT_LENGTH: usize = 255;
/// Maximum length of the text and html bodies.
const MAX_BODY_LENGTH: usize = 100_000;

/// Basic email-address grammar: one `@`, no whitespace, dotted domain.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("invalid email pattern"))
}

/// A single failed validation rule, tagged with the field it concerns.
///
/// The field identifier (`to.email`, `subject`, ...) lets a form UI
/// associate the message with the offending input for assistive
/// technology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Dotted path of the offending field, e.g. `to.email`.
    pub field: &'static str,
    /// Human-readable message for diagnostic display.
    pub message: String,
}

/// Outcome of validating an untyped contact submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    violations: Vec<FieldViolation>,
}

impl ValidationResult {
    /// True iff no rule failed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// All failed rules, in check order.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// The failure messages, in check order.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field,
            message: message.into(),
        });
    }
}

/// A destination address for the relayed email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The sender address for the relayed email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub email: String,
}

/// A contact-form submission that has passed validation.
///
/// Instances can only be obtained through [`ContactSubmission::from_value`],
/// so holding one guarantees the shape, format, and length rules were
/// satisfied. Submissions are built per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub to: Recipient,
    pub from: Sender,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

impl ContactSubmission {
    /// Validates an untyped record and converts it on success.
    ///
    /// On failure the full [`ValidationResult`] is returned so every
    /// violation can be reported at once.
    pub fn from_value(value: &Value) -> Result<Self, ValidationResult> {
        let result = validate_submission(value);
        if !result.is_valid() {
            return Err(result);
        }

        // Shape is guaranteed by the checks above; the fallbacks are
        // unreachable but keep this constructor panic-free.
        let to = &value["to"];
        let from = &value["from"];
        Ok(Self {
            to: Recipient {
                email: to["email"].as_str().unwrap_or_default().to_string(),
                name: to.get("name").and_then(Value::as_str).map(str::to_string),
            },
            from: Sender {
                email: from["email"].as_str().unwrap_or_default().to_string(),
            },
            subject: value["subject"].as_str().unwrap_or_default().to_string(),
            text: value["text"].as_str().unwrap_or_default().to_string(),
            html: value.get("html").and_then(Value::as_str).map(str::to_string),
        })
    }
}

/// Checks the shape and constraints of a contact submission.
///
/// Pure function of its input: no side effects, never panics. All
/// failures are accumulated; `is_valid` is true iff zero rules failed.
pub fn validate_submission(value: &Value) -> ValidationResult {
    let mut result = ValidationResult::default();

    check_address(value.get("to"), "to.email", Some("to.name"), &mut result);
    check_address(value.get("from"), "from.email", None, &mut result);
    check_required_text(value.get("subject"), "subject", MAX_SUBJECT_LENGTH, &mut result);
    check_required_text(value.get("text"), "text", MAX_BODY_LENGTH, &mut result);
    check_optional_html(value.get("html"), &mut result);

    result
}

fn check_address(
    value: Option<&Value>,
    email_field: &'static str,
    name_field: Option<&'static str>,
    result: &mut ValidationResult,
) {
    let Some(obj) = value.and_then(Value::as_object) else {
        result.push(
            email_field,
            format!("`{email_field}` is required and must be a string"),
        );
        return;
    };

    match obj.get("email").and_then(Value::as_str) {
        None => result.push(
            email_field,
            format!("`{email_field}` is required and must be a string"),
        ),
        Some(email) if email.len() > MAX_EMAIL_LENGTH => result.push(
            email_field,
            format!("`{email_field}` exceeds {MAX_EMAIL_LENGTH} characters"),
        ),
        Some(email) if !email_regex().is_match(email) => result.push(
            email_field,
            format!("`{email_field}` is not a valid email address"),
        ),
        Some(_) => {}
    }

    if let Some(name_field) = name_field {
        if let Some(name) = obj.get("name") {
            if !name.is_null() && !name.is_string() {
                result.push(name_field, format!("`{name_field}` must be a string"));
            }
        }
    }
}

fn check_required_text(
    value: Option<&Value>,
    field: &'static str,
    max_len: usize,
    result: &mut ValidationResult,
) {
    match value.and_then(Value::as_str) {
        None => result.push(
            field,
            format!("`{field}` is required and must be a non-empty string"),
        ),
        Some(s) if s.is_empty() => result.push(
            field,
            format!("`{field}` is required and must be a non-empty string"),
        ),
        Some(s) if s.len() > max_len => {
            result.push(field, format!("`{field}` exceeds {max_len} characters"))
        }
        Some(_) => {}
    }
}

fn check_optional_html(value: Option<&Value>, result: &mut ValidationResult) {
    match value {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) if s.len() > MAX_BODY_LENGTH => result.push(
            "html",
            format!("`html` exceeds {MAX_BODY_LENGTH} characters"),
        ),
        Some(Value::String(_)) => {}
        Some(_) => result.push("html", "`html` must be a string"),
    }
}
