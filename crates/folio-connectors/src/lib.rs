//! # folio-connectors
//!
//! Outbound collaborators for the folio portfolio backend: the
//! transactional email delivery API and the headless content store.
//! Each connector owns its HTTP client and error taxonomy; nothing in
//! this crate renders or validates user input (that is `folio-core`).

pub mod content;
pub mod email;

pub use content::{ContentClient, ContentError, Entry, ProjectFields};
pub use email::{DeliveryError, DeliveryReceipt, EmailMessage, Mailer, MockMailer, Smtp2goMailer};
