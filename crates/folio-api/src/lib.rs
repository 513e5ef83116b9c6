//! # folio-api
//!
//! HTTP API for the folio portfolio backend: the authoritative
//! contact-form relay endpoint, a read-only sanitized content surface,
//! and health probes, wrapped in security-header, request-ID, and
//! logging middleware.

pub mod dto;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{ApiServer, ApiServerConfig};
pub use state::AppState;
