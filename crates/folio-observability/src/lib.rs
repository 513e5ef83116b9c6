//! # folio-observability
//!
//! Observability infrastructure for the folio portfolio backend.

pub mod logging;

pub use logging::{init_logging, init_logging_with_config, LoggingConfig};
