//! Application state shared across handlers.

use folio_connectors::{ContentClient, Mailer};
use std::sync::Arc;

/// Shared application state.
///
/// Collaborators are injected at construction. The mailer is `None` when
/// no delivery credential was supplied; the contact handler surfaces that
/// as a configuration error, checked after input validation so callers
/// still get their validation feedback.
#[derive(Clone, Default)]
pub struct AppState {
    /// Email delivery collaborator.
    pub mailer: Option<Arc<dyn Mailer>>,
    /// Headless content store, absent when unconfigured.
    pub content: Option<Arc<ContentClient>>,
}

impl AppState {
    /// Creates an application state with the given collaborators.
    pub fn new(mailer: Option<Arc<dyn Mailer>>, content: Option<Arc<ContentClient>>) -> Self {
        Self { mailer, content }
    }

    /// Returns a copy with the mailer set.
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Returns a copy with the content client set.
    pub fn with_content(mut self, content: Arc<ContentClient>) -> Self {
        self.content = Some(content);
        self
    }
}
