use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text generation backend. `LlmClient` in production.
    pub generator: Arc<dyn TextGenerator>,
    pub sessions: SessionStore,
}
