use std::sync::Arc;

use crate::analysis::session::SessionStore;
use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model backend. `GeminiClient` in production.
    pub generator: Arc<dyn TextGenerator>,
    /// The current session's analysis, if any.
    pub session: SessionStore,
    pub config: Config,
}
