use std::sync::Arc;

use crate::config::Config;
use crate::extraction::MatchingBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Extraction, skill matching and feedback. Default: `LlmBackend`.
    pub backend: Arc<dyn MatchingBackend>,
}
