use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::InferenceBackend;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; nothing is shared between requests but this.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable inference backend. Default: `InferenceClient` over HTTP.
    pub inference: Arc<dyn InferenceBackend>,
}
