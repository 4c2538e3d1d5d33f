use std::sync::Arc;

use crate::analysis::orchestrator::AnalysisSettings;
use crate::extraction::DocumentDecoder;
use crate::llm_client::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable; requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    /// The language model. `LlmClient` in production, a scripted double in tests.
    pub llm: Arc<dyn LanguageModel>,
    pub decoder: Arc<DocumentDecoder>,
    pub analysis: AnalysisSettings,
    pub max_upload_bytes: usize,
}
