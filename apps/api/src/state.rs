use std::sync::Arc;

use crate::config::Config;
use crate::layout::PageConfig;
use crate::llm_client::GenerativeModel;
use crate::store::ArtifactStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: ArtifactStore,
    /// The generative model behind the analysis step. `LlmClient` in production.
    pub model: Arc<dyn GenerativeModel>,
    pub config: Config,
    /// Page geometry for generated documents: A4, 50pt margins, Times-Roman 12pt.
    pub page_config: PageConfig,
}
