use std::sync::Arc;

use crate::auth::CredentialStore;
use crate::config::Config;
use crate::llm_client::LlmGateway;
use crate::render::PageLayout;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// LLM Gateway. `LlmClient` in production, a scripted stub in tests.
    pub llm: Arc<dyn LlmGateway>,
    pub credentials: Arc<dyn CredentialStore>,
    pub config: Config,
    /// Page geometry and type sizes for the PDF renderer.
    pub page_layout: PageLayout,
}
