use std::sync::Arc;

use sqlx::PgPool;

use crate::analytics::insights::InsightEngine;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable analytics insight engine. Default: LlmInsightEngine.
    pub insight_engine: Arc<dyn InsightEngine>,
}
