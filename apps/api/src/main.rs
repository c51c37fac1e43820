mod analytics;
mod chatbot;
mod config;
mod db;
mod employees;
mod errors;
mod llm_client;
mod models;
mod recruitment;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analytics::insights::LlmInsightEngine;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_directive(&config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HR API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.database_max_connections).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize analytics insight engine
    let insight_engine = Arc::new(LlmInsightEngine::new(llm.clone()));

    // Build app state
    let state = AppState {
        db,
        llm,
        config: config.clone(),
        insight_engine,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Default tracing directive when RUST_LOG is unset. Tracing targets use the
/// crate name with underscores, not the package name with hyphens.
fn default_log_directive(level: &str) -> String {
    format!("{}={}", env!("CARGO_CRATE_NAME"), level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_default_log_directive_enables_own_logs() {
        let filter = EnvFilter::new(default_log_directive("info"));
        let subscriber = tracing_subscriber::registry().with(filter);
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::event_enabled!(target: "hr_api", Level::INFO));
            assert!(tracing::event_enabled!(target: "hr_api::chatbot::handlers", Level::WARN));
            assert!(!tracing::event_enabled!(target: "hr_api", Level::DEBUG));
        });
    }
}
