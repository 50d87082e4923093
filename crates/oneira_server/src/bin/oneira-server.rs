//! Oneira backend entry point.

use oneira_engine::Orchestrator;
use oneira_models::CompletionClient;
use oneira_server::{AppState, ServiceConfig, router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;

    let client = CompletionClient::new(
        config.api_key().clone(),
        config.model().clone(),
        config.base_url().clone(),
    );
    let orchestrator = Orchestrator::new(client);
    let state = AppState::new(orchestrator, config.default_language().clone());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", *config.port())).await?;
    info!(port = config.port(), model = %config.model(), "Oneira backend listening");

    axum::serve(listener, router(state)).await?;

    Ok(())
}
