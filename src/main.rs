use std::sync::Arc;

use anyhow::Context;
use chat_relay::{
    config::{ProviderConfig, ServerConfig},
    routes,
    services::{
        openai::OpenAiClient,
        provider::{CompletionProvider, UnconfiguredProvider},
    },
    state::AppState,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let server = ServerConfig::from_env()?;

    let provider: Arc<dyn CompletionProvider> = match ProviderConfig::from_env() {
        Ok(config) => {
            info!(base_url = %config.base_url, "Completion provider configured");
            Arc::new(OpenAiClient::from_config(&config))
        }
        Err(e) => {
            warn!(error = %e, "Completion provider unavailable; chat requests will fail");
            Arc::new(UnconfiguredProvider)
        }
    };

    let app = routes::create_router().with_state(AppState::shared(provider));

    let listener = tokio::net::TcpListener::bind(server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", server.bind_addr))?;

    info!(addr = %server.bind_addr, "Chat relay listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();
}
