mod config;
mod errors;
mod extraction;
mod generation;
mod llm_client;
mod routes;
mod session;
mod state;
mod web;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; a missing API key stops startup here,
    // before anything is served.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Coldmail v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.groq_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let sessions = SessionStore::new();
    spawn_session_sweeper(sessions.clone(), config.session_idle);
    info!(
        "Sessions expire after {} idle minute(s)",
        config.session_idle.as_secs() / 60
    );

    let state = AppState {
        generator: Arc::new(llm),
        sessions,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically discards sessions that have been idle past `max_idle`.
fn spawn_session_sweeper(sessions: SessionStore, max_idle: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = sessions.sweep_idle(max_idle).await;
            if removed > 0 {
                info!("{} session(s) live after sweep", sessions.len().await);
            }
        }
    });
}
