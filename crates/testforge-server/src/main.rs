//! Main entry point for the testforge backend.
//!
//! Initializes the axum web server, loads configuration from the
//! environment, and registers the API routes.

mod errors;
mod handlers;
mod routes;
mod state;

use state::AppState;
use std::sync::Arc;
use testforge_core::{ServiceConfig, TestPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServiceConfig::load(None)?;
    let pipeline = TestPipeline::from_config(&config)?;
    let port = config.port;

    let state = Arc::new(AppState::new(config, pipeline));
    let app = routes::router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
