//! HTTP server lifecycle.

use anyhow::{Context, Result};
use forecast_core::Config;
use std::net::SocketAddr;

use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the listen address is
/// invalid, or binding fails.
pub async fn run(config: Config) -> Result<()> {
    let state = AppState::from_config(&config)?;

    if state.api_key().is_none() {
        tracing::warn!(
            "No OpenWeatherMap API key configured; forecast requests will fail with 500 until one is set"
        );
    }
    tracing::info!(upstream = %config.upstream_url, "Forecast provider ready");

    let addr: SocketAddr = config
        .listen_addr()
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr()))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
