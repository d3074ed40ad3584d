//! Bot runtime - HTTP server lifecycle.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{info, warn};

use super::webhook::{self, AppState};
use crate::config::Config;

/// Serve the webhook until Ctrl+C.
pub async fn run(config: &Config, state: AppState) -> anyhow::Result<()> {
    // Listen on all interfaces at the configured port
    let address = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    let listener = TcpListener::bind(address).await?;

    info!("📡 Listening on: {}", address);
    info!("🔗 Webhook path: {}", config.webhook_path);

    let app = webhook::router(state, &config.webhook_path);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
