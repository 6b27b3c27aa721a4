//! LeaveSync - leave notification reconciliation service
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use leavesync_api::{build_router, AppContext};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be applied before the environment is read
    let dotenv = dotenvy::dotenv();

    let config = leavesync_infra::config::load().context("failed to load configuration")?;
    leavesync_infra::init_tracing(&config.logging)?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) => debug!(error = %e, "No .env file loaded"),
    }

    let bind_address = config.server.bind_address.clone();
    let ctx = Arc::new(AppContext::new(config).context("failed to build application context")?);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    info!(%bind_address, "LeaveSync listening");

    axum::serve(listener, build_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("LeaveSync stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
