//! Govee Bridge - binary entry point

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use govee_bridge::api::http::create_router;
use govee_bridge::{AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    info!("starting govee-bridge v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("upstream API base: {}", config.api_base);
    info!(
        "device cache TTL: {}s, keepalive interval: {}s",
        config.cache_ttl.as_secs(),
        config.keepalive_interval.as_secs()
    );

    let state = Arc::new(AppState::from_config(&config).context("Failed to build state")?);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
