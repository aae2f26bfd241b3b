//! HTTP server initialization and runtime setup.
//!
//! Wires the configured storage backend into the short URL service and
//! runs the Axum server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;

use crate::api::routes::app_router;
use crate::application::services::{ShortUrlService, ShortUrlSettings};
use crate::config::Config;
use crate::infrastructure::persistence::build_repository;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if the storage backend fails to initialize, the
/// listener cannot bind, or the server errors at runtime.
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;

    let service = ShortUrlService::new(
        repository,
        ShortUrlSettings {
            alias_length: config.alias_length,
            max_generation_attempts: config.max_generation_attempts,
            base_url: config.base_url.clone(),
        },
    );

    let state = AppState::new(Arc::new(service));
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install shutdown signal handler: {e}");
        return;
    }

    tracing::info!("shutdown signal received");
}
