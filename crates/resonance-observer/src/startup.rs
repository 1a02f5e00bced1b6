//! Observer server startup helper for embedding in the engine binary.
//!
//! Provides [`spawn_observer`] which launches the Observer HTTP +
//! `WebSocket` server on a background Tokio task, so the API runs
//! alongside the reactor actor, the clock and the telemetry loop.

use std::sync::Arc;

use resonance_core::ShutdownListener;
use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the Observer server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the Observer HTTP server on a background Tokio task.
///
/// The server stops accepting connections once `shutdown` fires and the
/// returned handle resolves after in-flight requests finish.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the configured host and port do
/// not form a valid socket address. This is checked before the
/// background task is spawned.
pub fn spawn_observer(
    config: ServerConfig,
    state: Arc<AppState>,
    shutdown: ShutdownListener,
) -> Result<JoinHandle<()>, StartupError> {
    let addr = config.socket_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = crate::server::start_server(&config, state, shutdown).await {
            tracing::error!(error = %e, "Observer server exited with error");
        }
    });

    tracing::info!(%addr, "Observer server spawned on background task");

    Ok(handle)
}
