//! # HTTP Command Channel
//!
//! Exposes the printer command dispatcher over HTTP: one RPC-style
//! endpoint accepting `{"method": ..., "args": {...}}` and answering
//! with exactly one response per request.
//!
//! ## Usage
//!
//! ```bash
//! puente serve --listen 0.0.0.0:8080
//! ```
//!
//! ```bash
//! curl -X POST http://localhost:8080/api/command \
//!   -H 'Content-Type: application/json' \
//!   -d '{"method": "open"}'
//! ```

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use std::sync::Arc;

use axum::{Router, routing::post};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::dispatch::Dispatcher;
use crate::error::BridgeError;

/// Start the HTTP command channel.
///
/// ## Example
///
/// ```no_run
/// use puente::dispatch::Dispatcher;
/// use puente::server::{ServerConfig, serve};
///
/// # async fn example() -> Result<(), puente::error::BridgeError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
/// };
///
/// serve(config, Dispatcher::simulated()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig, dispatcher: Dispatcher) -> Result<(), BridgeError> {
    let state = Arc::new(AppState::new(config.clone(), dispatcher));

    let app = Router::new()
        .route("/api/command", post(handlers::command))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!(addr = %config.listen_addr, "command channel listening");

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            BridgeError::Transport(format!("failed to bind {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| BridgeError::Transport(format!("server error: {}", e)))?;

    Ok(())
}
