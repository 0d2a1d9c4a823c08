//! Server state and configuration.

use crate::dispatch::Dispatcher;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
}

/// Application state shared across handlers.
///
/// Holds the one dispatcher for this channel, and with it the single
/// printer session slot.
pub struct AppState {
    pub config: ServerConfig,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(config: ServerConfig, dispatcher: Dispatcher) -> Self {
        Self { config, dispatcher }
    }
}
