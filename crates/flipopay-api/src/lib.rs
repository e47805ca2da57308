//! Flipopay gateway HTTP API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::Arc;

use flipopay_forwarder::{ForwardError, ForwarderClient};

pub mod config;
pub mod handlers;
pub mod server;

pub use config::Config;
pub use server::{create_router, start_server};

/// Shared application state passed to every handler.
///
/// Built once at startup; request handlers never read ambient globals.
/// Cloning is cheap: the config is reference-counted and the forwarder
/// shares its transport pool.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Process-wide configuration.
    pub config: Arc<Config>,
    /// Client for the upstream payout API.
    pub forwarder: ForwarderClient,
}

impl AppState {
    /// Builds application state from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `ForwardError::Configuration` if the forwarder HTTP client
    /// cannot be constructed.
    pub fn new(config: Config) -> Result<Self, ForwardError> {
        let forwarder = ForwarderClient::new(config.to_forwarder_config())?;
        Ok(Self { config: Arc::new(config), forwarder })
    }
}
