//! Error types for upstream forwarding.
//!
//! Transport-level failures are categorized so the API layer can map them
//! to the right response: an HTTP response from the upstream, however
//! unsuccessful, is not an error here and is relayed as-is.

use thiserror::Error;

/// Result type alias for forwarding operations.
pub type Result<T> = std::result::Result<T, ForwardError>;

/// Transport or configuration failure while talking to the upstream API.
#[derive(Debug, Clone, Error)]
pub enum ForwardError {
    /// Network-level connectivity failure.
    #[error("network connection failed: {message}")]
    Network {
        /// Error message describing the network failure
        message: String,
    },

    /// HTTP request timeout exceeded.
    #[error("request timeout after {timeout_seconds}s")]
    Timeout {
        /// Number of seconds before the request timed out
        timeout_seconds: u64,
    },

    /// Invalid client configuration.
    #[error("invalid forwarder configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl ForwardError {
    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::Timeout { timeout_seconds }
    }

    /// Creates a configuration error from a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }
}
