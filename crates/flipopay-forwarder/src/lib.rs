//! Payout forwarding to the upstream processor.
//!
//! This crate owns the single outbound dependency of the gateway: a
//! synchronous round-trip to the Flipopay payout API. There is no retry,
//! no circuit breaking, and no queueing; each validated request is sent
//! exactly once and the upstream's verdict is relayed back to the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;

pub use client::{ClientConfig, ForwarderClient, UpstreamResponse};
pub use error::{ForwardError, Result};

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
