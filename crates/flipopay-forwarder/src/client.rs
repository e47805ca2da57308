//! HTTP client for the upstream payout API.
//!
//! Handles request construction, the `X-Secret-Key` credential header, and
//! response capture. The upstream body is relayed verbatim: parsed as JSON
//! when possible, carried as a string otherwise.

use std::{fmt, time::Duration};

use flipopay_core::PayoutRequest;
use serde_json::Value;
use tracing::{info_span, Instrument};

use crate::error::{ForwardError, Result};

/// Configuration for the payout forwarder client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Upstream payout initiation endpoint.
    pub upstream_url: String,
    /// Shared secret sent as `X-Secret-Key` on every request.
    pub secret_key: String,
    /// Timeout for the upstream round-trip.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            upstream_url: "https://prod-server.flipopay.com/api/v1/payouts/initiate".to_string(),
            secret_key: String::new(),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECONDS),
            user_agent: "Flipopay-Gateway/0.1".to_string(),
        }
    }
}

// Manual Debug keeps the shared secret out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("upstream_url", &self.upstream_url)
            .field("secret_key", &"***")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Response from an upstream forwarding attempt.
///
/// Any HTTP response counts, successful or not; transport failures are
/// surfaced as [`ForwardError`] instead.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// HTTP status code returned by the upstream.
    pub status: u16,
    /// Upstream response body: JSON when parseable, string otherwise,
    /// `None` when the body is empty.
    pub body: Option<Value>,
    /// Total duration of the round-trip.
    pub duration: Duration,
    /// Whether the upstream answered with a 2xx status.
    pub is_success: bool,
}

/// HTTP client for forwarding validated payouts upstream.
///
/// Uses connection pooling and a configurable timeout; cloning is cheap
/// and shares the underlying transport.
#[derive(Debug, Clone)]
pub struct ForwarderClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ForwarderClient {
    /// Creates a new forwarder client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ForwardError::Configuration` if the HTTP client cannot be
    /// built with the provided settings.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ForwardError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Creates a forwarder client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns `ForwardError::Configuration` if the HTTP client cannot be
    /// built.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Returns the configured upstream endpoint.
    pub fn upstream_url(&self) -> &str {
        &self.config.upstream_url
    }

    /// Forwards a validated payout to the upstream API.
    ///
    /// Issues a single POST with the normalized body and the configured
    /// secret header, then captures the upstream's status and body for the
    /// caller to relay. One round-trip, no retries.
    ///
    /// # Errors
    ///
    /// Returns `ForwardError::Timeout` when the configured deadline is
    /// exceeded and `ForwardError::Network` for connection failures.
    pub async fn forward(&self, payout: &PayoutRequest) -> Result<UpstreamResponse> {
        let start_time = std::time::Instant::now();

        let span = info_span!(
            "payout_forward",
            url = %self.config.upstream_url,
            transaction_type = %payout.transaction_type,
            reference = %payout.reference,
        );

        async move {
            tracing::debug!("Forwarding payout to upstream");

            let request = self
                .client
                .post(&self.config.upstream_url)
                .header("X-Secret-Key", self.config.secret_key.as_str())
                .json(payout);

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    let duration = start_time.elapsed();
                    tracing::warn!(
                        duration_ms = duration.as_millis() as u64,
                        "Upstream request failed: {}",
                        e
                    );

                    if e.is_timeout() {
                        return Err(ForwardError::timeout(self.config.timeout.as_secs()));
                    }
                    if e.is_connect() {
                        return Err(ForwardError::network(format!("connection failed: {e}")));
                    }
                    return Err(ForwardError::network(e.to_string()));
                },
            };

            let duration = start_time.elapsed();
            let status = response.status().as_u16();
            let is_success = response.status().is_success();

            tracing::debug!(
                status,
                duration_ms = duration.as_millis() as u64,
                "Received upstream response"
            );

            let body = capture_body(response).await;

            Ok(UpstreamResponse { status, body, duration, is_success })
        }
        .instrument(span)
        .await
    }
}

/// Reads the upstream body, preserving it verbatim for the caller.
async fn capture_body(response: reqwest::Response) -> Option<Value> {
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to read upstream response body: {}", e);
            return None;
        },
    };

    if bytes.is_empty() {
        return None;
    }

    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(String::from_utf8_lossy(&bytes).into_owned())),
    }
}
