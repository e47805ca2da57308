//! Payout initiation handler.
//!
//! Validates the inbound body against the payout schema, forwards the
//! normalized request to the upstream processor with the configured
//! secret, and relays the upstream verdict to the caller. A rejected
//! request never reaches the upstream.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use flipopay_core::validate;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::AppState;

/// Generic message used when the upstream gives us nothing to relay.
const UPSTREAM_FAILURE_MESSAGE: &str = "An error occurred while initiating the payout.";

/// Response for a payout accepted by the upstream.
#[derive(Debug, Serialize)]
pub struct PayoutAccepted {
    /// Always `true`.
    pub status: bool,
    /// Upstream response body, relayed verbatim.
    pub data: Value,
}

/// Response for a request rejected by validation.
#[derive(Debug, Serialize)]
pub struct ValidationRejected {
    /// Always `false`.
    pub status: bool,
    /// Fixed error label.
    pub error: &'static str,
    /// One message per violated constraint, in schema order.
    pub details: Vec<String>,
}

/// Response for an upstream failure, HTTP or transport.
#[derive(Debug, Serialize)]
pub struct PayoutFailed {
    /// Always `false`.
    pub status: bool,
    /// Upstream error body when present, generic message otherwise.
    pub error: Value,
}

/// Initiates a payout by validating and forwarding the request.
///
/// Produces:
/// - 400 with itemized messages when validation rejects the body
/// - 200 with the upstream body when the upstream accepts
/// - the upstream's status with its error body when it refuses
/// - 500 with a generic message on transport failure
#[instrument(name = "initiate_payout", skip(state, body))]
pub async fn initiate_payout(State(state): State<AppState>, body: Bytes) -> Response {
    debug!(content_length = body.len(), "Processing payout initiation request");

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Request body is not valid JSON: {}", e);
            return validation_rejected(vec!["request body must be a JSON object".to_string()]);
        },
    };

    let payout = match validate(&payload) {
        Ok(payout) => payout,
        Err(errors) => {
            warn!(violations = errors.messages().len(), "Payout request failed validation");
            return validation_rejected(errors.into_messages());
        },
    };

    match state.forwarder.forward(&payout).await {
        Ok(upstream) if upstream.is_success => (
            StatusCode::OK,
            Json(PayoutAccepted { status: true, data: upstream.body.unwrap_or(Value::Null) }),
        )
            .into_response(),
        Ok(upstream) => {
            warn!(status = upstream.status, "Upstream refused payout initiation");
            let status = StatusCode::from_u16(upstream.status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let error =
                upstream.body.unwrap_or_else(|| Value::String(UPSTREAM_FAILURE_MESSAGE.into()));
            (status, Json(PayoutFailed { status: false, error })).into_response()
        },
        Err(e) => {
            error!(error = %e, "Error calling payout API");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PayoutFailed {
                    status: false,
                    error: Value::String(UPSTREAM_FAILURE_MESSAGE.into()),
                }),
            )
                .into_response()
        },
    }
}

fn validation_rejected(details: Vec<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ValidationRejected { status: false, error: "Validation error", details }),
    )
        .into_response()
}
