//! Webhook intake for asynchronous payout status callbacks.
//!
//! The processor posts an opaque payload; the contract only requires a
//! `crn` correlation number to be present before acknowledging. Nothing
//! is persisted and no signature is verified.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Acknowledgment body for webhook callbacks.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    /// Outcome description.
    pub message: &'static str,
}

/// Acknowledges a status callback from the upstream processor.
///
/// A payload without a `crn` correlation number (including unparseable or
/// empty bodies) is answered with 400; anything carrying one is accepted
/// with 200.
#[instrument(name = "receive_webhook", skip(body))]
pub async fn receive_webhook(body: Bytes) -> Response {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    debug!(payload = %payload, "Webhook payload received");

    match payload.get("crn").filter(|crn| !crn.is_null()) {
        Some(crn) => {
            info!(crn = %crn, "Webhook processed");
            (StatusCode::OK, Json(WebhookAck { message: "Webhook processed successfully" }))
                .into_response()
        },
        None => {
            warn!("Invalid webhook payload: missing crn");
            (StatusCode::BAD_REQUEST, Json(WebhookAck { message: "Bad Request: Missing crn" }))
                .into_response()
        },
    }
}
