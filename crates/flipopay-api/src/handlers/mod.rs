//! HTTP request handlers for the Flipopay gateway.
//!
//! All handlers are infallible at the type level: every branch, including
//! validation failures and upstream errors, produces a typed JSON response
//! with the status code the route's contract demands. Panics are turned
//! into generic 500 responses by the server's panic-capture layer.
//!
//! Handlers are grouped by route:
//! - `payouts` - payout initiation and upstream relay
//! - `webhook` - asynchronous status callbacks from the processor
//! - `health` - liveness probe

pub mod health;
pub mod payouts;
pub mod webhook;

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
pub use health::liveness_check;
pub use payouts::initiate_payout;
use serde::Serialize;
pub use webhook::receive_webhook;

/// Response body for requests to undeclared routes.
#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
    /// Always `false`.
    pub status: bool,
    /// Fixed error label.
    pub error: &'static str,
    /// Human-readable message echoing the requested URL.
    pub message: String,
}

/// Fallback handler for any route/method without a declared handler.
pub async fn not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            status: false,
            error: "API URL not found",
            message: format!("The requested URL {uri} was not found on this server."),
        }),
    )
        .into_response()
}
