//! Liveness probe for service monitoring.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, instrument};

/// Liveness check endpoint.
///
/// Returns a minimal response indicating the service process is alive.
/// The gateway has no backing stores, so there is nothing deeper to probe.
#[instrument(name = "liveness_check")]
pub async fn liveness_check() -> Response {
    debug!("Performing liveness check");

    let response = serde_json::json!({
        "status": "alive",
        "timestamp": chrono::Utc::now(),
        "service": "flipopay-gateway"
    });

    (StatusCode::OK, Json(response)).into_response()
}
