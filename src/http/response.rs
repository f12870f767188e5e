//! Default maintenance response.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Body `detail` of the default response.
pub const MAINTENANCE_DETAIL: &str = "Service temporarily unavailable due to maintenance";

/// Value of the `Retry-After` header on the default response.
pub const RETRY_AFTER_SECS: u64 = 3600;

/// 503 with a JSON `detail` body and a one hour `Retry-After` hint.
pub fn default_maintenance_response() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        [(header::RETRY_AFTER, RETRY_AFTER_SECS.to_string())],
        Json(json!({ "detail": MAINTENANCE_DETAIL })),
    )
        .into_response()
}
