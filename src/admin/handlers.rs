use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::AdminState;
use crate::observability::metrics;
use crate::state::StateError;

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub backend: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaintenanceStatus {
    pub enabled: bool,
    pub backend: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetMaintenance {
    pub enabled: bool,
}

/// Backend failure surfaced to admin clients.
pub struct AdminError(StateError);

impl From<StateError> for AdminError {
    fn from(e: StateError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Admin request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

pub async fn get_status(State(state): State<AdminState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.controller.active().kind().to_string(),
    })
}

pub async fn get_maintenance(
    State(state): State<AdminState>,
) -> Result<Json<MaintenanceStatus>, AdminError> {
    let backend = state.controller.active();
    let enabled = state.controller.get_state(Some(backend.as_ref())).await?;
    Ok(Json(MaintenanceStatus {
        enabled,
        backend: backend.kind().to_string(),
    }))
}

/// Write the flag, then report what the backend holds afterwards.
///
/// Read-only backends accept the write and report their unchanged value.
pub async fn put_maintenance(
    State(state): State<AdminState>,
    Json(body): Json<SetMaintenance>,
) -> Result<Json<MaintenanceStatus>, AdminError> {
    let backend = state.controller.active();
    state
        .controller
        .set_state(body.enabled, Some(backend.as_ref()))
        .await?;
    let enabled = state.controller.get_state(Some(backend.as_ref())).await?;
    metrics::record_state(enabled);

    tracing::info!(
        backend = backend.kind(),
        requested = body.enabled,
        enabled,
        "Maintenance state updated via admin API"
    );
    Ok(Json(MaintenanceStatus {
        enabled,
        backend: backend.kind().to_string(),
    }))
}
