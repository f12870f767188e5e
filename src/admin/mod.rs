//! Admin API.
//!
//! Served on its own listener so it is never subject to maintenance mode.
//! Every route requires `Authorization: Bearer <api_key>`.
//!
//! - `GET /admin/status`
//! - `GET /admin/maintenance`
//! - `PUT /admin/maintenance` with `{"enabled": bool}`

pub mod auth;
pub mod handlers;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::lifecycle::shutdown;
use crate::state::StateController;

/// State shared by admin handlers.
#[derive(Clone)]
pub struct AdminState {
    pub controller: Arc<StateController>,
    pub api_key: Arc<str>,
}

impl AdminState {
    pub fn new(controller: Arc<StateController>, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            controller,
            api_key: api_key.into(),
        }
    }
}

pub fn admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/admin/status", get(handlers::get_status))
        .route(
            "/admin/maintenance",
            get(handlers::get_maintenance).put(handlers::put_maintenance),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::admin_auth_middleware,
        ))
        .with_state(state)
}

/// Serve the admin API until shutdown is signalled.
pub async fn serve_admin(
    listener: TcpListener,
    state: AdminState,
    shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "Admin API starting");

    axum::serve(listener, admin_router(state))
        .with_graceful_shutdown(shutdown::wait(shutdown_rx))
        .await?;

    tracing::info!("Admin API stopped");
    Ok(())
}
