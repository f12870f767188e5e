//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the application router and record its route markers
//! - Wire up middleware (maintenance, timeout, request ID, tracing)
//! - Apply hot-reloaded state backend settings
//! - Serve until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{MaintenanceConfig, StateConfig};
use crate::http::exempt::PathPrefixExemption;
use crate::http::middleware::{maintenance_middleware, MaintenanceDecider};
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::shutdown;
use crate::routing::{MarkedRouter, RouteMarker};
use crate::state::{StateController, StateError};

/// HTTP server for an application gated by maintenance mode.
pub struct HttpServer {
    router: Router,
    config: MaintenanceConfig,
    controller: Arc<StateController>,
}

impl HttpServer {
    /// Serve the built-in routes (see [`default_routes`]).
    pub fn new(config: MaintenanceConfig, controller: Arc<StateController>) -> Self {
        Self::with_routes(config, controller, default_routes())
    }

    /// Serve caller-provided routes.
    pub fn with_routes(
        config: MaintenanceConfig,
        controller: Arc<StateController>,
        routes: MarkedRouter,
    ) -> Self {
        let (app, registry) = routes.into_parts();

        let mut decider = MaintenanceDecider::new(controller.clone(), registry)
            .maintenance_mode(config.maintenance.maintenance_mode);
        let exemption = PathPrefixExemption::new(config.maintenance.exempt_path_prefixes.clone());
        if !exemption.is_empty() {
            decider = decider.exempt(exemption);
        }

        let router = Self::build_router(&config, app, Arc::new(decider));
        Self {
            router,
            config,
            controller,
        }
    }

    /// Wrap the application with all middleware layers.
    #[allow(deprecated)]
    fn build_router(
        config: &MaintenanceConfig,
        app: Router,
        decider: Arc<MaintenanceDecider>,
    ) -> Router {
        app.layer(middleware::from_fn_with_state(decider, maintenance_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// The fully layered router, for in-process serving.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &MaintenanceConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configuration updates re-apply the `[state]` section; other sections
    /// take effect on restart.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<MaintenanceConfig>,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let mut reloader = ConfigReloader::new(self.controller.clone(), self.config.clone());
        let reload = tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                reloader.apply(new_config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        reload.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Tracks the last applied configuration and re-applies `[state]` changes.
struct ConfigReloader {
    controller: Arc<StateController>,
    current: MaintenanceConfig,
}

impl ConfigReloader {
    fn new(controller: Arc<StateController>, current: MaintenanceConfig) -> Self {
        Self {
            controller,
            current,
        }
    }

    /// Apply one reloaded configuration. A rejected `[state]` keeps the
    /// running backend and the previous section.
    fn apply(&mut self, new_config: MaintenanceConfig) {
        if new_config.maintenance != self.current.maintenance {
            tracing::warn!("[maintenance] changes take effect after restart");
            self.current.maintenance = new_config.maintenance.clone();
        }
        if new_config.state == self.current.state {
            return;
        }
        match apply_state_config(&self.controller, &new_config.state) {
            Ok(()) => self.current.state = new_config.state,
            Err(e) => tracing::error!(error = %e, "Failed to apply reloaded state backend"),
        }
    }
}

/// Point `controller` at the backend described by `state`.
pub fn apply_state_config(
    controller: &StateController,
    state: &StateConfig,
) -> Result<(), StateError> {
    controller.configure(&state.backend, state.backend_options())
}

/// Built-in application routes.
///
/// `/health` is forced off so probes keep passing during maintenance.
pub fn default_routes() -> MarkedRouter {
    MarkedRouter::new()
        .route("/", get(index))
        .route_marked("/health", get(health), RouteMarker::ForcedOff)
}

async fn index() -> Json<Value> {
    Json(json!({ "message": "Service is running" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
