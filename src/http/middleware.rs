//! Maintenance interception middleware.
//!
//! # Decision Order
//! ```text
//! 1. path matches a forced-on route      → Block (state and predicate ignored)
//! 2. active = maintenance_mode override, else controller state
//! 3. active && !exempt && !forced-off    → Block
//! 4. otherwise                           → Proceed
//! ```
//!
//! Forced paths are collected from the route registry on the first request
//! and frozen for the lifetime of the decider.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::State,
    http::{request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::response::default_maintenance_response;
use crate::observability::metrics;
use crate::routing::{ForcedPaths, RouteRegistry};
use crate::state::{StateBackend, StateController, StateError};

/// Decides per request whether maintenance applies.
///
/// Plain closures `Fn(&Parts) -> bool` implement this directly.
#[async_trait]
pub trait ExemptionPredicate: Send + Sync {
    async fn is_exempt(&self, request: &Parts) -> bool;
}

#[async_trait]
impl<F> ExemptionPredicate for F
where
    F: Fn(&Parts) -> bool + Send + Sync,
{
    async fn is_exempt(&self, request: &Parts) -> bool {
        self(request)
    }
}

/// Builds the response returned while a request is blocked.
///
/// Plain closures `Fn(&Parts) -> Response` implement this directly.
#[async_trait]
pub trait MaintenanceResponder: Send + Sync {
    async fn respond(&self, request: &Parts) -> Response;
}

#[async_trait]
impl<F> MaintenanceResponder for F
where
    F: Fn(&Parts) -> Response + Send + Sync,
{
    async fn respond(&self, request: &Parts) -> Response {
        self(request)
    }
}

/// Why a request was blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    ForcedOn,
    Maintenance,
}

impl BlockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockReason::ForcedOn => "forced_on",
            BlockReason::Maintenance => "maintenance",
        }
    }
}

/// Outcome of [`MaintenanceDecider::decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Block(BlockReason),
}

/// Per-request maintenance decision logic.
pub struct MaintenanceDecider {
    controller: Arc<StateController>,
    routes: RouteRegistry,
    maintenance_mode: Option<bool>,
    backend: Option<Arc<dyn StateBackend>>,
    exempt: Option<Arc<dyn ExemptionPredicate>>,
    responder: Option<Arc<dyn MaintenanceResponder>>,
    forced: OnceLock<ForcedPaths>,
}

impl MaintenanceDecider {
    pub fn new(controller: Arc<StateController>, routes: RouteRegistry) -> Self {
        Self {
            controller,
            routes,
            maintenance_mode: None,
            backend: None,
            exempt: None,
            responder: None,
            forced: OnceLock::new(),
        }
    }

    /// Fix the global state instead of asking the controller.
    pub fn maintenance_mode(mut self, value: Option<bool>) -> Self {
        self.maintenance_mode = value;
        self
    }

    /// Read state from `backend` rather than the controller's active one.
    pub fn backend(mut self, backend: Arc<dyn StateBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn exempt<P>(mut self, predicate: P) -> Self
    where
        P: ExemptionPredicate + 'static,
    {
        self.exempt = Some(Arc::new(predicate));
        self
    }

    pub fn responder<R>(mut self, responder: R) -> Self
    where
        R: MaintenanceResponder + 'static,
    {
        self.responder = Some(Arc::new(responder));
        self
    }

    fn forced_paths(&self) -> &ForcedPaths {
        self.forced
            .get_or_init(|| ForcedPaths::collect(&self.routes.snapshot()))
    }

    async fn is_active(&self) -> Result<bool, StateError> {
        if let Some(value) = self.maintenance_mode {
            return Ok(value);
        }
        let active = self.controller.get_state(self.backend.as_deref()).await?;
        metrics::record_state(active);
        Ok(active)
    }

    async fn is_exempt(&self, request: &Parts) -> bool {
        match &self.exempt {
            Some(predicate) => predicate.is_exempt(request).await,
            None => false,
        }
    }

    /// Decide whether `request` is blocked.
    ///
    /// The exemption predicate is only consulted while maintenance is active.
    pub async fn decide(&self, request: &Parts) -> Result<Decision, StateError> {
        let path = request.uri.path();
        let forced = self.forced_paths();

        if forced.is_forced_on(path) {
            return Ok(Decision::Block(BlockReason::ForcedOn));
        }

        if self.is_active().await? && !self.is_exempt(request).await && !forced.is_forced_off(path) {
            return Ok(Decision::Block(BlockReason::Maintenance));
        }

        Ok(Decision::Proceed)
    }

    /// Response for a blocked request.
    pub async fn maintenance_response(&self, request: &Parts) -> Response {
        match &self.responder {
            Some(responder) => responder.respond(request).await,
            None => default_maintenance_response(),
        }
    }
}

impl std::fmt::Debug for MaintenanceDecider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaintenanceDecider")
            .field("maintenance_mode", &self.maintenance_mode)
            .field("backend", &self.backend)
            .field("exempt", &self.exempt.is_some())
            .field("responder", &self.responder.is_some())
            .field("forced_collected", &self.forced.get().is_some())
            .finish()
    }
}

/// Axum middleware applying a [`MaintenanceDecider`].
///
/// Install with `axum::middleware::from_fn_with_state(Arc::new(decider), maintenance_middleware)`.
pub async fn maintenance_middleware(
    State(decider): State<Arc<MaintenanceDecider>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();

    match decider.decide(&parts).await {
        Ok(Decision::Proceed) => {
            metrics::record_passed();
            next.run(Request::from_parts(parts, body)).await
        }
        Ok(Decision::Block(reason)) => {
            tracing::debug!(
                path = %parts.uri.path(),
                reason = reason.as_str(),
                "Request blocked by maintenance mode"
            );
            metrics::record_blocked(reason.as_str());
            decider.maintenance_response(&parts).await
        }
        Err(e) => {
            tracing::error!(path = %parts.uri.path(), error = %e, "Failed to read maintenance state");
            metrics::record_state_error();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Unable to determine maintenance state" })),
            )
                .into_response()
        }
    }
}
