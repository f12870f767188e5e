//! End-to-end interception behaviour through an axum router.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Router};
use maintenance_mode::http::{ExemptionPredicate, MaintenanceResponder};
use maintenance_mode::{
    maintenance_middleware, MaintenanceDecider, MarkedRouter, Markers, RouteMarker,
    StateController,
};
use serde_json::{json, Value};

mod common;

fn app() -> MarkedRouter {
    MarkedRouter::new()
        .route("/a", get(|| async { "a" }))
        .route_marked("/off", get(|| async { "off" }), RouteMarker::ForcedOff)
        .route_marked("/on", get(|| async { "on" }), RouteMarker::ForcedOn)
        .route_marked(
            "/stacked",
            get(|| async { "stacked" }),
            Markers::new().force_off().force_on(),
        )
        .route_marked("/items/{id}", get(|| async { "item" }), RouteMarker::ForcedOff)
}

fn gated(
    routes: MarkedRouter,
    configure: impl FnOnce(MaintenanceDecider) -> MaintenanceDecider,
    controller: Arc<StateController>,
) -> Router {
    let (router, registry) = routes.into_parts();
    let decider = configure(MaintenanceDecider::new(controller, registry));
    router.layer(middleware::from_fn_with_state(
        Arc::new(decider),
        maintenance_middleware,
    ))
}

struct AsyncExempt;

#[async_trait]
impl ExemptionPredicate for AsyncExempt {
    async fn is_exempt(&self, request: &Parts) -> bool {
        tokio::task::yield_now().await;
        request.headers.contains_key("x-maintenance-bypass")
    }
}

struct AsyncTeapot;

#[async_trait]
impl MaintenanceResponder for AsyncTeapot {
    async fn respond(&self, request: &Parts) -> Response {
        tokio::task::yield_now().await;
        (StatusCode::IM_A_TEAPOT, format!("brewing {}", request.uri.path())).into_response()
    }
}

#[tokio::test]
async fn test_global_on_returns_default_503() {
    let state = common::file_state();
    state.controller.set_state(true, None).await.unwrap();
    let router = gated(app(), |d| d, state.controller.clone());

    let reply = common::send(&router, "/a").await;
    assert_eq!(reply.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(reply.headers[header::RETRY_AFTER], "3600");
    let body: Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(
        body,
        json!({ "detail": "Service temporarily unavailable due to maintenance" })
    );
}

#[tokio::test]
async fn test_forced_off_route_is_served_during_maintenance() {
    let state = common::file_state();
    state.controller.set_state(true, None).await.unwrap();
    let router = gated(app(), |d| d, state.controller.clone());

    let reply = common::send(&router, "/off").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, "off");

    let reply = common::send(&router, "/items/17").await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn test_global_off_serves_everything_but_forced_on() {
    let state = common::file_state();
    let router = gated(app(), |d| d, state.controller.clone());

    assert_eq!(common::send(&router, "/a").await.status, StatusCode::OK);
    assert_eq!(common::send(&router, "/off").await.status, StatusCode::OK);
    assert_eq!(
        common::send(&router, "/on").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_forced_on_beats_predicate_and_earlier_forced_off() {
    let state = common::file_state();
    let router = gated(app(), |d| d.exempt(|_: &Parts| true), state.controller.clone());

    assert_eq!(
        common::send(&router, "/on").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        common::send(&router, "/stacked").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(common::send(&router, "/a").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_sync_predicate_exempts_requests() {
    let state = common::file_state();
    state.controller.set_state(true, None).await.unwrap();
    let router = gated(
        app(),
        |d| d.exempt(|req: &Parts| req.uri.path() == "/a"),
        state.controller.clone(),
    );

    assert_eq!(common::send(&router, "/a").await.status, StatusCode::OK);
    assert_eq!(
        common::send(&router, "/unknown").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_async_predicate_exempts_requests() {
    let state = common::file_state();
    state.controller.set_state(true, None).await.unwrap();
    let (router, registry) = app().into_parts();
    let decider = MaintenanceDecider::new(state.controller.clone(), registry).exempt(AsyncExempt);
    let router = router.layer(middleware::from_fn_with_state(
        Arc::new(decider),
        maintenance_middleware,
    ));

    let bypass = axum::http::Request::builder()
        .uri("/a")
        .header("x-maintenance-bypass", "1")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(router.clone(), bypass).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        common::send(&router, "/a").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_sync_responder_is_used_verbatim() {
    let router = gated(
        app(),
        |d| {
            d.maintenance_mode(Some(true)).responder(|_: &Parts| {
                (StatusCode::SERVICE_UNAVAILABLE, "custom maintenance").into_response()
            })
        },
        Arc::new(StateController::new()),
    );

    let reply = common::send(&router, "/a").await;
    assert_eq!(reply.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(reply.body, "custom maintenance");
    assert!(!reply.headers.contains_key(header::RETRY_AFTER));
}

#[tokio::test]
async fn test_async_responder_is_used_for_forced_on() {
    let router = gated(
        app(),
        |d| d.maintenance_mode(Some(false)).responder(AsyncTeapot),
        Arc::new(StateController::new()),
    );

    let reply = common::send(&router, "/on").await;
    assert_eq!(reply.status, StatusCode::IM_A_TEAPOT);
    assert_eq!(reply.body, "brewing /on");
}

#[tokio::test]
async fn test_reacts_to_state_changes_between_requests() {
    let state = common::file_state();
    let router = gated(app(), |d| d, state.controller.clone());

    assert_eq!(common::send(&router, "/a").await.status, StatusCode::OK);
    state.controller.set_state(true, None).await.unwrap();
    assert_eq!(
        common::send(&router, "/a").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
    state.controller.set_state(false, None).await.unwrap();
    assert_eq!(common::send(&router, "/a").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_scoped_override_drives_interception() {
    let state = common::file_state();
    let router = gated(app(), |d| d, state.controller.clone());

    let inside = state
        .controller
        .maintenance_on(None, || async { common::send(&router, "/a").await.status })
        .await
        .unwrap();
    assert_eq!(inside, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(common::send(&router, "/a").await.status, StatusCode::OK);
    assert_eq!(std::fs::read_to_string(&state.path).unwrap(), "0");
}

#[tokio::test]
async fn test_malformed_state_file_yields_500() {
    let state = common::file_state();
    std::fs::write(&state.path, "perhaps").unwrap();
    let router = gated(app(), |d| d, state.controller.clone());

    assert_eq!(
        common::send(&router, "/a").await.status,
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        common::send(&router, "/on").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_marker_collection_happens_once() {
    let state = common::file_state();
    state.controller.set_state(true, None).await.unwrap();
    let routes = app();
    let registry = routes.registry();
    let router = gated(routes, |d| d, state.controller.clone());

    assert_eq!(
        common::send(&router, "/late").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
    registry.mark("/late", RouteMarker::ForcedOff);
    assert_eq!(
        common::send(&router, "/late").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_concurrent_first_requests() {
    let state = common::file_state();
    state.controller.set_state(true, None).await.unwrap();
    let router = gated(app(), |d| d, state.controller.clone());
    let served = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let router = router.clone();
        let served = served.clone();
        handles.push(tokio::spawn(async move {
            if common::send(&router, "/off").await.status == StatusCode::OK {
                served.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(served.load(Ordering::SeqCst), 16);
}
