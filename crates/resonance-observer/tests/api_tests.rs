//! Integration tests for the Observer API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. A real reactor actor runs behind the router so
//! commands travel the same path as in production.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use resonance_core::config::ResonanceConfig;
use resonance_core::{ReactorHandle, Shutdown, TelemetryPublisher, spawn_reactor};
use resonance_observer::router::build_router;
use resonance_observer::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

const EPS: f64 = 1e-9;

fn make_test_state() -> (Arc<AppState>, ReactorHandle, Shutdown) {
    let shutdown = Shutdown::new();
    let mut config = ResonanceConfig::default();
    config.physics.quantum_jitter = 0.0;
    let (reactor, _actor) = spawn_reactor(&config);
    let telemetry = TelemetryPublisher::new(16, shutdown.listener());
    let state = Arc::new(AppState::new(reactor.clone(), telemetry));
    (state, reactor, shutdown)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn post(router: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_owned()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let (state, _reactor, _shutdown) = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("OFFLINE"));
}

#[tokio::test]
async fn test_status_starts_offline() {
    let (state, _reactor, _shutdown) = make_test_state();
    let router = build_router(state);

    let (status, json) = get(&router, "/api/v1/reactor/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "OFFLINE");
    assert_eq!(json["tick"], 0);
    assert!((json["control_rod_position"].as_f64().unwrap() - 100.0).abs() < EPS);
    assert!((json["core_temperature"].as_f64().unwrap() - 300.0).abs() < EPS);
    for field in [
        "timestamp",
        "neutron_flux",
        "k_eff",
        "plasma_coherence",
        "phase_noise",
        "geomagnetic_residual",
        "generated_power",
    ] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
}

#[tokio::test]
async fn test_start_is_idempotent() {
    let (state, _reactor, _shutdown) = make_test_state();
    let router = build_router(state);

    let (status, json) = post(&router, "/api/v1/reactor/start", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);
    assert_eq!(json["message"], "Reactor starting");

    let (status, json) = post(&router, "/api/v1/reactor/start", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);
    assert_eq!(json["message"], "Reactor already running");

    let (_, json) = get(&router, "/api/v1/reactor/status").await;
    assert_eq!(json["status"], "STARTUP");
}

#[tokio::test]
async fn test_scram_forces_rods_in() {
    let (state, _reactor, _shutdown) = make_test_state();
    let router = build_router(state);

    post(&router, "/api/v1/reactor/start", "").await;
    let (status, json) = post(&router, "/api/v1/reactor/rods", r#"{"position": 20}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert!((json["snapshot"]["control_rod_position"].as_f64().unwrap() - 20.0).abs() < EPS);

    let (status, json) = post(&router, "/api/v1/reactor/scram", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["snapshot"]["status"], "SCRAM");
    assert!((json["snapshot"]["control_rod_position"].as_f64().unwrap() - 100.0).abs() < EPS);
    assert!((json["snapshot"]["phase_noise"].as_f64().unwrap() - 10.0).abs() < EPS);
}

#[tokio::test]
async fn test_rods_are_clamped() {
    let (state, _reactor, _shutdown) = make_test_state();
    let router = build_router(state);

    let (_, json) = post(&router, "/api/v1/reactor/rods", r#"{"position": 150}"#).await;
    assert!((json["snapshot"]["control_rod_position"].as_f64().unwrap() - 100.0).abs() < EPS);

    let (_, json) = post(&router, "/api/v1/reactor/rods", r#"{"position": -3}"#).await;
    assert!(json["snapshot"]["control_rod_position"].as_f64().unwrap().abs() < EPS);
}

#[tokio::test]
async fn test_stress_and_cosmic_are_clamped_and_queued() {
    let (state, reactor, _shutdown) = make_test_state();
    let router = build_router(state);

    let (status, json) = post(&router, "/api/v1/reactor/stress", r#"{"magnitude": 3.0}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["event"]["kind"], "manual_stress");
    assert!((json["event"]["magnitude"].as_f64().unwrap() - 1.0).abs() < EPS);

    let (status, json) = post(&router, "/api/v1/reactor/cosmic", r#"{"coupling": -2.0}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["event"]["kind"], "cosmic");
    assert!(json["event"]["magnitude"].as_f64().unwrap().abs() < EPS);

    let submitted = reactor.submitted();
    assert_eq!(submitted.events, 2);
    assert!((submitted.stress - 1.0).abs() < EPS);
}

#[tokio::test]
async fn test_cosmic_lands_in_residual_after_tick() {
    let (state, reactor, _shutdown) = make_test_state();
    let router = build_router(state);

    post(&router, "/api/v1/reactor/cosmic", r#"{"coupling": 0.5}"#).await;
    reactor.tick().await.unwrap();

    let (_, json) = get(&router, "/api/v1/reactor/status").await;
    assert!((json["geomagnetic_residual"].as_f64().unwrap() - 0.495).abs() < EPS);
    assert_eq!(json["tick"], 1);
}

#[tokio::test]
async fn test_hazard_earthquake_maps_to_seismic() {
    let (state, _reactor, _shutdown) = make_test_state();
    let router = build_router(state);

    let (status, json) = post(
        &router,
        "/api/v1/hazards",
        r#"{"kind": "earthquake", "magnitude": 4.5}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["event"]["kind"], "seismic");
    assert!((json["event"]["magnitude"].as_f64().unwrap() - 0.5).abs() < EPS);

    let (_, json) = post(
        &router,
        "/api/v1/hazards",
        r#"{"kind": "solar_flare", "class": "M"}"#,
    )
    .await;
    assert_eq!(json["event"]["kind"], "cosmic");
    assert!((json["event"]["magnitude"].as_f64().unwrap() - 0.7).abs() < EPS);
}

#[tokio::test]
async fn test_malformed_hazard_is_rejected() {
    let (state, _reactor, _shutdown) = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::post("/api/v1/hazards")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"kind": "volcano"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_stats_track_drained_stress() {
    let (state, reactor, _shutdown) = make_test_state();
    let router = build_router(state);

    post(&router, "/api/v1/reactor/start", "").await;
    post(&router, "/api/v1/reactor/stress", r#"{"magnitude": 0.25}"#).await;
    post(&router, "/api/v1/reactor/stress", r#"{"magnitude": 0.5}"#).await;
    reactor.tick().await.unwrap();

    let (status, json) = get(&router, "/api/v1/reactor/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reactor"]["ticks"], 1);
    assert_eq!(json["reactor"]["events_drained"], 2);
    assert!((json["reactor"]["stress_drained"].as_f64().unwrap() - 0.75).abs() < EPS);
    assert!((json["submitted"]["stress"].as_f64().unwrap() - 0.75).abs() < EPS);
}

#[tokio::test]
async fn test_commands_after_shutdown_return_503() {
    let (state, reactor, _shutdown) = make_test_state();
    let router = build_router(state);

    reactor.shutdown().await.unwrap();
    // Wait for the actor to drop its receiver.
    while reactor.is_available() {
        tokio::task::yield_now().await;
    }

    let (status, json) = post(&router, "/api/v1/reactor/start", "").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], 503);

    // The last published snapshot is still readable.
    let (status, json) = get(&router, "/api/v1/reactor/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "OFFLINE");
}

#[tokio::test]
async fn test_telemetry_broadcast() {
    let (state, reactor, shutdown) = make_test_state();
    let mut sub = state.subscribe();

    let receivers = state.telemetry.publish(reactor.status());
    assert_eq!(receivers, 1);

    let received = sub.next().await.unwrap();
    assert_eq!(received.tick, 0);

    shutdown.trigger();
    assert!(sub.next().await.is_none());
}

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let (state, _reactor, _shutdown) = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
