//! Axum router construction for the Observer API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::operator;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Observer server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws/telemetry` -- `WebSocket` snapshot stream
/// - `GET /api/v1/reactor/status` -- latest snapshot
/// - `GET /api/v1/reactor/stats` -- actor counters
/// - `POST /api/v1/reactor/start` -- start the reactor
/// - `POST /api/v1/reactor/scram` -- manual SCRAM
/// - `POST /api/v1/reactor/rods` -- move the control rods
/// - `POST /api/v1/reactor/stress` -- queue manual stress
/// - `POST /api/v1/reactor/cosmic` -- queue cosmic coupling
/// - `POST /api/v1/hazards` -- apply a hazard observation
///
/// CORS is configured to allow any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/telemetry", get(ws::ws_telemetry))
        // Reads
        .route("/api/v1/reactor/status", get(handlers::get_status))
        .route("/api/v1/reactor/stats", get(handlers::get_stats))
        // Command port
        .route("/api/v1/reactor/start", post(operator::start))
        .route("/api/v1/reactor/scram", post(operator::scram))
        .route("/api/v1/reactor/rods", post(operator::set_rods))
        .route("/api/v1/reactor/stress", post(operator::inject_stress))
        .route("/api/v1/reactor/cosmic", post(operator::inject_cosmic))
        .route("/api/v1/hazards", post(operator::apply_hazard))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
