//! Command port endpoints.
//!
//! Each handler translates one HTTP request into one command on the
//! [`ReactorHandle`](resonance_core::ReactorHandle). Commands that mutate
//! the core answer with the snapshot published right after they were
//! applied; stimuli answer with the event as it was queued. Out-of-range
//! values are clamped, never rejected.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/v1/reactor/start` | Start the reactor (idempotent) |
//! | `POST` | `/api/v1/reactor/scram` | Manual SCRAM |
//! | `POST` | `/api/v1/reactor/rods` | Move the control rods |
//! | `POST` | `/api/v1/reactor/stress` | Queue manual stress |
//! | `POST` | `/api/v1/reactor/cosmic` | Queue cosmic coupling |
//! | `POST` | `/api/v1/hazards` | Apply a disaster-feed observation |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use resonance_core::StartOutcome;
use resonance_types::{HazardObservation, PendingEvent, ReactorSnapshot};

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/v1/reactor/rods`.
#[derive(Debug, serde::Deserialize)]
pub struct SetRodsRequest {
    /// Target insertion, clamped to `[0, 100]`.
    pub position: f64,
}

/// Request body for `POST /api/v1/reactor/stress`.
#[derive(Debug, serde::Deserialize)]
pub struct InjectStressRequest {
    /// Stress magnitude, clamped to `[0, 1]`.
    pub magnitude: f64,
}

/// Request body for `POST /api/v1/reactor/cosmic`.
#[derive(Debug, serde::Deserialize)]
pub struct InjectCosmicRequest {
    /// Coupling factor, clamped to `>= 0`.
    pub coupling: f64,
}

/// Generic success response.
#[derive(Debug, serde::Serialize)]
struct OperatorResponse {
    /// Whether the operation succeeded.
    ok: bool,
    /// Human-readable message.
    message: String,
}

/// Response for commands that mutate the core.
#[derive(Debug, serde::Serialize)]
struct CommandResponse {
    ok: bool,
    message: String,
    snapshot: ReactorSnapshot,
}

/// Response for queued stimuli.
#[derive(Debug, serde::Serialize)]
struct QueuedResponse {
    ok: bool,
    message: String,
    event: PendingEvent,
}

// ---------------------------------------------------------------------------
// POST /api/v1/reactor/start
// ---------------------------------------------------------------------------

/// Start the reactor. Starting a running reactor is a successful no-op.
pub async fn start(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ObserverError> {
    let message = match state.reactor.start_reactor().await? {
        StartOutcome::Started => "Reactor starting",
        StartOutcome::AlreadyRunning => "Reactor already running",
    };

    Ok(Json(OperatorResponse {
        ok: true,
        message: message.to_owned(),
    }))
}

// ---------------------------------------------------------------------------
// POST /api/v1/reactor/scram
// ---------------------------------------------------------------------------

/// Force a SCRAM immediately, bypassing threshold evaluation.
pub async fn scram(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.reactor.manual_scram().await?;

    Ok(Json(CommandResponse {
        ok: true,
        message: "SCRAM engaged".to_owned(),
        snapshot,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/v1/reactor/rods
// ---------------------------------------------------------------------------

/// Move the control rods.
pub async fn set_rods(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetRodsRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    let snapshot = state.reactor.set_control_rods(body.position).await?;

    Ok(Json(CommandResponse {
        ok: true,
        message: format!("Control rods at {:.1}", snapshot.control_rod_position),
        snapshot,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/v1/reactor/stress
// ---------------------------------------------------------------------------

/// Queue manual stress for the next tick.
pub async fn inject_stress(
    State(state): State<Arc<AppState>>,
    Json(body): Json<InjectStressRequest>,
) -> impl IntoResponse {
    let event = state.reactor.inject_stress(body.magnitude);

    Json(QueuedResponse {
        ok: true,
        message: format!("Stress {:.3} queued for next tick", event.magnitude),
        event,
    })
}

// ---------------------------------------------------------------------------
// POST /api/v1/reactor/cosmic
// ---------------------------------------------------------------------------

/// Queue cosmic coupling for the next tick.
pub async fn inject_cosmic(
    State(state): State<Arc<AppState>>,
    Json(body): Json<InjectCosmicRequest>,
) -> impl IntoResponse {
    let event = state.reactor.inject_cosmic(body.coupling);

    Json(QueuedResponse {
        ok: true,
        message: format!("Cosmic coupling {:.3} queued for next tick", event.magnitude),
        event,
    })
}

// ---------------------------------------------------------------------------
// POST /api/v1/hazards
// ---------------------------------------------------------------------------

/// Translate a hazard observation into a stimulus and queue it.
pub async fn apply_hazard(
    State(state): State<Arc<AppState>>,
    Json(observation): Json<HazardObservation>,
) -> impl IntoResponse {
    let event = state.reactor.apply_hazard(&observation);

    Json(QueuedResponse {
        ok: true,
        message: format!("Hazard queued as {:?} {:.3}", event.kind, event.magnitude),
        event,
    })
}
