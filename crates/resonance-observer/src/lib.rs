//! Observer API server for the Resonance reactor simulation.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws/telemetry`) streaming reactor
//!   snapshots from the telemetry publisher
//! - **REST endpoints** for reading the latest snapshot and the actor's
//!   counters
//! - **Command endpoints** for the command port: start, SCRAM, control
//!   rods, stress and cosmic injection, hazard observations
//! - **Minimal HTML dashboard** (`GET /`) showing the latest snapshot
//!
//! # Architecture
//!
//! Handlers never touch the reactor state. Reads come from the snapshot
//! the reactor actor last published; commands are submitted through the
//! cloneable [`ReactorHandle`](resonance_core::ReactorHandle) and answered
//! by the actor once they have been applied.

pub mod error;
pub mod handlers;
pub mod operator;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::{StartupError, spawn_observer};
pub use state::AppState;
