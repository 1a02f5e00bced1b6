//! Shared application state for the Observer server.
//!
//! [`AppState`] pairs the reactor command port with the telemetry
//! publisher. Both are cheap to clone handles; the state itself is
//! wrapped in an [`Arc`](std::sync::Arc) and shared by every handler.

use resonance_core::{ReactorHandle, TelemetryPublisher, TelemetrySubscription};

/// State shared by all Observer handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Command port into the reactor actor.
    pub reactor: ReactorHandle,
    /// Snapshot fan-out for `WebSocket` clients.
    pub telemetry: TelemetryPublisher,
}

impl AppState {
    /// Create the shared state.
    pub const fn new(reactor: ReactorHandle, telemetry: TelemetryPublisher) -> Self {
        Self { reactor, telemetry }
    }

    /// Subscribe to the telemetry stream.
    pub fn subscribe(&self) -> TelemetrySubscription {
        self.telemetry.subscribe()
    }
}
