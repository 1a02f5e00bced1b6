//! `WebSocket` handler for real-time telemetry streaming.
//!
//! Clients connect to `GET /ws/telemetry` and receive the latest snapshot
//! right away, then a JSON-encoded [`ReactorSnapshot`] each time the
//! telemetry publisher fires. Each client holds its own
//! [`TelemetrySubscription`](resonance_core::TelemetrySubscription), so a
//! slow client only ever skips its own backlog.
//!
//! [`ReactorSnapshot`]: resonance_types::ReactorSnapshot

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use resonance_types::ReactorSnapshot;
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming snapshots.
///
/// # Route
///
/// `GET /ws/telemetry`
pub async fn ws_telemetry(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Encode a snapshot as a text frame, or `None` if it cannot be encoded.
fn encode(snapshot: &ReactorSnapshot) -> Option<Message> {
    match serde_json::to_string(snapshot) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            warn!("Failed to serialize snapshot: {e}");
            None
        }
    }
}

/// Handle the `WebSocket` lifecycle: subscribe to telemetry and forward
/// each snapshot as a text frame until either side goes away.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket client connected");

    let mut subscription = state.subscribe();

    if let Some(msg) = encode(&state.reactor.status()) {
        if socket.send(msg).await.is_err() {
            debug!("WebSocket client disconnected (initial send failed)");
            return;
        }
    }

    loop {
        tokio::select! {
            // Next snapshot from the publisher.
            next = subscription.next() => {
                let Some(snapshot) = next else {
                    debug!("Telemetry closed, shutting down WebSocket");
                    // Best effort: the client may already be gone.
                    if socket.send(Message::Close(None)).await.is_err() {
                        debug!("WebSocket client gone before close frame");
                    }
                    return;
                };
                let Some(msg) = encode(&snapshot) else {
                    continue;
                };
                if socket.send(msg).await.is_err() {
                    debug!("WebSocket client disconnected (send failed)");
                    return;
                }
            }
            // Check if the client sent a close frame or disconnected.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    _ => {
                        // Ignore other message types (text, binary from client).
                    }
                }
            }
        }
    }
}
