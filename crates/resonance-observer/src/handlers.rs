//! REST read endpoints for the Observer server.
//!
//! Status reads come from the snapshot the reactor actor last published,
//! so they never wait on a tick in progress. Stats go through the actor.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/v1/reactor/status` | Latest reactor snapshot |
//! | `GET` | `/api/v1/reactor/stats` | Actor counters and submitted totals |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the latest snapshot and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snap = state.reactor.status();
    let status = snap.status;
    let tick = snap.tick;
    let temperature = format!("{:.1} K", snap.core_temperature);
    let flux = format!("{:.3}", snap.neutron_flux);
    let k_eff = format!("{:.4}", snap.k_eff);
    let rods = format!("{:.0}%", snap.control_rod_position);
    let coherence = format!("{:.3}", snap.plasma_coherence);
    let residual = format!("{:.4}", snap.geomagnetic_residual);
    let power = format!("{:.1}", snap.generated_power);
    let subscribers = state.telemetry.subscriber_count();
    let status_color = match status {
        resonance_types::ReactorStatus::Nominal => "#3fb950",
        resonance_types::ReactorStatus::Warning | resonance_types::ReactorStatus::Startup => {
            "#d29922"
        }
        resonance_types::ReactorStatus::Critical | resonance_types::ReactorStatus::Scram => {
            "#f85149"
        }
        resonance_types::ReactorStatus::Offline => "#8b949e",
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Resonance Reactor</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        .status {{ color: {status_color}; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Resonance Reactor</h1>
    <p class="subtitle">Reactor simulation core -- disaster monitor</p>

    <p>Status: <span class="status">{status}</span></p>

    <div>
        <div class="metric">
            <div class="label">Tick</div>
            <div class="value">{tick}</div>
        </div>
        <div class="metric">
            <div class="label">Core temperature</div>
            <div class="value">{temperature}</div>
        </div>
        <div class="metric">
            <div class="label">Neutron flux</div>
            <div class="value">{flux}</div>
        </div>
        <div class="metric">
            <div class="label">k_eff</div>
            <div class="value">{k_eff}</div>
        </div>
        <div class="metric">
            <div class="label">Control rods</div>
            <div class="value">{rods}</div>
        </div>
        <div class="metric">
            <div class="label">Coherence</div>
            <div class="value">{coherence}</div>
        </div>
        <div class="metric">
            <div class="label">Geomagnetic residual</div>
            <div class="value">{residual}</div>
        </div>
        <div class="metric">
            <div class="label">Power</div>
            <div class="value">{power}</div>
        </div>
        <div class="metric">
            <div class="label">Subscribers</div>
            <div class="value">{subscribers}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li>GET <a href="/api/v1/reactor/status">/api/v1/reactor/status</a> -- Latest snapshot</li>
        <li>GET <a href="/api/v1/reactor/stats">/api/v1/reactor/stats</a> -- Actor counters</li>
        <li>POST /api/v1/reactor/start -- Start the reactor</li>
        <li>POST /api/v1/reactor/scram -- Manual SCRAM</li>
        <li>POST /api/v1/reactor/rods -- Move control rods (<code>{{"position": 0-100}}</code>)</li>
        <li>POST /api/v1/reactor/stress -- Inject stress (<code>{{"magnitude": 0-1}}</code>)</li>
        <li>POST /api/v1/reactor/cosmic -- Inject cosmic coupling (<code>{{"coupling": c}}</code>)</li>
        <li>POST /api/v1/hazards -- Apply a hazard observation</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li><code>ws://host:port/ws/telemetry</code> -- Live snapshot stream</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/v1/reactor/status
// ---------------------------------------------------------------------------

/// Return the latest published snapshot.
///
/// Served from the actor's last publication, so it keeps answering even
/// after the actor has stopped.
pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.reactor.status())
}

// ---------------------------------------------------------------------------
// GET /api/v1/reactor/stats
// ---------------------------------------------------------------------------

/// Return the actor's counters alongside the totals of every stimulus
/// accepted by the command port.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let stats = state.reactor.stats().await?;
    let submitted = state.reactor.submitted();

    Ok(Json(serde_json::json!({
        "reactor": stats,
        "submitted": {
            "events": submitted.events,
            "stress": submitted.stress,
            "cosmic": submitted.cosmic,
        },
        "telemetry_subscribers": state.telemetry.subscriber_count(),
    })))
}
