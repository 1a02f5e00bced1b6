//! Engine binary for the Resonance reactor simulation.
//!
//! This is the main entry point that wires together the reactor actor,
//! the fixed-period clock, the telemetry publisher and the Observer API.
//! It loads configuration, starts every subsystem, and runs until Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `resonance-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Spawn the reactor actor
//! 4. Start the telemetry publisher
//! 5. Start the Observer API server
//! 6. Optionally start the reactor
//! 7. Start the clock
//! 8. Wait for Ctrl-C, then shut everything down in reverse order

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use resonance_core::clock::{self, ClockStopReason};
use resonance_core::config::ResonanceConfig;
use resonance_core::telemetry;
use resonance_core::{Shutdown, TelemetryPublisher, spawn_reactor};
use resonance_observer::{AppState, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "resonance-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the shutdown sequence
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        tick_interval_ms = config.reactor.tick_interval_ms,
        seed = config.reactor.seed,
        scram_trigger = ?config.safety.scram_trigger,
        publish_interval_ms = config.telemetry.publish_interval_ms,
        "resonance-engine starting"
    );

    run(config).await?;
    Ok(())
}

/// Start every subsystem, wait for Ctrl-C, and shut down cleanly.
async fn run(config: ResonanceConfig) -> Result<(), EngineError> {
    let shutdown = Shutdown::new();

    // 3. Reactor actor.
    let (reactor, actor) = spawn_reactor(&config);
    info!(status = %reactor.status().status, "Reactor actor spawned");

    // 4. Telemetry publisher.
    let publisher = TelemetryPublisher::new(config.telemetry.channel_capacity, shutdown.listener());
    let telemetry_task = telemetry::spawn_telemetry(
        publisher.clone(),
        reactor.watch_snapshots(),
        config.telemetry.publish_interval(),
        shutdown.listener(),
    );
    info!(
        publish_interval_ms = config.telemetry.publish_interval_ms,
        "Telemetry publisher started"
    );

    // 5. Observer API server.
    let app_state = Arc::new(AppState::new(reactor.clone(), publisher));
    let observer = resonance_observer::spawn_observer(
        ServerConfig::from(&config.observer),
        app_state,
        shutdown.listener(),
    )?;

    // 6. Optional auto-start.
    if config.reactor.auto_start {
        let outcome = reactor.start_reactor().await?;
        info!(?outcome, "Reactor auto-started");
    }

    // 7. Clock.
    let mut clock_task = tokio::spawn(clock::run_clock(
        reactor.clone(),
        config.reactor.tick_interval(),
        shutdown.listener(),
    ));

    // 8. Run until Ctrl-C or until the clock gives up.
    let finished = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!(error = %e, "Failed to listen for Ctrl-C; shutting down");
            } else {
                info!("Ctrl-C received, shutting down");
            }
            None
        }
        summary = &mut clock_task => Some(summary),
    };
    shutdown.trigger();
    let clock_summary = match finished {
        Some(summary) => summary.map_err(|e| task_error("clock", &e))?,
        None => join(clock_task, "clock").await?,
    };
    if clock_summary.stop_reason == ClockStopReason::ReactorUnavailable {
        warn!("Clock stopped because the reactor actor went away");
    }

    let final_snapshot = match reactor.shutdown().await {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(error = %e, "Reactor already stopped");
            None
        }
    };
    let stats = join(actor, "reactor").await?;
    let published = join(telemetry_task, "telemetry").await?;
    join(observer, "observer").await?;

    info!(
        ticks = clock_summary.ticks,
        failed_ticks = clock_summary.failed_ticks,
        auto_scrams = stats.auto_scrams,
        manual_scrams = stats.manual_scrams,
        events_drained = stats.events_drained,
        telemetry_published = published,
        final_status = ?final_snapshot.map(|s| s.status),
        "resonance-engine shutdown complete"
    );

    Ok(())
}

/// Await a background task, mapping a panic or cancellation to
/// [`EngineError::Task`].
async fn join<T, H>(handle: H, name: &str) -> Result<T, EngineError>
where
    H: std::future::Future<Output = Result<T, tokio::task::JoinError>>,
{
    handle.await.map_err(|e| task_error(name, &e))
}

fn task_error(name: &str, e: &tokio::task::JoinError) -> EngineError {
    EngineError::Task {
        message: format!("{name} task failed: {e}"),
    }
}

/// Load configuration from `RESONANCE_CONFIG` or `resonance-config.yaml`.
///
/// A missing file yields the defaults, with environment overrides still
/// applied.
fn load_config() -> Result<ResonanceConfig, EngineError> {
    let config_path = std::env::var("RESONANCE_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if config_path.exists() {
        Ok(ResonanceConfig::from_file(&config_path)?)
    } else {
        Ok(ResonanceConfig::parse("")?)
    }
}
