//! Reactor simulation engine for the Resonance disaster monitor.
//!
//! This crate owns the tick-driven reactor core. All mutation of the
//! reactor state goes through one serialization point, the reactor actor
//! in [`reactor`]; the clock, the command port and the hazard bridge only
//! ever submit work items to it.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `resonance-config.yaml` into
//!   strongly-typed structs.
//! - [`state`] -- The mutable reactor record and its snapshot projection.
//! - [`physics`] -- The per-tick physics step.
//! - [`events`] -- Thread-safe accumulator for injected stimuli.
//! - [`safety`] -- Status state machine, SCRAM trigger policy and decay.
//! - [`reactor`] -- The reactor actor and its [`ReactorHandle`] command port.
//! - [`clock`] -- Fixed-period tick driver.
//! - [`telemetry`] -- Fan-out of snapshots to subscribers at their own cadence.
//! - [`shutdown`] -- Cooperative shutdown signal for the background loops.
//! - [`hazard`] -- Mapping from disaster-feed observations to stimuli.
//!
//! [`ReactorHandle`]: reactor::ReactorHandle

pub mod clock;
pub mod config;
pub mod events;
pub mod hazard;
pub mod physics;
pub mod reactor;
pub mod safety;
pub mod shutdown;
pub mod state;
pub mod telemetry;

pub use config::ResonanceConfig;
pub use reactor::{ReactorError, ReactorHandle, TickReport, spawn_reactor};
pub use safety::StartOutcome;
pub use shutdown::{Shutdown, ShutdownListener};
pub use telemetry::{TelemetryPublisher, TelemetrySubscription};
