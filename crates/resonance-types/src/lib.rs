//! Shared type definitions for the Resonance reactor simulation.
//!
//! This crate is the single source of truth for the values that cross
//! crate boundaries: the reactor status enum, the telemetry snapshot, the
//! pending stimulus events, and the hazard observations the disaster feed
//! hands to the engine.
//!
//! # Modules
//!
//! - [`enums`] -- Enumeration types (reactor status, stimulus kinds, flare classes)
//! - [`structs`] -- Snapshot, pending event, stats and hazard records

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{FlareClass, ReactorStatus, StimulusKind};
pub use structs::{HazardObservation, PendingEvent, ReactorSnapshot, ReactorStats};
