//! Core record types shared between the engine and its observers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{FlareClass, ReactorStatus, StimulusKind};

// ---------------------------------------------------------------------------
// Telemetry
// ---------------------------------------------------------------------------

/// Read-only copy of the reactor state taken after a completed mutation.
///
/// Snapshots are never assembled mid-tick: the reactor actor builds one
/// only after a tick or command has fully committed, so two reads with no
/// intervening mutation return bit-identical values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactorSnapshot {
    /// Wall-clock time at which the snapshot was taken.
    pub timestamp: DateTime<Utc>,
    /// Number of ticks completed when the snapshot was taken.
    pub tick: u64,
    /// Current operating status.
    pub status: ReactorStatus,
    /// Core temperature in Kelvin.
    pub core_temperature: f64,
    /// Neutron flux (arbitrary units, `>= 0`).
    pub neutron_flux: f64,
    /// Effective multiplication factor of the last tick.
    pub k_eff: f64,
    /// Control rod insertion, 0 (full power) to 100 (full damping).
    pub control_rod_position: f64,
    /// Resonance stability in `[0, 1]`.
    pub plasma_coherence: f64,
    /// Instantaneous decoherence of the last tick.
    pub phase_noise: f64,
    /// Slow-decaying cosmic interference accumulator.
    pub geomagnetic_residual: f64,
    /// Derived electrical output (`neutron_flux * 5`).
    pub generated_power: f64,
}

// ---------------------------------------------------------------------------
// Stimuli
// ---------------------------------------------------------------------------

/// An externally injected stimulus waiting for the next tick.
///
/// Pending events are created by the command port, buffered by the event
/// accumulator, and destroyed when a tick drains them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingEvent {
    /// What kind of stimulus this is.
    pub kind: StimulusKind,
    /// Clamped magnitude (stress in `[0, 1]`, cosmic coupling `>= 0`).
    pub magnitude: f64,
    /// When the command port accepted the event.
    pub received_at: DateTime<Utc>,
}

/// Running counters kept by the reactor actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactorStats {
    /// Ticks committed successfully.
    pub ticks: u64,
    /// Ticks that failed and left the previous state in place.
    pub failed_ticks: u64,
    /// Pending events drained across all ticks.
    pub events_drained: u64,
    /// Sum of transient stress magnitudes drained.
    pub stress_drained: f64,
    /// Portion of [`Self::stress_drained`] drained while the core was not running.
    pub stress_discarded: f64,
    /// Sum of cosmic coupling drained into the geomagnetic residual.
    pub cosmic_drained: f64,
    /// SCRAMs triggered by the safety controller.
    pub auto_scrams: u64,
    /// SCRAMs requested through the command port.
    pub manual_scrams: u64,
}

// ---------------------------------------------------------------------------
// Hazard feed
// ---------------------------------------------------------------------------

/// A hazard observation handed to the engine by the disaster feed.
///
/// The engine never calls the feed; the feed pushes observations and the
/// hazard bridge turns them into stimuli.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HazardObservation {
    /// An earthquake with its Richter magnitude.
    Earthquake {
        /// Reported magnitude (not normalized).
        magnitude: f64,
        /// Whether the feed flagged a tsunami.
        #[serde(default)]
        tsunami: bool,
    },
    /// A solar flare of the given class.
    SolarFlare {
        /// X-ray class of the flare.
        class: FlareClass,
    },
    /// A precomputed geomagnetic coupling factor.
    Geomagnetic {
        /// Coupling factor (`>= 0`).
        coupling: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazard_observation_wire_format() {
        let json = r#"{"kind":"earthquake","magnitude":6.3}"#;
        let parsed: Result<HazardObservation, _> = serde_json::from_str(json);
        assert!(matches!(
            parsed,
            Ok(HazardObservation::Earthquake { tsunami: false, .. })
        ));

        let json = r#"{"kind":"solar_flare","class":"X"}"#;
        let parsed: Result<HazardObservation, _> = serde_json::from_str(json);
        assert!(matches!(
            parsed,
            Ok(HazardObservation::SolarFlare {
                class: FlareClass::X
            })
        ));
    }

    #[test]
    fn stats_default_is_zeroed() {
        let stats = ReactorStats::default();
        assert_eq!(stats.ticks, 0);
        assert_eq!(stats.events_drained, 0);
        assert_eq!(stats.auto_scrams, 0);
    }
}
