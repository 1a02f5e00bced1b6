//! The mutable reactor record.
//!
//! [`ReactorState`] is owned exclusively by the reactor actor. It is
//! `Copy` so a tick can work on a private copy and commit it in one
//! assignment once every field has been validated.

use chrono::{DateTime, Utc};
use resonance_types::{ReactorSnapshot, ReactorStatus};

/// Temperature of a cold core, in Kelvin.
pub const AMBIENT_TEMPERATURE: f64 = 300.0;

/// Control rod position with the rods fully inserted.
pub const RODS_FULLY_INSERTED: f64 = 100.0;

/// Control rod position with the rods fully withdrawn.
pub const RODS_FULLY_WITHDRAWN: f64 = 0.0;

/// Errors raised when a tick produces a state that cannot be committed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TickError {
    /// A physical quantity became NaN or infinite.
    #[error("non-finite value in field `{field}`")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,
}

/// Physical record of the reactor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactorState {
    /// Current operating status.
    pub status: ReactorStatus,
    /// Core temperature in Kelvin (floor 300).
    pub core_temperature: f64,
    /// Neutron flux, `>= 0`.
    pub neutron_flux: f64,
    /// Effective multiplication factor derived by the last tick.
    pub k_eff: f64,
    /// Control rod insertion in `[0, 100]`.
    pub control_rod_position: f64,
    /// Resonance stability in `[0, 1]`.
    pub plasma_coherence: f64,
    /// Instantaneous decoherence of the last tick.
    pub phase_noise: f64,
    /// Slow-decaying cosmic interference, `>= 0`.
    pub geomagnetic_residual: f64,
    /// Number of ticks committed.
    pub tick: u64,
    /// When the last tick committed, if any has.
    pub last_tick_at: Option<DateTime<Utc>>,
}

impl ReactorState {
    /// A cold, offline core with the rods fully inserted.
    pub const fn offline() -> Self {
        Self {
            status: ReactorStatus::Offline,
            core_temperature: AMBIENT_TEMPERATURE,
            neutron_flux: 0.0,
            k_eff: 0.0,
            control_rod_position: RODS_FULLY_INSERTED,
            plasma_coherence: 0.0,
            phase_noise: 0.0,
            geomagnetic_residual: 0.0,
            tick: 0,
            last_tick_at: None,
        }
    }

    /// Electrical output derived from flux.
    pub const fn generated_power(&self, heat_per_flux: f64) -> f64 {
        self.neutron_flux * heat_per_flux
    }

    /// Project the state into a telemetry snapshot stamped `timestamp`.
    pub fn snapshot(&self, heat_per_flux: f64, timestamp: DateTime<Utc>) -> ReactorSnapshot {
        ReactorSnapshot {
            timestamp,
            tick: self.tick,
            status: self.status,
            core_temperature: self.core_temperature,
            neutron_flux: self.neutron_flux,
            k_eff: self.k_eff,
            control_rod_position: self.control_rod_position,
            plasma_coherence: self.plasma_coherence,
            phase_noise: self.phase_noise,
            geomagnetic_residual: self.geomagnetic_residual,
            generated_power: self.generated_power(heat_per_flux),
        }
    }

    /// Reject states holding NaN or infinite quantities.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::NonFinite`] naming the first bad field.
    pub fn ensure_finite(&self) -> Result<(), TickError> {
        for (field, value) in [
            ("core_temperature", self.core_temperature),
            ("neutron_flux", self.neutron_flux),
            ("k_eff", self.k_eff),
            ("control_rod_position", self.control_rod_position),
            ("plasma_coherence", self.plasma_coherence),
            ("phase_noise", self.phase_noise),
            ("geomagnetic_residual", self.geomagnetic_residual),
        ] {
            if !value.is_finite() {
                return Err(TickError::NonFinite { field });
            }
        }
        Ok(())
    }
}

impl Default for ReactorState {
    fn default() -> Self {
        Self::offline()
    }
}

/// Clamp a rod position request into `[0, 100]`; NaN reads as fully inserted.
pub const fn clamp_rod_position(position: f64) -> f64 {
    if position.is_nan() {
        return RODS_FULLY_INSERTED;
    }
    position.clamp(RODS_FULLY_WITHDRAWN, RODS_FULLY_INSERTED)
}
