//! Safety state machine.
//!
//! The controller classifies a running core after each physics step and
//! owns the SCRAM sequence. Escalation from CRITICAL to SCRAM follows the
//! configured [`ScramTrigger`]:
//!
//! - `Stochastic`: each CRITICAL tick fires with a fixed probability drawn
//!   from a seeded RNG, so runs are reproducible for a given seed.
//! - `Hysteresis`: a SCRAM fires once CRITICAL has held for N consecutive
//!   ticks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use resonance_types::ReactorStatus;

use crate::config::{SafetyConfig, ScramTrigger};
use crate::state::{AMBIENT_TEMPERATURE, RODS_FULLY_INSERTED, ReactorState};

/// Flux below which a SCRAM is complete and the core goes OFFLINE.
pub const SCRAM_COMPLETE_FLUX: f64 = 1.0;

/// Result of a start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The core moved from OFFLINE to STARTUP.
    Started,
    /// The core was not OFFLINE; nothing changed.
    AlreadyRunning,
}

/// Runtime form of [`ScramTrigger`].
#[derive(Debug, Clone)]
enum ScramPolicy {
    Stochastic { probability: f64, rng: StdRng },
    Hysteresis { required: u32, streak: u32 },
}

impl ScramPolicy {
    fn new(trigger: ScramTrigger, seed: u64) -> Self {
        match trigger {
            ScramTrigger::Stochastic { probability } => Self::Stochastic {
                probability: if probability.is_nan() {
                    0.0
                } else {
                    probability.clamp(0.0, 1.0)
                },
                rng: StdRng::seed_from_u64(seed),
            },
            ScramTrigger::Hysteresis { consecutive_ticks } => Self::Hysteresis {
                required: consecutive_ticks.max(1),
                streak: 0,
            },
        }
    }

    /// Record one classified tick; returns `true` when a SCRAM must fire.
    fn observe(&mut self, status: ReactorStatus) -> bool {
        match self {
            Self::Stochastic { probability, rng } => {
                status == ReactorStatus::Critical && rng.random_bool(*probability)
            }
            Self::Hysteresis { required, streak } => {
                if status != ReactorStatus::Critical {
                    *streak = 0;
                    return false;
                }
                *streak = streak.saturating_add(1);
                *streak >= *required
            }
        }
    }

    const fn reset(&mut self) {
        if let Self::Hysteresis { streak, .. } = self {
            *streak = 0;
        }
    }
}

/// Classifies the core and drives the SCRAM sequence.
#[derive(Debug, Clone)]
pub struct SafetyController {
    config: SafetyConfig,
    policy: ScramPolicy,
}

impl SafetyController {
    /// Create a controller; `seed` feeds the stochastic trigger.
    pub fn new(config: SafetyConfig, seed: u64) -> Self {
        Self {
            policy: ScramPolicy::new(config.scram_trigger, seed),
            config,
        }
    }

    /// The thresholds in use.
    pub const fn config(&self) -> &SafetyConfig {
        &self.config
    }

    /// Classify a running core from absolute thresholds.
    ///
    /// CRITICAL takes precedence over WARNING.
    pub fn classify(&self, state: &ReactorState) -> ReactorStatus {
        let c = &self.config;
        if state.core_temperature > c.critical_temperature
            || state.plasma_coherence < c.critical_coherence
        {
            ReactorStatus::Critical
        } else if state.core_temperature > c.warning_temperature
            || state.plasma_coherence < c.warning_coherence
            || state.geomagnetic_residual > c.warning_residual
        {
            ReactorStatus::Warning
        } else {
            ReactorStatus::Nominal
        }
    }

    /// Update the status of a core that has just been advanced by physics.
    ///
    /// A core in STARTUP moves straight to NOMINAL. Any other running
    /// state is re-classified, and a CRITICAL result is offered to the
    /// SCRAM policy. Returns `true` if the policy engaged a SCRAM.
    pub fn evaluate(&mut self, state: &mut ReactorState) -> bool {
        match state.status {
            ReactorStatus::Startup => {
                state.status = ReactorStatus::Nominal;
                false
            }
            ReactorStatus::Nominal | ReactorStatus::Warning | ReactorStatus::Critical => {
                let classified = self.classify(state);
                state.status = classified;
                if self.policy.observe(classified) {
                    tracing::warn!(
                        tick = state.tick,
                        core_temperature = state.core_temperature,
                        plasma_coherence = state.plasma_coherence,
                        "Automatic SCRAM engaged"
                    );
                    self.engage_scram(state);
                    true
                } else {
                    false
                }
            }
            ReactorStatus::Offline | ReactorStatus::Scram => false,
        }
    }

    /// Force the SCRAM branch: rods in, noise maxed, coherence gone.
    pub fn engage_scram(&mut self, state: &mut ReactorState) {
        state.control_rod_position = RODS_FULLY_INSERTED;
        state.phase_noise = self.config.scram_noise;
        state.plasma_coherence = 0.0;
        state.status = ReactorStatus::Scram;
        self.policy.reset();
    }

    /// One tick of SCRAM decay. Moves the core OFFLINE once flux falls
    /// below [`SCRAM_COMPLETE_FLUX`].
    pub fn scram_decay(&self, state: &mut ReactorState) {
        state.control_rod_position = RODS_FULLY_INSERTED;
        state.neutron_flux *= self.config.scram_flux_decay;
        state.core_temperature +=
            (AMBIENT_TEMPERATURE - state.core_temperature) * self.config.scram_cooling_rate;
        state.k_eff = 0.0;
        if state.neutron_flux < SCRAM_COMPLETE_FLUX {
            state.status = ReactorStatus::Offline;
            state.phase_noise = 0.0;
            tracing::info!(tick = state.tick, "SCRAM complete, core offline");
        }
    }

    /// Seed an OFFLINE core into STARTUP.
    pub fn start(&mut self, state: &mut ReactorState) -> StartOutcome {
        if state.status != ReactorStatus::Offline {
            return StartOutcome::AlreadyRunning;
        }
        state.status = ReactorStatus::Startup;
        state.plasma_coherence = self.config.startup_coherence;
        state.neutron_flux = self.config.startup_flux;
        self.policy.reset();
        StartOutcome::Started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn hysteresis(n: u32) -> SafetyConfig {
        SafetyConfig {
            scram_trigger: ScramTrigger::Hysteresis {
                consecutive_ticks: n,
            },
            ..SafetyConfig::default()
        }
    }

    fn nominal() -> ReactorState {
        ReactorState {
            status: ReactorStatus::Nominal,
            neutron_flux: 10.0,
            plasma_coherence: 0.9,
            ..ReactorState::offline()
        }
    }

    #[test]
    fn classify_thresholds() {
        let safety = SafetyController::new(SafetyConfig::default(), 0);
        let mut state = nominal();
        assert_eq!(safety.classify(&state), ReactorStatus::Nominal);

        state.plasma_coherence = 0.59;
        assert_eq!(safety.classify(&state), ReactorStatus::Warning);

        state.plasma_coherence = 0.9;
        state.geomagnetic_residual = 0.6;
        assert_eq!(safety.classify(&state), ReactorStatus::Warning);

        state.geomagnetic_residual = 0.0;
        state.core_temperature = 1600.0;
        assert_eq!(safety.classify(&state), ReactorStatus::Warning);

        state.core_temperature = 2600.0;
        assert_eq!(safety.classify(&state), ReactorStatus::Critical);

        state.core_temperature = 300.0;
        state.plasma_coherence = 0.1;
        assert_eq!(safety.classify(&state), ReactorStatus::Critical);
    }

    #[test]
    fn startup_goes_nominal_without_thresholds() {
        let mut safety = SafetyController::new(SafetyConfig::default(), 0);
        let mut state = ReactorState::offline();
        assert_eq!(safety.start(&mut state), StartOutcome::Started);
        assert_eq!(state.status, ReactorStatus::Startup);
        assert!((state.plasma_coherence - 0.5).abs() < EPS);
        assert!((state.neutron_flux - 1.0).abs() < EPS);

        // Coherence 0.5 would classify as WARNING; STARTUP skips that.
        assert!(!safety.evaluate(&mut state));
        assert_eq!(state.status, ReactorStatus::Nominal);
    }

    #[test]
    fn start_is_idempotent() {
        let mut safety = SafetyController::new(SafetyConfig::default(), 0);
        let mut state = nominal();
        let before = state;
        assert_eq!(safety.start(&mut state), StartOutcome::AlreadyRunning);
        assert_eq!(state, before);
    }

    #[test]
    fn hysteresis_needs_consecutive_critical_ticks() {
        let mut safety = SafetyController::new(hysteresis(3), 0);
        let mut state = nominal();
        state.core_temperature = 3000.0;

        assert!(!safety.evaluate(&mut state));
        assert!(!safety.evaluate(&mut state));
        assert_eq!(state.status, ReactorStatus::Critical);

        // One cool tick resets the streak.
        state.core_temperature = 300.0;
        assert!(!safety.evaluate(&mut state));
        assert_eq!(state.status, ReactorStatus::Nominal);

        state.core_temperature = 3000.0;
        assert!(!safety.evaluate(&mut state));
        assert!(!safety.evaluate(&mut state));
        assert!(safety.evaluate(&mut state));
        assert_eq!(state.status, ReactorStatus::Scram);
    }

    #[test]
    fn stochastic_certain_and_never() {
        let always = SafetyConfig {
            scram_trigger: ScramTrigger::Stochastic { probability: 1.0 },
            ..SafetyConfig::default()
        };
        let mut safety = SafetyController::new(always, 7);
        let mut state = nominal();
        state.plasma_coherence = 0.05;
        assert!(safety.evaluate(&mut state));
        assert_eq!(state.status, ReactorStatus::Scram);

        let never = SafetyConfig {
            scram_trigger: ScramTrigger::Stochastic { probability: 0.0 },
            ..SafetyConfig::default()
        };
        let mut safety = SafetyController::new(never, 7);
        let mut state = nominal();
        state.plasma_coherence = 0.05;
        for _ in 0..100 {
            assert!(!safety.evaluate(&mut state));
        }
        assert_eq!(state.status, ReactorStatus::Critical);
    }

    #[test]
    fn stochastic_is_reproducible_for_a_seed() {
        let run = |seed| {
            let mut safety = SafetyController::new(SafetyConfig::default(), seed);
            let mut state = nominal();
            state.core_temperature = 3000.0;
            let mut ticks = 0_u32;
            while state.status != ReactorStatus::Scram && ticks < 10_000 {
                safety.evaluate(&mut state);
                ticks = ticks.saturating_add(1);
            }
            ticks
        };
        assert_eq!(run(42), run(42));
        assert!(run(42) < 10_000);
    }

    #[test]
    fn scram_forces_rods_noise_and_coherence() {
        let mut safety = SafetyController::new(SafetyConfig::default(), 0);
        let mut state = nominal();
        state.control_rod_position = 10.0;
        safety.engage_scram(&mut state);
        assert_eq!(state.status, ReactorStatus::Scram);
        assert!((state.control_rod_position - 100.0).abs() < EPS);
        assert!((state.phase_noise - 10.0).abs() < EPS);
        assert!(state.plasma_coherence.abs() < EPS);
    }

    #[test]
    fn scram_decays_to_offline() {
        let mut safety = SafetyController::new(SafetyConfig::default(), 0);
        let mut state = nominal();
        state.neutron_flux = 4.0;
        state.core_temperature = 1300.0;
        safety.engage_scram(&mut state);

        safety.scram_decay(&mut state);
        assert!((state.neutron_flux - 2.0).abs() < EPS);
        assert!((state.core_temperature - 1200.0).abs() < EPS);
        assert!(state.k_eff.abs() < EPS);
        assert_eq!(state.status, ReactorStatus::Scram);

        safety.scram_decay(&mut state);
        assert_eq!(state.status, ReactorStatus::Scram);
        safety.scram_decay(&mut state);
        assert!((state.neutron_flux - 0.5).abs() < EPS);
        assert_eq!(state.status, ReactorStatus::Offline);
    }

    #[test]
    fn offline_and_scram_are_not_reclassified() {
        let mut safety = SafetyController::new(SafetyConfig::default(), 0);
        let mut state = ReactorState::offline();
        assert!(!safety.evaluate(&mut state));
        assert_eq!(state.status, ReactorStatus::Offline);

        state.status = ReactorStatus::Scram;
        assert!(!safety.evaluate(&mut state));
        assert_eq!(state.status, ReactorStatus::Scram);
    }
}
