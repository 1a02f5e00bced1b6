//! Per-tick physics step.
//!
//! [`advance`] is a pure function of the previous state, the tick inputs
//! and the physics constants. The only nondeterminism, the quantum jitter,
//! is sampled by [`PhysicsEngine`] from a seeded RNG and passed in through
//! [`TickInputs`], so the arithmetic itself can be tested exactly.
//!
//! One step runs, in order:
//!
//! 1. Geomagnetic residual decay.
//! 2. Phase noise from jitter, drained transient stress and the residual.
//! 3. Control rod damping.
//! 4. Energy potential.
//! 5. `k_eff`.
//! 6. Flux update (ignition floor, then growth clamped to the ceiling).
//! 7. Temperature update with a floor at ambient.
//! 8. Coherence self-healing and penalties.
//!
//! Transient stress is folded into the phase noise of the tick that drains
//! it and nothing else; the next tick recomputes phase noise from scratch.
//! A caller wanting a sustained effect must keep injecting.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::PhysicsConfig;
use crate::state::{AMBIENT_TEMPERATURE, ReactorState};

/// Externally supplied inputs for one physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInputs {
    /// Symmetric random perturbation, bounded by `quantum_jitter`.
    pub quantum_jitter: f64,
    /// Sum of seismic and manual stress drained for this tick.
    pub transient_noise: f64,
}

/// Multiply the geomagnetic residual by the per-tick decay factor.
pub fn decay_residual(state: &mut ReactorState, config: &PhysicsConfig) {
    state.geomagnetic_residual = (state.geomagnetic_residual * config.residual_decay).max(0.0);
}

/// Effective multiplication factor.
///
/// Returns 0 when the denominator is not positive instead of dividing.
pub const fn multiplication_factor(
    energy_potential: f64,
    geometry_const: f64,
    plasma_coherence: f64,
    denominator: f64,
) -> f64 {
    if denominator <= 0.0 {
        return 0.0;
    }
    (energy_potential * geometry_const * plasma_coherence) / denominator
}

/// Advance a running core by one tick.
///
/// The returned state has the same status, rod position and tick counter
/// as the input; status handling belongs to the safety controller.
pub fn advance(state: &ReactorState, inputs: TickInputs, config: &PhysicsConfig) -> ReactorState {
    let mut next = *state;

    // 1. Long-tail cosmic interference fades.
    decay_residual(&mut next, config);

    // 2. Instantaneous noise, recomputed from scratch every tick.
    next.phase_noise = (inputs.quantum_jitter
        + inputs.transient_noise
        + next.geomagnetic_residual * config.noise_coupling)
        .abs();

    // 3-5. Damping, energy potential, k_eff.
    let rod_damping = (next.control_rod_position / 100.0) * config.rod_damping;
    let energy_potential = (next.neutron_flux / 50.0) + config.fuel_ratio;
    let denominator = 1.0 + next.phase_noise + rod_damping;
    next.k_eff = multiplication_factor(
        energy_potential,
        config.geometry_const,
        next.plasma_coherence,
        denominator,
    );

    // 6. Flux.
    if next.neutron_flux < config.ignition_floor {
        next.neutron_flux = config.ignition_floor;
    } else {
        let delta = next.neutron_flux * (next.k_eff - 1.0) * config.flux_response;
        next.neutron_flux = (next.neutron_flux + delta).clamp(0.0, config.max_flux);
    }

    // 7. Temperature.
    let heat_gen = next.neutron_flux * config.heat_per_flux;
    let cooling_cap = config.cryo_cooling * config.cooling_per_unit;
    next.core_temperature = (next.core_temperature + (heat_gen - cooling_cap) * config.thermal_rate)
        .max(AMBIENT_TEMPERATURE);

    // 8. Coherence.
    let mut coherence_delta = config.coherence_recovery;
    if next.phase_noise > config.noise_penalty_threshold {
        coherence_delta -= config.noise_penalty;
    }
    if next.neutron_flux > config.overload_flux {
        coherence_delta -= config.overload_penalty;
    }
    next.plasma_coherence = (next.plasma_coherence + coherence_delta).clamp(0.0, 1.0);

    next
}

/// Physics constants plus the seeded jitter source.
#[derive(Debug, Clone)]
pub struct PhysicsEngine {
    config: PhysicsConfig,
    rng: StdRng,
}

impl PhysicsEngine {
    /// Create an engine whose jitter sequence is fixed by `seed`.
    pub fn new(config: PhysicsConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The physics constants in use.
    pub const fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Draw one jitter sample in `[-quantum_jitter, quantum_jitter]`.
    pub fn sample_jitter(&mut self) -> f64 {
        let bound = self.config.quantum_jitter;
        if bound > 0.0 {
            self.rng.random_range(-bound..=bound)
        } else {
            0.0
        }
    }

    /// Run one physics step with freshly sampled jitter.
    pub fn step(&mut self, state: &ReactorState, transient_noise: f64) -> ReactorState {
        let inputs = TickInputs {
            quantum_jitter: self.sample_jitter(),
            transient_noise,
        };
        advance(state, inputs, &self.config)
    }
}
