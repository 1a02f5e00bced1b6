//! Hazard bridge: maps disaster-feed observations onto reactor stimuli.
//!
//! Earthquakes become seismic stress, solar activity becomes cosmic
//! coupling. The mapping is a pure function; the command port enqueues
//! the result.

use resonance_types::{FlareClass, HazardObservation, StimulusKind};

/// Magnitude treated as full-scale seismic stress.
pub const FULL_SCALE_MAGNITUDE: f64 = 9.0;

/// A stimulus ready to be submitted to the event accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stimulus {
    /// Persistence class of the stimulus.
    pub kind: StimulusKind,
    /// Stress magnitude or cosmic coupling, before clamping.
    pub magnitude: f64,
}

/// Coupling factor for a solar flare class.
pub const fn flare_coupling(class: FlareClass) -> f64 {
    match class {
        FlareClass::X => 1.0,
        FlareClass::M => 0.7,
        FlareClass::A | FlareClass::B | FlareClass::C => 0.3,
    }
}

/// Translate one observation into a stimulus.
pub fn stimulus_for(observation: &HazardObservation) -> Stimulus {
    match *observation {
        HazardObservation::Earthquake { tsunami: true, .. } => Stimulus {
            kind: StimulusKind::Seismic,
            magnitude: 1.0,
        },
        HazardObservation::Earthquake { magnitude, .. } => Stimulus {
            kind: StimulusKind::Seismic,
            magnitude: magnitude / FULL_SCALE_MAGNITUDE,
        },
        HazardObservation::SolarFlare { class } => Stimulus {
            kind: StimulusKind::Cosmic,
            magnitude: flare_coupling(class),
        },
        HazardObservation::Geomagnetic { coupling } => Stimulus {
            kind: StimulusKind::Cosmic,
            magnitude: coupling,
        },
    }
}
