//! Enumeration types for the Resonance reactor simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Reactor status
// ---------------------------------------------------------------------------

/// Operating status of the reactor.
///
/// Transitions are owned by the safety controller:
///
/// ```text
/// OFFLINE -> STARTUP -> NOMINAL <-> WARNING <-> CRITICAL -> SCRAM -> OFFLINE
/// ```
///
/// A manual SCRAM can be forced from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactorStatus {
    /// Cold and idle. Ticks only decay the geomagnetic residual.
    Offline,
    /// Ignition requested; seeded but not yet through its first tick.
    Startup,
    /// Running inside every safety envelope.
    Nominal,
    /// Running with at least one warning threshold breached.
    Warning,
    /// Running with at least one critical threshold breached.
    Critical,
    /// Emergency shutdown in progress: flux halves every tick.
    Scram,
}

impl ReactorStatus {
    /// Whether the physics engine advances the core in this status.
    pub const fn is_running(self) -> bool {
        matches!(
            self,
            Self::Startup | Self::Nominal | Self::Warning | Self::Critical
        )
    }

    /// Upper-case label used in logs and the status page.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Offline => "OFFLINE",
            Self::Startup => "STARTUP",
            Self::Nominal => "NOMINAL",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Scram => "SCRAM",
        }
    }
}

impl std::fmt::Display for ReactorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Stimuli
// ---------------------------------------------------------------------------

/// Kind of externally injected stimulus.
///
/// Seismic and manual stress are transient: they add to the phase noise of
/// the tick that drains them and leave no state behind. Cosmic coupling is
/// persistent: it feeds the geomagnetic residual, which decays slowly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StimulusKind {
    /// Ground shock reported by the disaster feed.
    Seismic,
    /// Cosmic / geomagnetic coupling derived from solar data.
    Cosmic,
    /// Stress injected by an operator.
    ManualStress,
}

impl StimulusKind {
    /// Whether this stimulus only affects the tick that drains it.
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Seismic | Self::ManualStress)
    }
}

/// Solar flare X-ray class as reported by space weather feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlareClass {
    /// Background-level flare.
    A,
    /// Weak flare.
    B,
    /// Common flare.
    C,
    /// Medium flare; minor radio blackouts.
    M,
    /// Major flare.
    X,
}

impl FlareClass {
    /// Parse the leading letter of a class string such as `"M2.4"`.
    ///
    /// Unknown or empty strings fall back to [`FlareClass::B`].
    pub fn from_class_type(class_type: &str) -> Self {
        match class_type.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('A') => Self::A,
            Some('C') => Self::C,
            Some('M') => Self::M,
            Some('X') => Self::X,
            _ => Self::B,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_states() {
        assert!(!ReactorStatus::Offline.is_running());
        assert!(ReactorStatus::Startup.is_running());
        assert!(ReactorStatus::Nominal.is_running());
        assert!(ReactorStatus::Warning.is_running());
        assert!(ReactorStatus::Critical.is_running());
        assert!(!ReactorStatus::Scram.is_running());
    }

    #[test]
    fn status_serializes_upper_case() {
        let json = serde_json::to_string(&ReactorStatus::Scram).ok();
        assert_eq!(json.as_deref(), Some("\"SCRAM\""));
        assert_eq!(ReactorStatus::Warning.to_string(), "WARNING");
    }

    #[test]
    fn transient_kinds() {
        assert!(StimulusKind::Seismic.is_transient());
        assert!(StimulusKind::ManualStress.is_transient());
        assert!(!StimulusKind::Cosmic.is_transient());
    }

    #[test]
    fn flare_class_parsing() {
        assert_eq!(FlareClass::from_class_type("X1.2"), FlareClass::X);
        assert_eq!(FlareClass::from_class_type("m5.0"), FlareClass::M);
        assert_eq!(FlareClass::from_class_type("C3"), FlareClass::C);
        assert_eq!(FlareClass::from_class_type(""), FlareClass::B);
        assert_eq!(FlareClass::from_class_type("Q9"), FlareClass::B);
    }
}
