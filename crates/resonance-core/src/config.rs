//! Configuration loading and typed config structures for the Resonance simulation.
//!
//! The canonical configuration lives in `resonance-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//! Every field has a serde default equal to the reference constant, so an
//! empty file yields the reference reactor.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds values the engine cannot run with.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `resonance-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResonanceConfig {
    /// Tick cadence, seeding and actor sizing.
    #[serde(default)]
    pub reactor: ReactorConfig,

    /// Physics constants.
    #[serde(default)]
    pub physics: PhysicsConfig,

    /// Safety thresholds and SCRAM behavior.
    #[serde(default)]
    pub safety: SafetyConfig,

    /// Telemetry cadence and channel sizing.
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Observer HTTP server binding.
    #[serde(default)]
    pub observer: ObserverConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ResonanceConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `OBSERVER_HOST` overrides `observer.host`
    /// - `OBSERVER_PORT` overrides `observer.port`
    /// - `RESONANCE_TICK_INTERVAL_MS` overrides `reactor.tick_interval_ms`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, apply environment
    /// overrides, and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.reactor.apply_env_overrides();
        config.observer.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable by the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reactor.tick_interval_ms == 0 {
            return Err(invalid("reactor.tick_interval_ms must be at least 1"));
        }
        if self.reactor.command_capacity == 0 {
            return Err(invalid("reactor.command_capacity must be at least 1"));
        }
        if self.telemetry.publish_interval_ms == 0 {
            return Err(invalid("telemetry.publish_interval_ms must be at least 1"));
        }
        if self.telemetry.channel_capacity == 0 {
            return Err(invalid("telemetry.channel_capacity must be at least 1"));
        }
        self.physics.validate()?;
        self.safety.validate()
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_owned(),
    }
}

fn require_finite(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            reason: format!("{name} must be finite (got {value})"),
        })
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    require_finite(name, value)?;
    if value < 0.0 {
        return Err(ConfigError::Invalid {
            reason: format!("{name} must be non-negative (got {value})"),
        });
    }
    Ok(())
}

/// Tick cadence and actor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReactorConfig {
    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Seed for quantum jitter and the stochastic SCRAM trigger.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Issue `StartReactor` as soon as the engine is up.
    #[serde(default)]
    pub auto_start: bool,

    /// Bound of the reactor actor's work queue.
    #[serde(default = "default_command_capacity")]
    pub command_capacity: usize,
}

impl ReactorConfig {
    /// The tick period as a [`Duration`].
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Override the tick period from `RESONANCE_TICK_INTERVAL_MS` when set
    /// to a valid integer.
    pub fn apply_env_overrides(&mut self) {
        if let Some(ms) = std::env::var("RESONANCE_TICK_INTERVAL_MS")
            .ok()
            .and_then(|val| val.parse().ok())
        {
            self.tick_interval_ms = ms;
        }
    }
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            seed: default_seed(),
            auto_start: false,
            command_capacity: default_command_capacity(),
        }
    }
}

/// Physics constants consumed by [`crate::physics`].
///
/// The values are placeholders with no physical meaning; only the numeric
/// contract between them matters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PhysicsConfig {
    /// Core geometry constant in the `k_eff` numerator.
    #[serde(default = "default_geometry_const")]
    pub geometry_const: f64,

    /// Fuel ratio added to the energy potential.
    #[serde(default = "default_fuel_ratio")]
    pub fuel_ratio: f64,

    /// Coupling of the geomagnetic residual into phase noise.
    #[serde(default = "default_noise_coupling")]
    pub noise_coupling: f64,

    /// Half-width of the symmetric quantum jitter. Zero disables jitter.
    #[serde(default = "default_quantum_jitter")]
    pub quantum_jitter: f64,

    /// Per-tick multiplier applied to the geomagnetic residual.
    #[serde(default = "default_residual_decay")]
    pub residual_decay: f64,

    /// Minimum flux while the core is running.
    #[serde(default = "default_ignition_floor")]
    pub ignition_floor: f64,

    /// Hard ceiling on neutron flux.
    #[serde(default = "default_max_flux")]
    pub max_flux: f64,

    /// Flux above which the core counts as overloaded.
    #[serde(default = "default_overload_flux")]
    pub overload_flux: f64,

    /// Cryogenic cooling level.
    #[serde(default = "default_cryo_cooling")]
    pub cryo_cooling: f64,

    /// Heat generated per unit of flux (also the power factor).
    #[serde(default = "default_heat_per_flux")]
    pub heat_per_flux: f64,

    /// Cooling capacity per unit of cryo cooling.
    #[serde(default = "default_cooling_per_unit")]
    pub cooling_per_unit: f64,

    /// Fraction of the heat balance applied to temperature each tick.
    #[serde(default = "default_thermal_rate")]
    pub thermal_rate: f64,

    /// Fraction of `k_eff - 1` applied to flux each tick.
    #[serde(default = "default_flux_response")]
    pub flux_response: f64,

    /// Damping contributed by fully inserted control rods.
    #[serde(default = "default_rod_damping")]
    pub rod_damping: f64,

    /// Coherence self-healing per tick.
    #[serde(default = "default_coherence_recovery")]
    pub coherence_recovery: f64,

    /// Phase noise above which the noise penalty applies.
    #[serde(default = "default_noise_penalty_threshold")]
    pub noise_penalty_threshold: f64,

    /// Coherence lost per tick while phase noise is above the threshold.
    #[serde(default = "default_noise_penalty")]
    pub noise_penalty: f64,

    /// Coherence lost per tick while flux is above the overload threshold.
    #[serde(default = "default_overload_penalty")]
    pub overload_penalty: f64,
}

impl PhysicsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("physics.geometry_const", self.geometry_const),
            ("physics.fuel_ratio", self.fuel_ratio),
            ("physics.noise_coupling", self.noise_coupling),
            ("physics.quantum_jitter", self.quantum_jitter),
            ("physics.residual_decay", self.residual_decay),
            ("physics.ignition_floor", self.ignition_floor),
            ("physics.max_flux", self.max_flux),
            ("physics.overload_flux", self.overload_flux),
            ("physics.cryo_cooling", self.cryo_cooling),
            ("physics.heat_per_flux", self.heat_per_flux),
            ("physics.cooling_per_unit", self.cooling_per_unit),
            ("physics.thermal_rate", self.thermal_rate),
            ("physics.flux_response", self.flux_response),
            ("physics.rod_damping", self.rod_damping),
            ("physics.coherence_recovery", self.coherence_recovery),
            ("physics.noise_penalty_threshold", self.noise_penalty_threshold),
            ("physics.noise_penalty", self.noise_penalty),
            ("physics.overload_penalty", self.overload_penalty),
        ] {
            require_non_negative(name, value)?;
        }
        if self.residual_decay > 1.0 {
            return Err(invalid("physics.residual_decay must not exceed 1"));
        }
        if self.max_flux < self.ignition_floor {
            return Err(invalid("physics.max_flux must be at least physics.ignition_floor"));
        }
        Ok(())
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            geometry_const: default_geometry_const(),
            fuel_ratio: default_fuel_ratio(),
            noise_coupling: default_noise_coupling(),
            quantum_jitter: default_quantum_jitter(),
            residual_decay: default_residual_decay(),
            ignition_floor: default_ignition_floor(),
            max_flux: default_max_flux(),
            overload_flux: default_overload_flux(),
            cryo_cooling: default_cryo_cooling(),
            heat_per_flux: default_heat_per_flux(),
            cooling_per_unit: default_cooling_per_unit(),
            thermal_rate: default_thermal_rate(),
            flux_response: default_flux_response(),
            rod_damping: default_rod_damping(),
            coherence_recovery: default_coherence_recovery(),
            noise_penalty_threshold: default_noise_penalty_threshold(),
            noise_penalty: default_noise_penalty(),
            overload_penalty: default_overload_penalty(),
        }
    }
}

/// How the safety controller escalates a persistent CRITICAL status.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScramTrigger {
    /// Each CRITICAL tick fires a SCRAM with a fixed probability, drawn
    /// from an RNG seeded by `reactor.seed`.
    Stochastic {
        /// Per-tick SCRAM probability in `[0, 1]`.
        #[serde(default = "default_scram_probability")]
        probability: f64,
    },
    /// A SCRAM fires after this many consecutive CRITICAL ticks.
    Hysteresis {
        /// Consecutive CRITICAL ticks required (at least 1).
        #[serde(default = "default_consecutive_ticks")]
        consecutive_ticks: u32,
    },
}

impl Default for ScramTrigger {
    fn default() -> Self {
        Self::Stochastic {
            probability: default_scram_probability(),
        }
    }
}

/// Safety thresholds and SCRAM constants consumed by [`crate::safety`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SafetyConfig {
    /// Temperature above which the core is in WARNING.
    #[serde(default = "default_warning_temperature")]
    pub warning_temperature: f64,

    /// Temperature above which the core is CRITICAL.
    #[serde(default = "default_critical_temperature")]
    pub critical_temperature: f64,

    /// Coherence below which the core is in WARNING.
    #[serde(default = "default_warning_coherence")]
    pub warning_coherence: f64,

    /// Coherence below which the core is CRITICAL.
    #[serde(default = "default_critical_coherence")]
    pub critical_coherence: f64,

    /// Geomagnetic residual above which the core is in WARNING.
    #[serde(default = "default_warning_residual")]
    pub warning_residual: f64,

    /// Phase noise forced by a SCRAM.
    #[serde(default = "default_scram_noise")]
    pub scram_noise: f64,

    /// Per-tick flux multiplier during SCRAM.
    #[serde(default = "default_scram_flux_decay")]
    pub scram_flux_decay: f64,

    /// Fraction of the gap to ambient closed per SCRAM tick.
    #[serde(default = "default_scram_cooling_rate")]
    pub scram_cooling_rate: f64,

    /// Coherence seeded by `StartReactor`.
    #[serde(default = "default_startup_coherence")]
    pub startup_coherence: f64,

    /// Flux seeded by `StartReactor`.
    #[serde(default = "default_startup_flux")]
    pub startup_flux: f64,

    /// Escalation policy from CRITICAL to SCRAM.
    #[serde(default)]
    pub scram_trigger: ScramTrigger,
}

impl SafetyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("safety.warning_temperature", self.warning_temperature),
            ("safety.critical_temperature", self.critical_temperature),
            ("safety.warning_coherence", self.warning_coherence),
            ("safety.critical_coherence", self.critical_coherence),
            ("safety.warning_residual", self.warning_residual),
            ("safety.scram_noise", self.scram_noise),
            ("safety.scram_flux_decay", self.scram_flux_decay),
            ("safety.scram_cooling_rate", self.scram_cooling_rate),
            ("safety.startup_coherence", self.startup_coherence),
            ("safety.startup_flux", self.startup_flux),
        ] {
            require_non_negative(name, value)?;
        }
        if self.scram_flux_decay >= 1.0 {
            return Err(invalid("safety.scram_flux_decay must be below 1"));
        }
        if self.startup_coherence > 1.0 {
            return Err(invalid("safety.startup_coherence must not exceed 1"));
        }
        match self.scram_trigger {
            ScramTrigger::Stochastic { probability } => {
                require_finite("safety.scram_trigger.probability", probability)?;
                if !(0.0..=1.0).contains(&probability) {
                    return Err(invalid("safety.scram_trigger.probability must be in [0, 1]"));
                }
            }
            ScramTrigger::Hysteresis { consecutive_ticks } => {
                if consecutive_ticks == 0 {
                    return Err(invalid(
                        "safety.scram_trigger.consecutive_ticks must be at least 1",
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            warning_temperature: default_warning_temperature(),
            critical_temperature: default_critical_temperature(),
            warning_coherence: default_warning_coherence(),
            critical_coherence: default_critical_coherence(),
            warning_residual: default_warning_residual(),
            scram_noise: default_scram_noise(),
            scram_flux_decay: default_scram_flux_decay(),
            scram_cooling_rate: default_scram_cooling_rate(),
            startup_coherence: default_startup_coherence(),
            startup_flux: default_startup_flux(),
            scram_trigger: ScramTrigger::default(),
        }
    }
}

/// Telemetry cadence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TelemetryConfig {
    /// Milliseconds between snapshot broadcasts.
    #[serde(default = "default_publish_interval_ms")]
    pub publish_interval_ms: u64,

    /// Per-subscriber buffer; a subscriber further behind skips ahead.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl TelemetryConfig {
    /// The broadcast period as a [`Duration`].
    pub const fn publish_interval(&self) -> Duration {
        Duration::from_millis(self.publish_interval_ms)
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            publish_interval_ms: default_publish_interval_ms(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

/// Observer server binding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObserverConfig {
    /// Address to bind to.
    #[serde(default = "default_observer_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_observer_port")]
    pub port: u16,
}

impl ObserverConfig {
    /// Override the binding with `OBSERVER_HOST` / `OBSERVER_PORT` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("OBSERVER_HOST") {
            self.host = val;
        }
        if let Some(port) = std::env::var("OBSERVER_PORT")
            .ok()
            .and_then(|val| val.parse().ok())
        {
            self.port = port;
        }
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            host: default_observer_host(),
            port: default_observer_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_tick_interval_ms() -> u64 {
    1000
}

const fn default_seed() -> u64 {
    42
}

const fn default_command_capacity() -> usize {
    64
}

const fn default_geometry_const() -> f64 {
    0.911
}

const fn default_fuel_ratio() -> f64 {
    0.080
}

const fn default_noise_coupling() -> f64 {
    2.0
}

const fn default_quantum_jitter() -> f64 {
    0.01
}

const fn default_residual_decay() -> f64 {
    0.99
}

const fn default_ignition_floor() -> f64 {
    1.0
}

const fn default_max_flux() -> f64 {
    50_000.0
}

const fn default_overload_flux() -> f64 {
    120.0
}

const fn default_cryo_cooling() -> f64 {
    100.0
}

const fn default_heat_per_flux() -> f64 {
    5.0
}

const fn default_cooling_per_unit() -> f64 {
    4.0
}

const fn default_thermal_rate() -> f64 {
    0.1
}

const fn default_flux_response() -> f64 {
    0.5
}

const fn default_rod_damping() -> f64 {
    0.5
}

const fn default_coherence_recovery() -> f64 {
    0.01
}

const fn default_noise_penalty_threshold() -> f64 {
    0.1
}

const fn default_noise_penalty() -> f64 {
    0.05
}

const fn default_overload_penalty() -> f64 {
    0.02
}

const fn default_warning_temperature() -> f64 {
    1500.0
}

const fn default_critical_temperature() -> f64 {
    2500.0
}

const fn default_warning_coherence() -> f64 {
    0.6
}

const fn default_critical_coherence() -> f64 {
    0.2
}

const fn default_warning_residual() -> f64 {
    0.5
}

const fn default_scram_noise() -> f64 {
    10.0
}

const fn default_scram_flux_decay() -> f64 {
    0.5
}

const fn default_scram_cooling_rate() -> f64 {
    0.1
}

const fn default_startup_coherence() -> f64 {
    0.5
}

const fn default_startup_flux() -> f64 {
    1.0
}

const fn default_scram_probability() -> f64 {
    0.1
}

const fn default_consecutive_ticks() -> u32 {
    3
}

const fn default_publish_interval_ms() -> u64 {
    500
}

const fn default_channel_capacity() -> usize {
    16
}

fn default_observer_host() -> String {
    String::from("0.0.0.0")
}

const fn default_observer_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ResonanceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reactor.seed, 42);
        assert_eq!(config.telemetry.publish_interval_ms, 500);
        assert_eq!(
            config.safety.scram_trigger,
            ScramTrigger::Stochastic { probability: 0.1 }
        );
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
reactor:
  tick_interval_ms: 250
  seed: 7
  auto_start: true
  command_capacity: 8

physics:
  geometry_const: 18.0
  quantum_jitter: 0.0
  max_flux: 1000.0

safety:
  critical_temperature: 2000.0
  scram_trigger:
    mode: hysteresis
    consecutive_ticks: 5

telemetry:
  publish_interval_ms: 100
  channel_capacity: 4

logging:
  level: "debug"
"#;

        let config = ResonanceConfig::parse(yaml);
        assert!(config.is_ok(), "parse failed: {config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.reactor.seed, 7);
        assert!(config.reactor.auto_start);
        assert_eq!(config.reactor.command_capacity, 8);
        assert!((config.physics.geometry_const - 18.0).abs() < f64::EPSILON);
        assert!((config.physics.fuel_ratio - 0.080).abs() < f64::EPSILON);
        assert!((config.safety.critical_temperature - 2000.0).abs() < f64::EPSILON);
        assert_eq!(
            config.safety.scram_trigger,
            ScramTrigger::Hysteresis {
                consecutive_ticks: 5
            }
        );
        assert_eq!(config.telemetry.channel_capacity, 4);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "reactor:\n  seed: 9\n";
        let config = ResonanceConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.reactor.seed, 9);
        assert_eq!(config.physics, PhysicsConfig::default());
        assert_eq!(config.safety, SafetyConfig::default());
    }

    #[test]
    fn parse_empty_yaml() {
        let config = ResonanceConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn stochastic_trigger_defaults_probability() {
        let yaml = "safety:\n  scram_trigger:\n    mode: stochastic\n";
        let config = ResonanceConfig::parse(yaml).ok().unwrap_or_default();
        assert_eq!(
            config.safety.scram_trigger,
            ScramTrigger::Stochastic { probability: 0.1 }
        );
    }

    #[test]
    fn rejects_probability_out_of_range() {
        let yaml = "safety:\n  scram_trigger:\n    mode: stochastic\n    probability: 1.5\n";
        let result = ResonanceConfig::parse(yaml);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_zero_hysteresis() {
        let yaml = "safety:\n  scram_trigger:\n    mode: hysteresis\n    consecutive_ticks: 0\n";
        let result = ResonanceConfig::parse(yaml);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_flux_ceiling_below_floor() {
        let yaml = "physics:\n  max_flux: 0.5\n";
        let result = ResonanceConfig::parse(yaml);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_negative_constant() {
        let yaml = "physics:\n  fuel_ratio: -0.1\n";
        let result = ResonanceConfig::parse(yaml);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let result = ResonanceConfig::parse("reactor: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("resonance-config.yaml");
        if path.exists() {
            let config = ResonanceConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
