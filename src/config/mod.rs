//! Configuration system with YAML loading and validation.
//!
//! Implements Poka-Yoke (mistake-proofing) through:
//! - Type-safe configuration structs
//! - Field-level range checks via `validator`
//! - Semantic checks (finiteness, worst-case time bounds, strategy consistency)
//!   naming the offending field
//!
//! A configuration that fails any check is rejected before a single trial runs.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{SimError, SimResult};

/// Static parameters of one race simulation batch.
///
/// Immutable once validated. Every time field is in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Race length in laps.
    #[validate(range(min = 1))]
    pub race_distance: u32,
    /// Mean of the base lap time distribution.
    pub lap_time_mean: f64,
    /// Standard deviation of the base lap time distribution.
    #[validate(range(min = 0.0))]
    pub lap_time_std_dev: f64,
    /// Time added on a lap with a pit stop.
    #[validate(range(min = 0.0))]
    pub pit_stop_time: f64,
    /// Seconds added per unit of lap index.
    #[validate(range(min = 0.0))]
    pub tyre_degradation: f64,
    /// Number of independent trials in a batch.
    #[validate(range(min = 1))]
    pub num_simulations: usize,
    /// Per-lap probability of a safety car.
    #[validate(range(min = 0.0, max = 1.0))]
    pub safety_car_chance: f64,
    /// Time added on a lap run under the safety car.
    #[validate(range(min = 0.0))]
    pub safety_car_duration: f64,
    /// Pit and fuel strategy constants.
    #[validate(nested)]
    pub strategy: StrategyConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            race_distance: 50,
            lap_time_mean: 90.0,
            lap_time_std_dev: 1.5,
            pit_stop_time: 20.0,
            tyre_degradation: 0.02,
            num_simulations: 10_000,
            safety_car_chance: 0.1,
            safety_car_duration: 30.0,
            strategy: StrategyConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Create a builder starting from the default parameters.
    #[must_use]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Run field-level and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Validation`] for range violations and
    /// [`SimError::InvalidParameter`] for non-finite or inconsistent fields.
    pub fn check(&self) -> SimResult<()> {
        self.validate_semantic()?;
        self.validate()?;
        Ok(())
    }

    /// Checks the `validator` ranges cannot express.
    ///
    /// NaN slips through range comparisons, so finiteness is checked first.
    fn validate_semantic(&self) -> SimResult<()> {
        let floats = [
            ("lap_time_mean", self.lap_time_mean),
            ("lap_time_std_dev", self.lap_time_std_dev),
            ("pit_stop_time", self.pit_stop_time),
            ("tyre_degradation", self.tyre_degradation),
            ("safety_car_chance", self.safety_car_chance),
            ("safety_car_duration", self.safety_car_duration),
        ];
        for (field, value) in floats {
            require_finite(field, value)?;
        }
        self.strategy.validate_semantic()?;
        self.validate_bounds()
    }

    /// Worst-case lap and race times must be representable.
    ///
    /// A normal draw never exceeds 8.5σ in magnitude (the uniform feeding
    /// the logarithm is floored at `f64::EPSILON`), and fuel can fall at
    /// most `race_distance × fuel_per_lap` below capacity.
    fn validate_bounds(&self) -> SimResult<()> {
        let laps = f64::from(self.race_distance);
        let strategy = &self.strategy;

        let spread = MAX_NORMAL_SIGMAS * self.lap_time_std_dev;
        let spread = require_bounded("lap_time_std_dev", spread)?;
        let pace = require_bounded("lap_time_mean", self.lap_time_mean.abs() + spread)?;
        let wear = require_bounded("tyre_degradation", self.tyre_degradation * laps)?;
        let burn = require_bounded(
            "strategy.fuel_per_lap",
            laps * strategy.fuel_per_lap / strategy.fuel_capacity,
        )?;
        let fuel = strategy.max_fuel_penalty * (1.0 + burn);
        let fuel = require_bounded("strategy.max_fuel_penalty", fuel)?;

        let lap = pace + wear + fuel + self.pit_stop_time + self.safety_car_duration;
        require_bounded("race_distance", laps * lap)?;
        Ok(())
    }
}

/// Upper bound on |z| for a Box-Muller draw, with headroom.
const MAX_NORMAL_SIGMAS: f64 = 10.0;

/// Pit and fuel strategy constants.
///
/// The defaults reproduce the reference strategy: a scheduled stop every
/// 15th lap, an extra stop whenever fuel starts a lap below 30%, 2% burned
/// per lap and up to half a second lost to an empty tank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyConfig {
    /// Pit on every lap index that is a multiple of this.
    #[validate(range(min = 1))]
    pub pit_interval: u32,
    /// Pit when fuel at the start of a lap is strictly below this (percent).
    #[validate(range(min = 0.0))]
    pub low_fuel_threshold: f64,
    /// Fuel burned every lap (percent).
    #[validate(range(min = 0.0))]
    pub fuel_per_lap: f64,
    /// Fuel level after refuelling (percent).
    pub fuel_capacity: f64,
    /// Lap time penalty at zero fuel, scaled linearly with fuel burned.
    #[validate(range(min = 0.0))]
    pub max_fuel_penalty: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            pit_interval: 15,
            low_fuel_threshold: 30.0,
            fuel_per_lap: 2.0,
            fuel_capacity: 100.0,
            max_fuel_penalty: 0.5,
        }
    }
}

impl StrategyConfig {
    fn validate_semantic(&self) -> SimResult<()> {
        require_finite("strategy.low_fuel_threshold", self.low_fuel_threshold)?;
        require_finite("strategy.fuel_per_lap", self.fuel_per_lap)?;
        require_finite("strategy.fuel_capacity", self.fuel_capacity)?;
        require_finite("strategy.max_fuel_penalty", self.max_fuel_penalty)?;
        if self.fuel_capacity <= 0.0 {
            return Err(SimError::invalid(
                "strategy.fuel_capacity",
                format!("must be positive, got {}", self.fuel_capacity),
            ));
        }
        Ok(())
    }
}

fn require_finite(field: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid(field, format!("must be finite, got {value}")))
    }
}

fn require_bounded(field: &'static str, worst_case: f64) -> SimResult<f64> {
    if worst_case.is_finite() {
        Ok(worst_case)
    } else {
        Err(SimError::invalid(field, "is too large: worst-case race time overflows"))
    }
}

/// Programmatic construction of a validated [`SimulationConfig`].
#[derive(Debug, Default)]
pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    /// Set the race length in laps.
    #[must_use]
    pub const fn race_distance(mut self, laps: u32) -> Self {
        self.config.race_distance = laps;
        self
    }

    /// Set the base lap time mean.
    #[must_use]
    pub const fn lap_time_mean(mut self, secs: f64) -> Self {
        self.config.lap_time_mean = secs;
        self
    }

    /// Set the base lap time standard deviation.
    #[must_use]
    pub const fn lap_time_std_dev(mut self, secs: f64) -> Self {
        self.config.lap_time_std_dev = secs;
        self
    }

    /// Set the pit stop time loss.
    #[must_use]
    pub const fn pit_stop_time(mut self, secs: f64) -> Self {
        self.config.pit_stop_time = secs;
        self
    }

    /// Set the per-lap tyre degradation.
    #[must_use]
    pub const fn tyre_degradation(mut self, secs_per_lap: f64) -> Self {
        self.config.tyre_degradation = secs_per_lap;
        self
    }

    /// Set the number of trials.
    #[must_use]
    pub const fn num_simulations(mut self, n: usize) -> Self {
        self.config.num_simulations = n;
        self
    }

    /// Set the per-lap safety car probability.
    #[must_use]
    pub const fn safety_car_chance(mut self, p: f64) -> Self {
        self.config.safety_car_chance = p;
        self
    }

    /// Set the safety car time loss per lap.
    #[must_use]
    pub const fn safety_car_duration(mut self, secs: f64) -> Self {
        self.config.safety_car_duration = secs;
        self
    }

    /// Set the strategy constants.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // StrategyConfig isn't Copy
    pub fn strategy(mut self, strategy: StrategyConfig) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending field.
    pub fn build(self) -> SimResult<SimulationConfig> {
        self.config.check()?;
        Ok(self.config)
    }
}

/// Reproducibility settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReproducibilityConfig {
    /// Master seed; trial `i` draws from stream `i` of this seed.
    pub seed: u64,
}

impl Default for ReproducibilityConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Execution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutionConfig {
    /// Worker threads. `0` uses the available parallelism, `1` runs inline.
    pub workers: usize,
}

const fn default_workers() -> usize {
    1
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

/// Top-level YAML document for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Race parameters.
    #[validate(nested)]
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Reproducibility settings.
    #[serde(default)]
    pub reproducibility: ReproducibilityConfig,

    /// Execution settings.
    #[serde(default)]
    pub execution: ExecutionConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            simulation: SimulationConfig::default(),
            reproducibility: ReproducibilityConfig::default(),
            execution: ExecutionConfig::default(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        if !config.schema_version.starts_with("1.") {
            return Err(SimError::config(format!(
                "unsupported schema version '{}'",
                config.schema_version
            )));
        }

        config.simulation.check()?;
        config.validate()?;

        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> SimResult<String> {
        serde_yaml::to_string(self).map_err(|e| SimError::serialization(e.to_string()))
    }
}
