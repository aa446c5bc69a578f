//! Lap model: elapsed time of a single lap.
//!
//! # Governing Equation
//!
//! ```text
//! t(lap) = N(μ, σ)                          base pace
//!        + degradation × lap                tyre wear, never reset
//!        + (1 − fuel/capacity) × max_pen    fuel penalty
//!        + [safety car] × sc_duration       flat caution loss
//! ```
//!
//! The base draw is not clamped. For extreme σ/μ ratios a lap can come out
//! negative; that is an accepted approximation of the model.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::engine::rng::SimRng;

/// Components of one lap time, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LapBreakdown {
    /// Normally distributed base pace.
    pub base: f64,
    /// Tyre degradation penalty.
    pub tyre_penalty: f64,
    /// Fuel load penalty.
    pub fuel_penalty: f64,
    /// Safety car time loss (zero on a green lap).
    pub safety_car_penalty: f64,
}

impl LapBreakdown {
    /// Total lap time.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.base + self.tyre_penalty + self.fuel_penalty + self.safety_car_penalty
    }
}

/// Compute one lap's elapsed time.
///
/// Draws exactly one normal sample from `rng`; everything else is
/// deterministic in the arguments.
///
/// # Example
///
/// ```rust
/// use racesim::config::SimulationConfig;
/// use racesim::engine::rng::SimRng;
/// use racesim::race::lap::compute_lap_time;
///
/// let config = SimulationConfig {
///     lap_time_std_dev: 0.0,
///     ..SimulationConfig::default()
/// };
/// let mut rng = SimRng::new(42);
///
/// // Lap 10 on a half tank: 90 + 0.02 × 10 + 0.25
/// let t = compute_lap_time(10, 50.0, false, &config, &mut rng);
/// assert!((t - 90.45).abs() < 1e-9);
/// ```
pub fn compute_lap_time(
    lap_index: u32,
    fuel_load: f64,
    safety_car_active: bool,
    config: &SimulationConfig,
    rng: &mut SimRng,
) -> f64 {
    lap_breakdown(lap_index, fuel_load, safety_car_active, config, rng).total()
}

/// Compute one lap's time split into its components.
pub fn lap_breakdown(
    lap_index: u32,
    fuel_load: f64,
    safety_car_active: bool,
    config: &SimulationConfig,
    rng: &mut SimRng,
) -> LapBreakdown {
    let strategy = &config.strategy;
    let base = rng.gen_normal(config.lap_time_mean, config.lap_time_std_dev);
    let tyre_penalty = config.tyre_degradation * f64::from(lap_index);
    let fuel_penalty = (1.0 - fuel_load / strategy.fuel_capacity) * strategy.max_fuel_penalty;
    let safety_car_penalty = if safety_car_active {
        config.safety_car_duration
    } else {
        0.0
    };

    LapBreakdown {
        base,
        tyre_penalty,
        fuel_penalty,
        safety_car_penalty,
    }
}
