//! Race trial runner: one full race distance to a single total time.
//!
//! Per lap, in order:
//! 1. Redraw the safety car flag (independent Bernoulli, no memory of the
//!    previous lap, so a caution never spans laps as a single incident).
//! 2. Compute the lap time from the fuel the lap started with.
//! 3. Pit if the lap is a multiple of the pit interval or fuel started the
//!    lap below the threshold: add the stop time and refuel.
//! 4. Bank the lap time and burn one lap of fuel.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::engine::jidoka::{CheckPoint, JidokaGuard};
use crate::engine::rng::SimRng;
use crate::error::SimResult;

use super::lap::compute_lap_time;
use super::state::{PitStopReason, RaceState};

/// One lap of a traced trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    /// 1-indexed lap.
    pub lap: u32,
    /// Fuel at the start of the lap, before any pit stop.
    pub fuel_at_start: f64,
    /// Whether the safety car was out.
    pub safety_car: bool,
    /// Pit stop taken at the end of this lap, if any.
    pub pit_stop: Option<PitStopReason>,
    /// Lap time including any pit stop loss.
    pub lap_time: f64,
}

/// Full lap history of one trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialTrace {
    /// Race time in seconds.
    pub total_time: f64,
    /// Every lap in order.
    pub laps: Vec<LapRecord>,
}

impl TrialTrace {
    /// Laps that ended in the pits.
    #[must_use]
    pub fn pit_laps(&self) -> Vec<u32> {
        self.laps
            .iter()
            .filter(|l| l.pit_stop.is_some())
            .map(|l| l.lap)
            .collect()
    }

    /// Laps run under the safety car.
    #[must_use]
    pub fn safety_car_laps(&self) -> usize {
        self.laps.iter().filter(|l| l.safety_car).count()
    }
}

/// Simulate one race and return its total time.
///
/// # Errors
///
/// Returns [`crate::SimError::NonFiniteValue`] if a lap time is not finite,
/// which cannot happen for a validated configuration.
pub fn run_trial(config: &SimulationConfig, rng: &mut SimRng) -> SimResult<f64> {
    simulate(config, rng, |_| {})
}

/// Simulate one race, recording every lap.
///
/// Consumes the same draws as [`run_trial`], so the same RNG state yields the
/// same total.
///
/// # Errors
///
/// See [`run_trial`].
pub fn trace_trial(config: &SimulationConfig, rng: &mut SimRng) -> SimResult<TrialTrace> {
    let mut laps = Vec::with_capacity(config.race_distance as usize);
    let total_time = simulate(config, rng, |record| laps.push(record))?;
    Ok(TrialTrace { total_time, laps })
}

fn simulate<F>(config: &SimulationConfig, rng: &mut SimRng, mut on_lap: F) -> SimResult<f64>
where
    F: FnMut(LapRecord),
{
    let strategy = &config.strategy;
    let guard = JidokaGuard;
    let mut state = RaceState::new(strategy.fuel_capacity);

    for lap in 1..=config.race_distance {
        state.current_lap = lap;
        state.safety_car_active = rng.gen_bernoulli(config.safety_car_chance);

        let fuel_at_start = state.fuel_load;
        let mut lap_time =
            compute_lap_time(lap, fuel_at_start, state.safety_car_active, config, rng);

        let pit_stop = state.pit_stop_due(strategy);
        if let Some(reason) = pit_stop {
            tracing::trace!(lap, ?reason, fuel = fuel_at_start, "pit stop");
            lap_time += config.pit_stop_time;
            state.refuel(strategy);
        }

        let lap_time = guard.check(CheckPoint::Lap(lap), lap_time)?;
        state.complete_lap(lap_time, strategy);

        on_lap(LapRecord {
            lap,
            fuel_at_start,
            safety_car: state.safety_car_active,
            pit_stop,
            lap_time,
        });
    }

    guard.check(CheckPoint::RaceTotal, state.total_time)
}
