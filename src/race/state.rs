//! Per-trial race state.

use serde::{Deserialize, Serialize};

use crate::config::StrategyConfig;

/// Why the car pitted on a lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PitStopReason {
    /// Lap index is a multiple of the pit interval.
    Scheduled,
    /// Fuel at the start of the lap was below the low-fuel threshold.
    LowFuel,
}

/// Mutable state of one trial.
///
/// Created fresh for every trial and owned by the trial loop alone, so
/// nothing carries over from one race to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceState {
    /// 1-indexed lap about to be run (or last run, once the race is over).
    pub current_lap: u32,
    /// Fuel remaining, percent of capacity.
    pub fuel_load: f64,
    /// Whether the safety car is out on the current lap.
    pub safety_car_active: bool,
    /// Accumulated race time in seconds.
    pub total_time: f64,
}

impl RaceState {
    /// Full tank on the grid.
    #[must_use]
    pub const fn new(fuel_capacity: f64) -> Self {
        Self {
            current_lap: 1,
            fuel_load: fuel_capacity,
            safety_car_active: false,
            total_time: 0.0,
        }
    }

    /// Decide whether the current lap ends in the pits.
    ///
    /// Evaluated against the fuel the lap started with, before this lap's
    /// consumption. A scheduled stop takes precedence when both rules fire.
    /// A `pit_interval` of zero schedules no stops.
    #[must_use]
    pub fn pit_stop_due(&self, strategy: &StrategyConfig) -> Option<PitStopReason> {
        if self.current_lap.checked_rem(strategy.pit_interval) == Some(0) {
            Some(PitStopReason::Scheduled)
        } else if self.fuel_load < strategy.low_fuel_threshold {
            Some(PitStopReason::LowFuel)
        } else {
            None
        }
    }

    /// Refuel to capacity.
    pub fn refuel(&mut self, strategy: &StrategyConfig) {
        self.fuel_load = strategy.fuel_capacity;
    }

    /// Close out the lap: bank its time and burn a lap of fuel.
    ///
    /// Fuel is burned even on a pit lap, so a fresh tank leaves the pits
    /// one lap's consumption short of capacity.
    pub fn complete_lap(&mut self, lap_time: f64, strategy: &StrategyConfig) {
        self.total_time += lap_time;
        self.fuel_load -= strategy.fuel_per_lap;
    }
}
