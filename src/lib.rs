//! # racesim
//!
//! Monte Carlo estimator of total race time for a single car.
//!
//! Each trial runs a race lap by lap: base pace is drawn from a normal
//! distribution, tyre wear and fuel load add deterministic penalties, a
//! safety car may be out on any lap, and pit stops follow a fixed strategy.
//! A batch of independent trials yields an empirical distribution of race
//! times.
//!
//! ## Example
//!
//! ```rust
//! use racesim::prelude::*;
//!
//! let config = SimulationConfig::builder()
//!     .num_simulations(500)
//!     .build()
//!     .unwrap();
//! let times = RaceSimulator::new(config, 42).unwrap().run_simulation().unwrap();
//! let stats = RaceStatistics::from_times(&times).unwrap();
//! assert!(stats.mean_time > 4500.0);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::suboptimal_flops,  // Manual formulas mirror the model equations
    clippy::missing_const_for_fn,
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod race;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analysis::RaceStatistics;
    pub use crate::config::{RunConfig, SimulationConfig, StrategyConfig};
    pub use crate::engine::rng::SimRng;
    pub use crate::error::{SimError, SimResult};
    pub use crate::race::{
        compute_lap_time, run_trial, trace_trial, PitStopReason, RaceSimulator, TrialTrace,
    };
}

/// Re-export for public API
pub use error::{SimError, SimResult};
