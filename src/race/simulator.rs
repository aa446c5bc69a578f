//! Batch driver: many independent trials to an empirical time distribution.
//!
//! Trial `i` always draws from stream `i` of the master seed, so a batch is
//! reproducible from `(config, seed)` alone and sequential, parallel and
//! cancellable runs agree bitwise.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::config::SimulationConfig;
use crate::engine::pool::{PoolOutcome, TrialPool};
use crate::engine::rng::SimRng;
use crate::error::{SimError, SimResult};

use super::trial::{run_trial, trace_trial, TrialTrace};

/// Monte Carlo race simulator.
///
/// # Example
///
/// ```rust
/// use racesim::config::SimulationConfig;
/// use racesim::race::RaceSimulator;
///
/// let config = SimulationConfig::builder()
///     .num_simulations(200)
///     .build()
///     .unwrap();
/// let simulator = RaceSimulator::new(config, 42).unwrap();
///
/// let times = simulator.run_simulation().unwrap();
/// assert_eq!(times.len(), 200);
/// ```
#[derive(Debug, Clone)]
pub struct RaceSimulator {
    config: SimulationConfig,
    seed: u64,
}

impl RaceSimulator {
    /// Validate the configuration and build a simulator.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending field.
    pub fn new(config: SimulationConfig, seed: u64) -> SimResult<Self> {
        config.check()?;
        Ok(Self { config, seed })
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The master seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent RNG of one trial.
    #[must_use]
    pub fn trial_rng(&self, trial: usize) -> SimRng {
        SimRng::for_stream(self.seed, trial as u64)
    }

    /// Run a single trial by index.
    ///
    /// # Errors
    ///
    /// Only on a jidoka stop, which a validated configuration cannot trigger.
    pub fn run_trial(&self, trial: usize) -> SimResult<f64> {
        run_trial(&self.config, &mut self.trial_rng(trial))
    }

    /// Run a single trial by index with its full lap history.
    ///
    /// # Errors
    ///
    /// See [`RaceSimulator::run_trial`].
    pub fn trace_trial(&self, trial: usize) -> SimResult<TrialTrace> {
        trace_trial(&self.config, &mut self.trial_rng(trial))
    }

    /// Run every trial on the calling thread.
    ///
    /// Returns exactly `num_simulations` totals in trial order.
    ///
    /// # Errors
    ///
    /// See [`RaceSimulator::run_trial`].
    pub fn run_simulation(&self) -> SimResult<Vec<f64>> {
        self.run_until(&AtomicBool::new(false))
    }

    /// Run on the calling thread, checking `stop` between trials.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Cancelled`] if `stop` was raised before the last
    /// trial; partial results are discarded.
    pub fn run_until(&self, stop: &AtomicBool) -> SimResult<Vec<f64>> {
        let n = self.config.num_simulations;
        let started = Instant::now();
        tracing::info!(
            trials = n,
            laps = self.config.race_distance,
            seed = self.seed,
            "simulation started"
        );

        let mut totals = Vec::with_capacity(n);
        for trial in 0..n {
            if stop.load(Ordering::Relaxed) {
                return Err(self.cancelled(trial));
            }
            totals.push(self.run_trial(trial)?);
        }

        tracing::info!(trials = n, elapsed = ?started.elapsed(), "simulation finished");
        Ok(totals)
    }

    /// Run across `workers` threads (`0` = available parallelism).
    ///
    /// The result is identical to [`RaceSimulator::run_simulation`].
    ///
    /// # Errors
    ///
    /// See [`RaceSimulator::run_trial`].
    pub fn run_parallel(&self, workers: usize) -> SimResult<Vec<f64>> {
        self.run_parallel_until(workers, &AtomicBool::new(false))
    }

    /// Parallel run checking `stop` between trials.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Cancelled`] if `stop` was raised before every
    /// trial ran.
    pub fn run_parallel_until(&self, workers: usize, stop: &AtomicBool) -> SimResult<Vec<f64>> {
        let pool = TrialPool::with_workers(workers);
        if pool.num_workers() == 1 {
            return self.run_until(stop);
        }

        let n = self.config.num_simulations;
        let started = Instant::now();
        tracing::info!(
            trials = n,
            laps = self.config.race_distance,
            seed = self.seed,
            workers = pool.num_workers(),
            "parallel simulation started"
        );

        match pool.execute(n, stop, |trial| self.run_trial(trial)) {
            PoolOutcome::Completed(results) => {
                let totals = results.into_iter().collect::<SimResult<Vec<f64>>>()?;
                tracing::info!(
                    trials = n,
                    elapsed = ?started.elapsed(),
                    "parallel simulation finished"
                );
                Ok(totals)
            }
            PoolOutcome::Cancelled { completed } => Err(self.cancelled(completed)),
        }
    }

    fn cancelled(&self, completed: usize) -> SimError {
        tracing::warn!(
            completed,
            requested = self.config.num_simulations,
            "simulation cancelled"
        );
        SimError::Cancelled {
            completed,
            requested: self.config.num_simulations,
        }
    }
}
