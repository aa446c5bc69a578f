//! Summary statistics of a batch of race times.
//!
//! By the Central Limit Theorem the standard error of the mean falls as
//! O(n^{-1/2}), which is what the confidence interval reports.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Summary of an empirical race time distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceStatistics {
    /// Number of races.
    pub count: usize,
    /// Mean race time.
    pub mean_time: f64,
    /// Sample standard deviation (n − 1 denominator; 0 for a single race).
    pub std_dev: f64,
    /// Fastest race.
    pub min_time: f64,
    /// Slowest race.
    pub max_time: f64,
    /// Standard error of the mean.
    pub std_error: f64,
    /// 95% confidence interval of the mean (mean ± 1.96 × `std_error`).
    pub confidence_interval: (f64, f64),
}

impl RaceStatistics {
    /// Summarize a batch of race times.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for an empty batch.
    pub fn from_times(times: &[f64]) -> SimResult<Self> {
        if times.is_empty() {
            return Err(SimError::config("cannot summarize an empty batch"));
        }

        let count = times.len();
        let n = count as f64;
        let mean_time = times.iter().sum::<f64>() / n;

        let std_dev = if count > 1 {
            let ss: f64 = times.iter().map(|t| (t - mean_time).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        let min_time = times.iter().copied().fold(f64::INFINITY, f64::min);
        let max_time = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let std_error = std_dev / n.sqrt();
        let ci_half = 1.96 * std_error;

        Ok(Self {
            count,
            mean_time,
            std_dev,
            min_time,
            max_time,
            std_error,
            confidence_interval: (mean_time - ci_half, mean_time + ci_half),
        })
    }

    /// Check if value is within the confidence interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.confidence_interval.0 && value <= self.confidence_interval.1
    }

    /// Spread between slowest and fastest race.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.max_time - self.min_time
    }
}
