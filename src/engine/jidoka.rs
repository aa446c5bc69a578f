//! Jidoka (自働化) - stop the line on a non-finite value.
//!
//! Lap and race times are finite for every validated configuration, so the
//! guard never fires in practice. It exists so that a broken invariant shows
//! up as an error at the lap that produced it instead of a NaN in the
//! output distribution.

use crate::error::{SimError, SimResult};

/// Where in a trial a checked value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckPoint {
    /// Time of a single lap.
    Lap(u32),
    /// Accumulated race time after the final lap.
    RaceTotal,
}

impl std::fmt::Display for CheckPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lap(lap) => write!(f, "lap {lap} time"),
            Self::RaceTotal => write!(f, "race total time"),
        }
    }
}

/// Stateless non-finite guard.
#[derive(Debug, Clone, Copy, Default)]
pub struct JidokaGuard;

impl JidokaGuard {
    /// Pass `value` through if finite.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NonFiniteValue`] naming the check point otherwise.
    pub fn check(self, at: CheckPoint, value: f64) -> SimResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            tracing::error!(%at, value, "jidoka: non-finite value");
            Err(SimError::NonFiniteValue {
                location: at.to_string(),
            })
        }
    }
}
