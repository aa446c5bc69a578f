//! Error types for racesim.
//!
//! All fallible operations return `Result<T, SimError>` instead of panicking.
//! Configuration problems are rejected before any trial runs; once a
//! simulator has been constructed the lap loop has no recoverable failure
//! modes apart from cancellation.

use thiserror::Error;

/// Result type alias for racesim operations.
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for all racesim operations.
#[derive(Debug, Error)]
pub enum SimError {
    // ===== Configuration Errors =====
    /// A single configuration field holds an unusable value.
    #[error("Invalid configuration: field '{field}' {reason}")]
    InvalidParameter {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Invalid configuration document.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Field-level validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ===== Runtime =====
    /// Numerical instability detected (NaN or Inf).
    #[error("Jidoka: non-finite value detected at {location}")]
    NonFiniteValue {
        /// Location where the non-finite value was detected.
        location: String,
    },

    /// Batch stopped at a trial boundary before completing.
    #[error("Simulation cancelled after {completed} of {requested} trials")]
    Cancelled {
        /// Trials finished before the stop was observed.
        completed: usize,
        /// Trials requested by the configuration.
        requested: usize,
    },
}

impl SimError {
    /// Create an invalid-parameter error naming the offending field.
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error was raised by configuration handling.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. }
                | Self::Config { .. }
                | Self::Validation(_)
                | Self::YamlParse(_)
        )
    }
}
