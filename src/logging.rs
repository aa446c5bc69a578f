//! Tracing setup for the `racesim` binary.
//!
//! The library only emits events; installing a subscriber is left to the
//! binary so embedding applications keep control of their own output.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Console log level for the given verbosity.
#[must_use]
pub const fn console_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Initialize a stderr subscriber.
///
/// `RUST_LOG` overrides the level chosen from `verbose`. Calling this twice
/// is harmless; the second call leaves the first subscriber in place.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_level(verbose).to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
