//! CLI output formatting.
//!
//! Reports are built as strings so they can be tested; the print helpers
//! only write them to stdout.

use serde::Serialize;

use crate::analysis::RaceStatistics;
use crate::config::RunConfig;
use crate::error::{SimError, SimResult};

/// Trial totals shown in the text report.
pub const SAMPLE_ROWS: usize = 5;

/// Print version information.
pub fn print_version() {
    println!("{}", version_string());
}

/// Version line, with the git hash when the build captured one.
#[must_use]
pub fn version_string() -> String {
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => {
            format!("racesim {} ({hash})", env!("CARGO_PKG_VERSION"))
        }
        _ => format!("racesim {}", env!("CARGO_PKG_VERSION")),
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"racesim - Monte Carlo race time estimator

USAGE:
    racesim <COMMAND> [OPTIONS]

COMMANDS:
    run [config.yaml]           Run a simulation batch (defaults if no file)
        --seed <N>              Override the master seed
        --samples <N>           Override the number of simulated races
        --workers <N>           Worker threads (0 = all CPUs)
        --json                  Print a JSON report
        -v, --verbose           Enable verbose output

    validate <config.yaml>      Check a configuration file

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    racesim run
    racesim run race.yaml --seed 12345 --workers 0
    racesim validate race.yaml

LOGGING:
    Set RUST_LOG (e.g. RUST_LOG=racesim=debug) to override the log level.
"
    );
}

/// JSON report of a run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// Configuration actually used, after overrides.
    pub config: &'a RunConfig,
    /// Summary statistics.
    pub statistics: &'a RaceStatistics,
    /// Every trial total, in trial order.
    pub total_times: &'a [f64],
}

/// Render the text report.
#[must_use]
pub fn format_report(config: &RunConfig, stats: &RaceStatistics, times: &[f64]) -> String {
    use std::fmt::Write;

    let sim = &config.simulation;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Race: {} laps, {} simulations, seed {}",
        sim.race_distance, sim.num_simulations, config.reproducibility.seed
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Simulation Statistics:");
    let _ = writeln!(out, "  Mean time: {:>12.3} s", stats.mean_time);
    let _ = writeln!(out, "  Std dev:   {:>12.3} s", stats.std_dev);
    let _ = writeln!(out, "  Min time:  {:>12.3} s", stats.min_time);
    let _ = writeln!(out, "  Max time:  {:>12.3} s", stats.max_time);
    let _ = writeln!(
        out,
        "  95% CI:    [{:.3}, {:.3}] s",
        stats.confidence_interval.0, stats.confidence_interval.1
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Sample Results:");
    for (i, t) in times.iter().take(SAMPLE_ROWS).enumerate() {
        let _ = writeln!(out, "  {i:>4}  {t:>12.3}");
    }
    out
}

/// Render the JSON report.
///
/// # Errors
///
/// Returns [`SimError::Serialization`] if encoding fails.
pub fn format_json(config: &RunConfig, stats: &RaceStatistics, times: &[f64]) -> SimResult<String> {
    let report = RunReport {
        config,
        statistics: stats,
        total_times: times,
    };
    serde_json::to_string_pretty(&report).map_err(|e| SimError::serialization(e.to_string()))
}
