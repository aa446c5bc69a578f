//! CLI command handlers.

use std::path::Path;
use std::process::ExitCode;

use crate::analysis::RaceStatistics;
use crate::config::RunConfig;
use crate::error::SimResult;
use crate::race::RaceSimulator;

use super::args::{Args, Command, RunOptions};
use super::output::{format_json, format_report, print_help, print_version};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run(options) => run_simulation(&options),
        Command::Validate { config_path } => validate_config(&config_path),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Run a batch and print the report.
#[must_use]
pub fn run_simulation(options: &RunOptions) -> ExitCode {
    match execute_run(options) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Resolve the configuration, run the batch and render the report.
///
/// # Errors
///
/// Returns configuration, I/O or serialization errors.
pub fn execute_run(options: &RunOptions) -> SimResult<String> {
    let config = resolve_config(options)?;
    tracing::debug!(?config, "resolved configuration");

    let simulator = RaceSimulator::new(config.simulation.clone(), config.reproducibility.seed)?;
    let times = simulator.run_parallel(config.execution.workers)?;
    let stats = RaceStatistics::from_times(&times)?;

    if options.json {
        format_json(&config, &stats, &times)
    } else {
        Ok(format_report(&config, &stats, &times))
    }
}

/// Load the configuration (or defaults) and apply command-line overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the result is invalid.
pub fn resolve_config(options: &RunOptions) -> SimResult<RunConfig> {
    let mut config = match &options.config_path {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    if let Some(seed) = options.seed_override {
        config.reproducibility.seed = seed;
    }
    if let Some(samples) = options.samples_override {
        config.simulation.num_simulations = samples;
    }
    if let Some(workers) = options.workers_override {
        config.execution.workers = workers;
    }

    config.simulation.check()?;
    Ok(config)
}

/// Validate a configuration file.
#[must_use]
pub fn validate_config(path: &Path) -> ExitCode {
    match RunConfig::load(path) {
        Ok(config) => {
            println!("✓ {} is valid", path.display());
            println!(
                "  {} laps, {} simulations, seed {}",
                config.simulation.race_distance,
                config.simulation.num_simulations,
                config.reproducibility.seed
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ {}: {e}", path.display());
            ExitCode::from(1)
        }
    }
}
