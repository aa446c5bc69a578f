//! CLI module for racesim.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, RunOptions};
pub use commands::{execute_run, resolve_config, run_cli, run_simulation, validate_config};
pub use output::{format_json, format_report, print_help, print_version, version_string};
