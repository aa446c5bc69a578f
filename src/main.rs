//! racesim CLI - Monte Carlo race time estimator.

use std::process::ExitCode;

use racesim::cli::{run_cli, Args, Command};
use racesim::logging::init_tracing;

fn main() -> ExitCode {
    let args = Args::parse();
    let verbose = matches!(&args.command, Command::Run(options) if options.verbose);
    init_tracing(verbose);
    run_cli(args)
}
