//! CLI argument parsing.
//!
//! Hand-rolled so the parser accepts any iterator of strings and can be
//! tested without touching the process environment.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Options of the `run` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Optional YAML configuration; defaults apply when absent.
    pub config_path: Option<PathBuf>,
    /// Seed override.
    pub seed_override: Option<u64>,
    /// Trial count override.
    pub samples_override: Option<usize>,
    /// Worker count override.
    pub workers_override: Option<usize>,
    /// Emit JSON instead of a text report.
    pub json: bool,
    /// Enable verbose output.
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a simulation batch.
    Run(RunOptions),
    /// Validate a configuration file without running it.
    Validate {
        /// Path to the YAML configuration.
        config_path: PathBuf,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(&args[2..]),
            "validate" => Self::parse_validate_command(&args[2..]),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse the `run` command arguments.
    fn parse_run_command(rest: &[String]) -> Command {
        let mut options = RunOptions::default();

        let mut i = 0;
        while i < rest.len() {
            match rest[i].as_str() {
                "--seed" => {
                    options.seed_override = parse_value(rest, i, "--seed");
                    i += 2;
                }
                "--samples" => {
                    options.samples_override = parse_value(rest, i, "--samples");
                    i += 2;
                }
                "--workers" => {
                    options.workers_override = parse_value(rest, i, "--workers");
                    i += 2;
                }
                "--json" => {
                    options.json = true;
                    i += 1;
                }
                "-v" | "--verbose" => {
                    options.verbose = true;
                    i += 1;
                }
                flag if flag.starts_with('-') => {
                    eprintln!("Ignoring unknown option: {flag}");
                    i += 1;
                }
                path => {
                    if options.config_path.is_none() {
                        options.config_path = Some(PathBuf::from(path));
                    }
                    i += 1;
                }
            }
        }

        Command::Run(options)
    }

    /// Parse the `validate` command arguments.
    fn parse_validate_command(rest: &[String]) -> Command {
        rest.first().map_or_else(
            || {
                eprintln!("Error: 'validate' command requires a config path");
                Command::Help
            },
            |path| Command::Validate {
                config_path: PathBuf::from(path),
            },
        )
    }
}

/// Parse the value following the flag at `i`, warning when missing or bad.
fn parse_value<T: std::str::FromStr>(rest: &[String], i: usize, flag: &str) -> Option<T> {
    match rest.get(i + 1) {
        Some(raw) => {
            let parsed = raw.parse().ok();
            if parsed.is_none() {
                eprintln!("Ignoring invalid value for {flag}: {raw}");
            }
            parsed
        }
        None => {
            eprintln!("Missing value for {flag}");
            None
        }
    }
}
