use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{Cli, Commands};
use ophion_core::OphionError;

fn main() {
    let cli = Cli::parse();

    // Initialize logging with OPHION_LOG environment variable support;
    // -v/-vv raise the default level when the variable is unset
    let log_level = std::env::var("OPHION_LOG").unwrap_or_else(|_| {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
        .to_string()
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    match run(cli) {
        Ok(code) => {
            if code != 0 {
                process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);

            // Use appropriate exit codes based on error type
            let exit_code = match e.downcast_ref::<OphionError>() {
                Some(OphionError::Configuration(_)) => 2,
                Some(OphionError::Io(_)) => 3,
                Some(OphionError::InvalidInput(_)) => 4,
                Some(OphionError::NotFound(_)) => 5,
                Some(OphionError::Spawn(_)) => 6,
                _ => 1,
            };
            process::exit(exit_code);
        }
    }
}

/// Dispatch to the selected command; `run` forwards the engine's own exit
/// code, every other command returns 0 on success
fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Commands::Run(args) => cli::commands::run::run(args),
        Commands::Tools(args) => cli::commands::tools::run(args).map(|_| 0),
        Commands::Engine(args) => cli::commands::engine::run(args).map(|_| 0),
    }
}
