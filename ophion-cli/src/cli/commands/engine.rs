use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use ophion_engine::{cleanup_old_jobs, EngineBinary, EngineSettings};
use std::path::PathBuf;

#[derive(Args)]
pub struct EngineArgs {
    #[command(subcommand)]
    pub command: EngineCommands,

    /// Config file path (defaults to OPHION_HOME/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum EngineCommands {
    /// Check that the configured engine binary is available
    Check,

    /// Remove leftover job files past the configured maximum age
    CleanJobs,
}

pub fn run(args: EngineArgs) -> Result<()> {
    let config = super::load_config_from(args.config.as_deref())?;

    match args.command {
        EngineCommands::Check => {
            let binary = EngineBinary::locate(&config.engine.binary)?;
            let version = binary.version()?;

            println!("{} {}", "engine:".bold(), binary.path().display());
            println!("{} {}", "version:".bold(), version);
            println!("{} {}", "sdm:".bold(), config.engine.sdm);
            println!("{} {}", "wrapper prefix:".bold(), config.engine.wrapper_prefix);
            Ok(())
        }
        EngineCommands::CleanJobs => {
            let settings = EngineSettings::from_config(&config);
            let removed = cleanup_old_jobs(&settings.jobs_dir, config.jobs.max_age_seconds)?;

            println!(
                "Removed {} job file(s) from {}",
                removed,
                settings.jobs_dir.display()
            );
            Ok(())
        }
    }
}
