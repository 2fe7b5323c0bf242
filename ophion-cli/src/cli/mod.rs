pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ophion",
    version,
    about = "Declarative bioinformatics tool invocation via an external workflow engine",
    long_about = "Ophion compiles named tool arguments into the workflow engine's rule \
                  grammar and either previews the rendered rule or persists it and drives \
                  the engine as a subprocess, reporting its exit code and output streams."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Invoke a wrapped tool through the workflow engine
    Run(commands::run::RunArgs),

    /// Inspect the available tool descriptors
    Tools(commands::tools::ToolsArgs),

    /// Inspect the configured workflow engine and its job files
    Engine(commands::engine::EngineArgs),
}
