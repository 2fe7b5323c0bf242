use anyhow::Result;
use clap::Args;
use colored::*;
use indexmap::IndexMap;
use ophion_core::OphionError;
use ophion_engine::{describe_preview, EngineDriver, EngineSettings, RunMode, RunOutcome, Value};
use ophion_tools::{invoke, ToolArgs};
use std::path::PathBuf;

#[derive(Args)]
pub struct RunArgs {
    /// Tool to invoke (see `ophion tools list`)
    pub tool: String,

    /// Named input as key=value (repeatable; a repeated key collects a list)
    #[arg(short = 'i', long = "input", value_name = "KEY=VALUE")]
    pub inputs: Vec<String>,

    /// Named output as key=value (repeatable)
    #[arg(short = 'o', long = "output", value_name = "KEY=VALUE")]
    pub outputs: Vec<String>,

    /// Named param as key=value (repeatable)
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Thread hint forwarded to the engine (0 = all available cores)
    #[arg(short = 'j', long)]
    pub threads: Option<u32>,

    /// Override the engine's wrapper locator prefix URL
    #[arg(long, value_name = "URL")]
    pub wrapper_prefix: Option<String>,

    /// Raw rule text appended verbatim after the rendered sections
    #[arg(long, value_name = "TEXT")]
    pub extra: Option<String>,

    /// Render and print the rule without touching the filesystem or the engine
    #[arg(long)]
    pub dry_run: bool,

    /// Config file path (defaults to OPHION_HOME/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

pub fn run(args: RunArgs) -> Result<i32> {
    let config = super::load_config_from(args.config.as_deref())?;

    let mut settings = EngineSettings::from_config(&config);
    if let Some(prefix) = &args.wrapper_prefix {
        settings.wrapper_prefix = prefix.clone();
    }

    let mut tool_args = ToolArgs::new();
    collect_entries(&mut tool_args.inputs, "input", &args.inputs)?;
    collect_entries(&mut tool_args.outputs, "output", &args.outputs)?;
    collect_entries(&mut tool_args.params, "param", &args.params)?;

    tool_args.threads = args.threads.map(|threads| {
        if threads == 0 {
            num_cpus::get() as u32
        } else {
            threads
        }
    });
    tool_args.extra = args.extra.clone();

    let driver = EngineDriver::new(settings);
    let mode = if args.dry_run {
        RunMode::Preview
    } else {
        RunMode::Execute
    };

    match invoke(&driver, &args.tool, &tool_args, mode)? {
        RunOutcome::Previewed(preview) => {
            println!("{}", describe_preview(&preview));
            Ok(0)
        }
        RunOutcome::Completed(result) => {
            print!("{}", result.stdout);
            eprint!("{}", result.stderr);

            if result.return_code != 0 {
                eprintln!(
                    "{} engine exited with code {}",
                    "Warning:".yellow().bold(),
                    result.return_code
                );
            }
            Ok(result.return_code)
        }
    }
}

/// Parse repeated key=value entries into a mapping, collecting a repeated
/// key into an ordered list value
fn collect_entries(
    map: &mut IndexMap<String, Value>,
    role: &str,
    entries: &[String],
) -> Result<()> {
    for entry in entries {
        let (key, value) = entry.split_once('=').ok_or_else(|| {
            OphionError::InvalidInput(format!(
                "{} '{}' is not of the form key=value",
                role, entry
            ))
        })?;

        match map.get_mut(key) {
            Some(Value::List(items)) => items.push(Value::from(value)),
            Some(existing) => {
                let first = existing.clone();
                *existing = Value::List(vec![first, Value::from(value)]);
            }
            None => {
                map.insert(key.to_string(), Value::from(value));
            }
        }
    }
    Ok(())
}
