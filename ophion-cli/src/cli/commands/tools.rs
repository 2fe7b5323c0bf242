use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use ophion_core::OphionError;
use ophion_tools::{all_tools, get_tool, Slot, ToolDescriptor};

#[derive(Args)]
pub struct ToolsArgs {
    #[command(subcommand)]
    pub command: ToolsCommands,
}

#[derive(Subcommand)]
pub enum ToolsCommands {
    /// List the available tool descriptors
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the full argument schema of one tool
    Describe {
        /// Tool name, e.g. bwa_mem
        name: String,
    },
}

pub fn run(args: ToolsArgs) -> Result<()> {
    match args.command {
        ToolsCommands::List { format } => list(&format),
        ToolsCommands::Describe { name } => describe(&name),
    }
}

fn list(format: &str) -> Result<()> {
    match format {
        "json" => {
            let tools: Vec<&ToolDescriptor> = all_tools().collect();
            println!("{}", serde_json::to_string_pretty(&tools)?);
        }
        "text" | "txt" => {
            for tool in all_tools() {
                println!(
                    "{:<16} {:<32} {}",
                    tool.name.bold(),
                    tool.wrapper,
                    tool.about
                );
            }
        }
        _ => anyhow::bail!("Unknown format '{}'. Use: text, json", format),
    }
    Ok(())
}

fn describe(name: &str) -> Result<()> {
    let tool = get_tool(name)
        .ok_or_else(|| OphionError::NotFound(format!("tool '{}'", name)))?;

    println!("{}", tool.name.bold());
    if !tool.about.is_empty() {
        println!("  {}", tool.about);
    }
    println!("  wrapper: {}", tool.wrapper);
    println!("  default threads: {}", tool.default_threads);

    print_slots("inputs", &tool.inputs);
    print_slots("outputs", &tool.outputs);
    print_slots("params", &tool.params);

    Ok(())
}

fn print_slots(role: &str, slots: &[Slot]) {
    println!("  {}:", role);
    if slots.is_empty() {
        println!("    (none)");
        return;
    }

    for slot in slots {
        let marker = if slot.required { "*" } else { " " };
        if slot.about.is_empty() {
            println!("  {} {}", marker, slot.key);
        } else {
            println!("  {} {:<16} {}", marker, slot.key, slot.about);
        }
    }
}
