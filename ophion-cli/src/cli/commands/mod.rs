pub mod engine;
pub mod run;
pub mod tools;

use anyhow::Result;
use ophion_core::{load_config, load_or_default, Config};
use std::path::Path;

/// Load an explicit config file, or fall back to the default location
pub fn load_config_from(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => load_or_default()?,
    };
    Ok(config)
}
