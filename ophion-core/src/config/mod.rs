//! Configuration types for Ophion

use crate::OphionError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub jobs: JobsConfig,
}

/// How the external workflow engine is invoked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Engine binary name or absolute path
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Software deployment method passed as --sdm
    #[serde(default = "default_sdm")]
    pub sdm: String,
    /// URL prefix prepended by the engine to relative wrapper locators
    #[serde(default = "default_wrapper_prefix")]
    pub wrapper_prefix: String,
    /// Core count used when a job does not specify threads (0 = all available)
    #[serde(default = "default_cores")]
    pub cores: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsConfig {
    /// Directory for persisted job files (defaults to OPHION_HOME/jobs)
    #[serde(default)]
    pub jobs_dir: Option<String>,
    /// Keep job files on disk after the engine exits
    #[serde(default = "default_preserve")]
    pub preserve: bool,
    /// Maximum age of leftover job files to keep (in seconds)
    #[serde(default = "default_max_age_seconds")]
    pub max_age_seconds: u64,
}

// Default value functions
fn default_binary() -> String { "snakemake".to_string() }
fn default_sdm() -> String { "conda".to_string() }
fn default_wrapper_prefix() -> String {
    "https://github.com/snakemake/snakemake-wrappers/raw/".to_string()
}
fn default_cores() -> u32 { 1 }
fn default_preserve() -> bool { false }
fn default_max_age_seconds() -> u64 { 86400 }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            sdm: default_sdm(),
            wrapper_prefix: default_wrapper_prefix(),
            cores: default_cores(),
        }
    }
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            jobs_dir: None,
            preserve: default_preserve(),
            max_age_seconds: default_max_age_seconds(),
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, OphionError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| OphionError::Configuration(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), OphionError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| OphionError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Load the config file if it exists, otherwise fall back to defaults
pub fn load_or_default() -> Result<Config, OphionError> {
    let path = crate::ophion_config_file();
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}
