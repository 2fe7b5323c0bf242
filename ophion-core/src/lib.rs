//! Core utilities and types shared across all Ophion crates

pub mod config;
pub mod error;
pub mod system;

// Re-export commonly used types
pub use config::{load_config, load_or_default, save_config, Config, EngineConfig, JobsConfig};
pub use error::{OphionError, OphionResult};

// Re-export system utilities
pub use system::{
    generate_utc_timestamp, ophion_config_file, ophion_home, ophion_jobs_dir,
};

/// Version information for the Ophion project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
