use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static OPHION_HOME: OnceLock<PathBuf> = OnceLock::new();
static OPHION_JOBS_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Generate a UTC timestamp for job-file identifiers
/// Returns format: YYYYMMDD_HHMMSS (in UTC timezone)
pub fn generate_utc_timestamp() -> String {
    chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Get the Ophion home directory
/// Checks OPHION_HOME environment variable, falls back to ${HOME}/.ophion
pub fn ophion_home() -> PathBuf {
    OPHION_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("OPHION_HOME") {
                PathBuf::from(path)
            } else {
                let home = std::env::var("HOME").unwrap_or_else(|_| {
                    std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string())
                });
                PathBuf::from(home).join(".ophion")
            }
        })
        .clone()
}

/// Get the directory where rendered job files are persisted
/// Checks OPHION_JOBS_DIR environment variable, falls back to OPHION_HOME/jobs
pub fn ophion_jobs_dir() -> PathBuf {
    OPHION_JOBS_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("OPHION_JOBS_DIR") {
                PathBuf::from(path)
            } else {
                ophion_home().join("jobs")
            }
        })
        .clone()
}

/// Get the default configuration file path (OPHION_HOME/config.toml)
pub fn ophion_config_file() -> PathBuf {
    ophion_home().join("config.toml")
}
