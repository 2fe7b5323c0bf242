pub mod paths;

// Re-export commonly used functions
pub use paths::{generate_utc_timestamp, ophion_config_file, ophion_home, ophion_jobs_dir};
