//! Core error types for Ophion

use thiserror::Error;

/// Main error type for Ophion operations
#[derive(Error, Debug)]
pub enum OphionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Engine spawn error: {0}")]
    Spawn(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for Ophion operations
pub type OphionResult<T> = Result<T, OphionError>;

// Conversion implementations for common error types
impl From<toml::de::Error> for OphionError {
    fn from(err: toml::de::Error) -> Self {
        OphionError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for OphionError {
    fn from(err: anyhow::Error) -> Self {
        OphionError::Other(err.to_string())
    }
}
