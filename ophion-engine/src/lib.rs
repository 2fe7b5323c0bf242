//! Invocation compiler and execution adapter for the external workflow engine
//!
//! This crate turns a declarative [`JobSpec`] into the engine's rule-text
//! grammar and either previews that text or persists it and drives the
//! engine as a subprocess, normalizing the outcome into an
//! [`ExecutionResult`].

pub mod discovery;
pub mod exec;
pub mod job;
pub mod render;

// Re-exports for convenience
pub use discovery::EngineBinary;
pub use exec::{
    cleanup_old_jobs, describe_preview, EngineDriver, EngineSettings, ExecutionResult, JobFile,
    Preview, RunMode, RunOutcome, PREVIEW_MARKER, PREVIEW_PATH_PLACEHOLDER,
};
pub use job::{JobSpec, Value};
pub use render::{format_value, render};
