//! Execution adapter: preview a rendered rule or drive the engine process
//!
//! `run` is fully synchronous; Execute mode blocks until the spawned engine
//! exits. The `threads` field of a job is only a hint forwarded to the
//! engine's own scheduler via `--cores`.

use crate::job::JobSpec;
use crate::render::render;
use anyhow::{Context, Result};
use ophion_core::{generate_utc_timestamp, ophion_jobs_dir, Config, OphionError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};
use uuid::Uuid;

/// Placeholder for the job-file path in a previewed command vector
pub const PREVIEW_PATH_PLACEHOLDER: &str = "<preview>";

/// Fixed stdout marker of a preview lowered into an [`ExecutionResult`]
pub const PREVIEW_MARKER: &str = "preview: rule rendered, engine not invoked";

/// How `run` should treat a job: render only, or render and execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Preview,
    Execute,
}

/// Uniform record of one completed engine invocation.
///
/// Constructed exactly once per invocation and owned by the caller. A
/// nonzero `return_code` is ordinary data at this layer, never an error.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub argv: Vec<String>,
    pub return_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Outcome of a preview: the rendered rule plus the command vector that
/// WOULD have been used, its final element replaced by
/// [`PREVIEW_PATH_PLACEHOLDER`] since no file is written.
#[derive(Debug, Clone)]
pub struct Preview {
    pub rule_text: String,
    pub argv: Vec<String>,
}

/// Tagged outcome of [`EngineDriver::run`], so previews and completed runs
/// cannot be confused at the type level.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Previewed(Preview),
    Completed(ExecutionResult),
}

impl RunOutcome {
    /// Lower into the uniform result record. A preview synthesizes a
    /// trivial success with the fixed informational marker.
    pub fn into_result(self) -> ExecutionResult {
        match self {
            RunOutcome::Completed(result) => result,
            RunOutcome::Previewed(preview) => ExecutionResult {
                argv: preview.argv,
                return_code: 0,
                stdout: PREVIEW_MARKER.to_string(),
                stderr: String::new(),
            },
        }
    }

    pub fn return_code(&self) -> i32 {
        match self {
            RunOutcome::Completed(result) => result.return_code,
            RunOutcome::Previewed(_) => 0,
        }
    }
}

/// How the engine is invoked and where job files are persisted
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub binary: String,
    pub sdm: String,
    pub wrapper_prefix: String,
    pub jobs_dir: PathBuf,
    /// Keep job files on disk after the engine exits
    pub preserve_jobs: bool,
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Self {
        let jobs_dir = config
            .jobs
            .jobs_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(ophion_jobs_dir);

        Self {
            binary: config.engine.binary.clone(),
            sdm: config.engine.sdm.clone(),
            wrapper_prefix: config.engine.wrapper_prefix.clone(),
            jobs_dir,
            preserve_jobs: config.jobs.preserve,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Drives the external workflow engine for one job at a time
pub struct EngineDriver {
    settings: EngineSettings,
}

impl EngineDriver {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The full command vector for a job, ending with the job-file path
    fn command_argv(&self, threads: u32, job_path: &str) -> Vec<String> {
        vec![
            self.settings.binary.clone(),
            "--cores".to_string(),
            threads.to_string(),
            "--sdm".to_string(),
            self.settings.sdm.clone(),
            "--wrapper-prefix".to_string(),
            self.settings.wrapper_prefix.clone(),
            job_path.to_string(),
        ]
    }

    /// Render a job and either preview it or execute it.
    ///
    /// Execute persists the rendered text to a unique job file, spawns the
    /// engine, and blocks until it exits. The engine's exit code is
    /// returned as data; only a failure to spawn at all is an error.
    pub fn run(&self, spec: &JobSpec, mode: RunMode) -> Result<RunOutcome> {
        let rule_text = render(spec);
        debug!(rule = %spec.name, mode = ?mode, "rendered rule:\n{}", rule_text);

        match mode {
            RunMode::Preview => {
                let argv = self.command_argv(spec.threads, PREVIEW_PATH_PLACEHOLDER);
                Ok(RunOutcome::Previewed(Preview { rule_text, argv }))
            }
            RunMode::Execute => {
                let job_file = JobFile::persist(
                    &self.settings.jobs_dir,
                    &spec.name,
                    &rule_text,
                    self.settings.preserve_jobs,
                )?;

                let argv = self.command_argv(
                    spec.threads,
                    &job_file.path().to_string_lossy(),
                );
                info!(rule = %spec.name, engine = %self.settings.binary, "invoking engine");

                let output = Command::new(&argv[0])
                    .args(&argv[1..])
                    .output()
                    .map_err(|e| {
                        OphionError::Spawn(format!("{}: {}", self.settings.binary, e))
                    })?;

                let return_code = output.status.code().unwrap_or(-1);
                info!(rule = %spec.name, exit_code = return_code, "engine exited");

                Ok(RunOutcome::Completed(ExecutionResult {
                    argv,
                    return_code,
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }))
            }
        }
    }
}

/// A persisted job file with scoped cleanup.
///
/// Each invocation gets its own path (rule name + UTC timestamp + UUID), so
/// concurrent runs in one directory never race on a shared name. The text
/// is written to a temporary sibling and renamed into place.
pub struct JobFile {
    path: PathBuf,
    preserve: bool,
}

impl JobFile {
    pub fn persist(dir: &Path, rule_name: &str, text: &str, preserve: bool) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create jobs directory: {:?}", dir))?;

        let id = format!(
            "{}_{}_{}",
            rule_name,
            generate_utc_timestamp(),
            Uuid::new_v4()
        );
        let path = dir.join(format!("{}.smk", id));
        let tmp = dir.join(format!(".{}.tmp", id));

        fs::write(&tmp, text)
            .with_context(|| format!("Failed to write job file: {:?}", tmp))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to move job file into place: {:?}", path))?;

        let preserve = preserve || std::env::var("OPHION_PRESERVE_JOBS").is_ok();
        Ok(Self { path, preserve })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for JobFile {
    fn drop(&mut self) {
        if self.preserve {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            eprintln!("Warning: Failed to remove job file {:?}: {}", self.path, e);
        }
    }
}

/// Remove leftover job files at least `max_age_seconds` old.
///
/// Preserved files from earlier runs accumulate; age is judged by
/// filesystem modification time.
pub fn cleanup_old_jobs(dir: &Path, max_age_seconds: u64) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let now = std::time::SystemTime::now();
    let mut removed = 0;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        if let Ok(modified) = entry.metadata().and_then(|m| m.modified()) {
            if let Ok(age) = now.duration_since(modified) {
                if age.as_secs() >= max_age_seconds {
                    fs::remove_file(&path).ok();
                    removed += 1;
                }
            }
        }
    }

    Ok(removed)
}

/// Render the engine-facing description of a preview for display
pub fn describe_preview(preview: &Preview) -> String {
    format!(
        "command: {}\n\n{}",
        preview.argv.join(" "),
        preview.rule_text
    )
}
