//! Discovery of the external workflow engine binary

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// A resolved engine binary
#[derive(Debug, Clone)]
pub struct EngineBinary {
    path: PathBuf,
}

impl EngineBinary {
    /// Resolve a binary name or path.
    ///
    /// Anything containing a path separator is taken as an explicit path;
    /// a bare name is searched on PATH.
    pub fn locate(name_or_path: &str) -> Result<Self> {
        let candidate = Path::new(name_or_path);
        let path = if candidate.components().count() > 1 {
            if !candidate.exists() {
                anyhow::bail!("Engine binary not found at {:?}", candidate);
            }
            candidate.to_path_buf()
        } else {
            which::which(name_or_path).with_context(|| {
                format!("Engine binary '{}' not found on PATH", name_or_path)
            })?
        };

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_available(&self) -> bool {
        self.path.exists()
    }

    /// Query the engine version
    pub fn version(&self) -> Result<String> {
        let output = Command::new(&self.path)
            .arg("--version")
            .output()
            .context("Failed to run engine --version")?;

        let version_str = String::from_utf8_lossy(&output.stdout);
        Ok(version_str.trim().to_string())
    }
}
