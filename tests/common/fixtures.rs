//! Test fixtures and builders

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::git::setup_git_repo;

/// A temporary working directory holding repositories and plain directories
pub struct Workspace {
    pub temp_dir: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Canonical form of `relative`, as discovery reports it
    pub fn canonical(&self, relative: &str) -> PathBuf {
        fs::canonicalize(self.path().join(relative)).expect("fixture path exists")
    }

    /// Creates a real git repository at `relative`
    pub fn git_repo(&self, relative: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        setup_git_repo(&path)?;
        Ok(path)
    }

    /// Creates a directory that looks like a repository to `RecordingExecutor`
    pub fn marked_repo(&self, relative: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        fs::create_dir_all(path.join(".git"))?;
        Ok(path)
    }

    pub fn plain_dir(&self, relative: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    pub fn file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }
}
