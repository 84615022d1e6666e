//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod git;

pub use self::fixtures::Workspace;
pub use self::git::{create_test_commit, is_git_available, setup_git_repo};

use async_trait::async_trait;
use gitbatch::core::BatchError;
use gitbatch::git::{Deadline, GitExecutor};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

static TEST_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Acquires a global lock for tests that modify process-wide state (like env vars)
pub fn lock_test() -> MutexGuard<'static, ()> {
    TEST_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One recorded git invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub dir: PathBuf,
    pub args: Vec<String>,
}

/// Executor double: a directory is a work tree when it holds a `.git` entry,
/// and every run is recorded instead of spawning git
#[derive(Default)]
pub struct RecordingExecutor {
    invocations: Mutex<Vec<Invocation>>,
    failing: Vec<PathBuf>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every run inside `dir` exit with status 1
    pub fn failing_in(mut self, dir: PathBuf) -> Self {
        self.failing.push(dir);
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    fn record(&self, dir: &Path, args: &[String]) -> Result<(), BatchError> {
        self.invocations.lock().unwrap().push(Invocation {
            dir: dir.to_path_buf(),
            args: args.to_vec(),
        });
        if self.failing.iter().any(|failing| failing == dir) {
            return Err(BatchError::ToolError {
                program: "git".to_string(),
                code: Some(1),
                output: None,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl GitExecutor for RecordingExecutor {
    fn program(&self) -> &str {
        "git"
    }

    async fn is_work_tree(&self, dir: &Path) -> bool {
        dir.join(".git").exists()
    }

    async fn stream(&self, dir: &Path, args: &[String], _: Deadline) -> Result<(), BatchError> {
        self.record(dir, args)
    }

    async fn capture(&self, dir: &Path, args: &[String], _: Deadline) -> Result<String, BatchError> {
        self.record(dir, args).map(|()| String::new())
    }
}
