//! Git process execution under a deadline

use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::Instant;

use crate::core::config::{BatchConfig, PROBE_TIMEOUT_SECS, WORK_TREE_TOKEN};
use crate::core::BatchError;

const GIT_WORK_TREE_PROBE_ARGS: &[&str] = &["rev-parse", "--is-inside-work-tree"];

// Upper bound for deadlines built from absurdly large timeouts
const FAR_FUTURE_SECS: u64 = 60 * 60 * 24 * 365;

/// Point in time after which a running invocation is killed
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Deadline `budget` from now
    pub fn after(budget: Duration) -> Self {
        let now = Instant::now();
        let at = now
            .checked_add(budget)
            .unwrap_or_else(|| now + Duration::from_secs(FAR_FUTURE_SECS));
        Self { at, budget }
    }

    pub fn instant(&self) -> Instant {
        self.at
    }

    /// The timeout this deadline was built from (used in error messages)
    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }
}

/// The version-control collaborator: one trait so the runner and discovery can
/// be driven by a real git binary or by a test double
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Program name used in error messages
    fn program(&self) -> &str;

    /// Asks git whether `dir` is inside a working tree
    async fn is_work_tree(&self, dir: &Path) -> bool;

    /// Runs with inherited stdin/stdout/stderr; only success or failure is returned
    async fn stream(&self, dir: &Path, args: &[String], deadline: Deadline)
        -> Result<(), BatchError>;

    /// Runs with buffered output; the text is returned on success and carried
    /// inside `BatchError::ToolError` on failure
    async fn capture(
        &self,
        dir: &Path,
        args: &[String],
        deadline: Deadline,
    ) -> Result<String, BatchError>;
}

/// `GitExecutor` backed by the git command-line program
#[derive(Clone, Debug)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &BatchConfig) -> Self {
        Self::new(config.git_program.clone())
    }

    fn command<S: AsRef<std::ffi::OsStr>>(&self, dir: &Path, args: &[S]) -> Command {
        let mut cmd = Command::new(&self.program);
        // Dropping the wait future (deadline, cancellation) must not orphan the child
        cmd.args(args).current_dir(dir).kill_on_drop(true);
        cmd
    }

    fn spawn_error(&self, source: io::Error) -> BatchError {
        if source.kind() == io::ErrorKind::NotFound {
            BatchError::ToolNotFound {
                program: self.program.clone(),
            }
        } else {
            BatchError::Spawn {
                program: self.program.clone(),
                source,
            }
        }
    }

    fn timeout_error(&self, deadline: Deadline) -> BatchError {
        BatchError::Timeout {
            program: self.program.clone(),
            timeout: deadline.budget(),
        }
    }

    fn exit_error(&self, status: ExitStatus, output: Option<String>) -> BatchError {
        BatchError::ToolError {
            program: self.program.clone(),
            code: status.code(),
            output,
        }
    }
}

#[async_trait]
impl GitExecutor for GitCli {
    fn program(&self) -> &str {
        &self.program
    }

    async fn is_work_tree(&self, dir: &Path) -> bool {
        let mut cmd = self.command(dir, GIT_WORK_TREE_PROBE_ARGS);
        cmd.stdin(Stdio::null());

        let result =
            tokio::time::timeout(Duration::from_secs(PROBE_TIMEOUT_SECS), cmd.output()).await;

        match result {
            Ok(Ok(output)) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                output.status.success() && stdout.trim() == WORK_TREE_TOKEN
            }
            Ok(Err(e)) => {
                if e.kind() == io::ErrorKind::NotFound {
                    tracing::warn!("{} not found in PATH; cannot probe {}", self.program, dir.display());
                } else {
                    tracing::debug!(dir = %dir.display(), error = %e, "work tree probe failed");
                }
                false
            }
            Err(_) => {
                tracing::warn!(
                    "work tree probe timed out after {PROBE_TIMEOUT_SECS}s in {}",
                    dir.display()
                );
                false
            }
        }
    }

    async fn stream(
        &self,
        dir: &Path,
        args: &[String],
        deadline: Deadline,
    ) -> Result<(), BatchError> {
        tracing::debug!(dir = %dir.display(), ?args, "streaming {}", self.program);

        let mut cmd = self.command(dir, args);
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        let mut child = cmd.spawn().map_err(|e| self.spawn_error(e))?;

        match tokio::time::timeout_at(deadline.instant(), child.wait()).await {
            Ok(Ok(status)) if status.success() => Ok(()),
            Ok(Ok(status)) => Err(self.exit_error(status, None)),
            Ok(Err(source)) => Err(BatchError::Spawn {
                program: self.program.clone(),
                source,
            }),
            Err(_) => {
                if let Err(e) = child.kill().await {
                    tracing::debug!(error = %e, "failed to kill timed out child");
                }
                Err(self.timeout_error(deadline))
            }
        }
    }

    async fn capture(
        &self,
        dir: &Path,
        args: &[String],
        deadline: Deadline,
    ) -> Result<String, BatchError> {
        tracing::debug!(dir = %dir.display(), ?args, "capturing {}", self.program);

        let mut cmd = self.command(dir, args);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let child = cmd.spawn().map_err(|e| self.spawn_error(e))?;

        // On timeout the future is dropped together with the child, which kills it
        match tokio::time::timeout_at(deadline.instant(), child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stderr));
                if output.status.success() {
                    Ok(text)
                } else {
                    Err(self.exit_error(output.status, Some(text)))
                }
            }
            Ok(Err(source)) => Err(BatchError::Spawn {
                program: self.program.clone(),
                source,
            }),
            Err(_) => Err(self.timeout_error(deadline)),
        }
    }
}
