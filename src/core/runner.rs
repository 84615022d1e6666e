//! Sequential execution of one operation across a repository set

use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;

use super::config::{BatchConfig, DeadlineScope, ABORTED_MESSAGE};
use super::confirm::confirm_push;
use super::discovery::{collect_repositories, RepositorySet};
use super::error::BatchError;
use super::stats::BatchStatistics;
use crate::git::{is_nothing_to_commit, Deadline, ExecMode, GitExecutor, Operation, Outcome};

/// Everything the user asked for in one invocation
#[derive(Clone, Debug)]
pub struct BatchRequest {
    pub operation: Operation,
    pub patterns: Vec<String>,
    /// `--yes`: bypass the confirmation gate
    pub skip_confirmation: bool,
}

#[derive(Debug)]
pub enum BatchResult {
    Completed(BatchStatistics),
    /// The user declined the confirmation prompt; nothing was run
    Aborted,
}

/// Validates, resolves, confirms and runs a batch request
///
/// `open_input` is called only when a confirmation has to be read, so
/// operations without a prompt never touch the input stream. Errors returned
/// here are invocation-level; per-repository failures end up in the
/// statistics of `BatchResult::Completed`.
pub async fn execute_batch<R, F>(
    request: &BatchRequest,
    executor: &dyn GitExecutor,
    config: &BatchConfig,
    open_input: F,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<BatchResult, BatchError>
where
    R: BufRead,
    F: FnOnce() -> R,
{
    request.operation.validate()?;
    if request.patterns.is_empty() {
        return Err(BatchError::Usage(
            "at least one repository pattern is required".to_string(),
        ));
    }

    let repos = collect_repositories(&request.patterns, executor, config).await?;
    tracing::debug!(count = repos.len(), operation = request.operation.name(), "resolved repositories");

    if request.operation.requires_confirmation() && !request.skip_confirmation {
        let force = matches!(request.operation, Operation::Push { force: true });
        let approved = {
            let mut input = open_input();
            confirm_push(&mut input, out, repos.len(), force)?
        };
        if !approved {
            writeln!(out, "{ABORTED_MESSAGE}")?;
            return Ok(BatchResult::Aborted);
        }
    }

    let stats = run_operation(&request.operation, &repos, executor, config, out, err).await?;
    Ok(BatchResult::Completed(stats))
}

/// Runs `operation` once per repository, in set order
///
/// A failing repository is reported on `err` and never stops the loop. With
/// `DeadlineScope::Batch` a single deadline covers every repository; once it
/// has passed the remaining repositories are skipped without spawning git.
pub async fn run_operation(
    operation: &Operation,
    repos: &RepositorySet,
    executor: &dyn GitExecutor,
    config: &BatchConfig,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<BatchStatistics, BatchError> {
    let start_time = Instant::now();
    let args = operation.git_args();
    let batch_deadline = Deadline::after(config.timeout);
    let mut stats = BatchStatistics::new();

    for repo in repos {
        let deadline = match config.deadline_scope {
            DeadlineScope::Batch => batch_deadline,
            DeadlineScope::PerRepository => Deadline::after(config.timeout),
        };

        if deadline.is_expired() {
            writeln!(
                err,
                "skipped {}: batch deadline of {}s exceeded",
                repo.display(),
                config.timeout.as_secs()
            )?;
            stats.update(repo, &Outcome::Skipped);
            continue;
        }

        writeln!(out, "\n---- {} ----", repo.display())?;
        // Streaming children write straight to the terminal
        out.flush()?;

        let outcome = run_in_repository(operation, repo, &args, executor, deadline, out).await?;
        tracing::debug!(repo = %repo.display(), outcome = outcome.text(), "repository done");

        if let Some(e) = outcome.error() {
            writeln!(err, "error in {}: {}", repo.display(), e)?;
        }
        stats.update(repo, &outcome);
    }

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        stats.generate_summary(operation.name(), start_time.elapsed())
    )?;
    let details = stats.generate_detailed_summary();
    if !details.is_empty() {
        writeln!(out)?;
        writeln!(out, "{details}")?;
    }
    out.flush()?;

    Ok(stats)
}

async fn run_in_repository(
    operation: &Operation,
    repo: &Path,
    args: &[String],
    executor: &dyn GitExecutor,
    deadline: Deadline,
    out: &mut dyn Write,
) -> Result<Outcome, BatchError> {
    match operation.mode() {
        ExecMode::Streaming => Ok(match executor.stream(repo, args, deadline).await {
            Ok(()) => Outcome::Succeeded,
            Err(e) => Outcome::Failed(e),
        }),
        ExecMode::Capturing => match executor.capture(repo, args, deadline).await {
            Ok(text) => {
                write!(out, "{text}")?;
                Ok(Outcome::Succeeded)
            }
            Err(e) => {
                let benign = match e.captured_output() {
                    Some(text) => {
                        write!(out, "{text}")?;
                        matches!(operation, Operation::Commit { .. }) && is_nothing_to_commit(text)
                    }
                    None => false,
                };
                Ok(if benign {
                    Outcome::NothingToCommit
                } else {
                    Outcome::Failed(e)
                })
            }
        },
    }
}
