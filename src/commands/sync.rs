//! Remote-facing commands: pull and push

use anyhow::Result;

use super::run_batch_command;
use crate::core::BatchConfig;
use crate::git::Operation;

/// Handles `gitbatch pull`
pub async fn handle_pull_command(patterns: Vec<String>, config: &BatchConfig) -> Result<()> {
    run_batch_command(Operation::Pull, patterns, false, config).await
}

/// Handles `gitbatch push`
///
/// Asks for confirmation after the repositories are resolved unless `yes` is set.
pub async fn handle_push_command(
    patterns: Vec<String>,
    force: bool,
    yes: bool,
    config: &BatchConfig,
) -> Result<()> {
    run_batch_command(Operation::Push { force }, patterns, yes, config).await
}
