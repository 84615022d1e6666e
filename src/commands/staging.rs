//! Local working-tree commands: status, diff, add and commit
//!
//! None of these contact a remote, so none of them ask for confirmation.

use anyhow::Result;

use super::run_batch_command;
use crate::core::BatchConfig;
use crate::git::Operation;

/// Handles `gitbatch status`
pub async fn handle_status_command(patterns: Vec<String>, config: &BatchConfig) -> Result<()> {
    run_batch_command(Operation::Status, patterns, false, config).await
}

/// Handles `gitbatch diff`
pub async fn handle_diff_command(patterns: Vec<String>, config: &BatchConfig) -> Result<()> {
    run_batch_command(Operation::Diff, patterns, false, config).await
}

/// Handles `gitbatch add` (alias `stage`); stages everything when no pathspec is given
pub async fn handle_add_command(
    patterns: Vec<String>,
    pathspec: Option<String>,
    config: &BatchConfig,
) -> Result<()> {
    run_batch_command(Operation::Add { pathspec }, patterns, false, config).await
}

/// Handles `gitbatch commit`
pub async fn handle_commit_command(
    patterns: Vec<String>,
    message: String,
    config: &BatchConfig,
) -> Result<()> {
    run_batch_command(Operation::Commit { message }, patterns, false, config).await
}
