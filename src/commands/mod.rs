//! Command handlers behind the CLI subcommands

pub mod staging;
pub mod sync;

use anyhow::Result;
use std::io;

use crate::core::{
    execute_batch, set_terminal_title, set_terminal_title_and_flush, BatchConfig, BatchRequest,
    BatchResult,
};
use crate::git::{GitCli, Operation};

/// Runs one operation over the repositories matched by `patterns`
///
/// Console streams are the process's own; the terminal title tracks progress.
pub(crate) async fn run_batch_command(
    operation: Operation,
    patterns: Vec<String>,
    skip_confirmation: bool,
    config: &BatchConfig,
) -> Result<()> {
    let name = operation.name();
    set_terminal_title(&format!("🚀 gitbatch {name}"));

    let executor = GitCli::from_config(config);
    let request = BatchRequest {
        operation,
        patterns,
        skip_confirmation,
    };

    let mut out = io::stdout();
    let mut err = io::stderr();
    // Stdin is locked only while a confirmation line is read
    let result = execute_batch(
        &request,
        &executor,
        config,
        || io::stdin().lock(),
        &mut out,
        &mut err,
    )
    .await;

    set_terminal_title_and_flush(&format!("✅ gitbatch {name}"));

    match result? {
        BatchResult::Completed(stats) => tracing::debug!(
            total = stats.total(),
            failed = stats.failed,
            "{name} finished"
        ),
        BatchResult::Aborted => tracing::debug!("{name} aborted at confirmation"),
    }

    Ok(())
}
