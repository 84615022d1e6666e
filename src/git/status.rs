//! Per-repository outcome of a batch operation

use crate::core::BatchError;

/// Result of running one operation inside one repository
#[derive(Debug)]
pub enum Outcome {
    /// The git invocation exited successfully
    Succeeded,
    /// Commit found nothing to record; benign, not reported as an error
    NothingToCommit,
    /// Not attempted because the batch deadline had already passed
    Skipped,
    /// The invocation failed; reported with the repository path
    Failed(BatchError),
}

impl Outcome {
    /// Returns the text representation of this outcome
    pub fn text(&self) -> &str {
        match self {
            Outcome::Succeeded => "ok",
            Outcome::NothingToCommit => "nothing-to-commit",
            Outcome::Skipped => "skipped",
            Outcome::Failed(_) => "failed",
        }
    }

    pub fn error(&self) -> Option<&BatchError> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}
