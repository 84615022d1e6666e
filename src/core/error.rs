//! Error taxonomy for batch invocations
//!
//! Invocation-level variants (`InvalidPattern`, `NoRepositoriesFound`, `Usage`)
//! abort the whole run. The remaining variants describe a single repository's
//! failure and are reported by the runner without stopping the batch.

use std::io;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Pattern rejected by both matching engines
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Every pattern was expanded and nothing resolved to a repository
    #[error("no git repositories found for pattern(s): {}", .patterns.join(", "))]
    NoRepositoriesFound { patterns: Vec<String> },

    /// Missing or malformed arguments, detected before resolution
    #[error("{0}")]
    Usage(String),

    #[error("{program} not found in PATH")]
    ToolNotFound { program: String },

    #[error("{program} timed out (deadline of {}s exceeded)", .timeout.as_secs())]
    Timeout { program: String, timeout: Duration },

    /// Non-zero exit; `output` is set when the invocation was captured
    #[error("{program} exited with {}", describe_exit(*.code))]
    ToolError {
        program: String,
        code: Option<i32>,
        output: Option<String>,
    },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Writing to the console or reading the confirmation failed
    #[error("console I/O failed: {0}")]
    Console(#[from] io::Error),
}

impl BatchError {
    /// Captured output carried by a `ToolError`, if any
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            BatchError::ToolError {
                output: Some(output),
                ..
            } => Some(output),
            _ => None,
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "no exit status (terminated by signal)".to_string(),
    }
}
