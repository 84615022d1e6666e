//! Operation definitions and their git argument templates

use crate::core::config::{DEFAULT_PATHSPEC, NOTHING_TO_COMMIT_MARKERS};
use crate::core::BatchError;

// Git command arguments
const GIT_STATUS_ARGS: &[&str] = &["status"];
const GIT_DIFF_ARGS: &[&str] = &["--no-pager", "diff"];
const GIT_PULL_ARGS: &[&str] = &["pull"];
const GIT_ADD_ARGS: &[&str] = &["add", "--"];
const GIT_COMMIT_ARGS: &[&str] = &["commit", "-m"];
const GIT_PUSH_ARGS: &[&str] = &["push"];
const GIT_FORCE_FLAG: &str = "--force";

/// How the executor wires the child's standard streams
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    /// Child inherits stdin/stdout/stderr; output is seen live
    Streaming,
    /// Output is buffered and returned to the caller for inspection
    Capturing,
}

/// A user-selected batch operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Status,
    Diff,
    Pull,
    Add { pathspec: Option<String> },
    Commit { message: String },
    Push { force: bool },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Status => "status",
            Operation::Diff => "diff",
            Operation::Pull => "pull",
            Operation::Add { .. } => "add",
            Operation::Commit { .. } => "commit",
            Operation::Push { .. } => "push",
        }
    }

    /// Full git argument vector for this operation
    pub fn git_args(&self) -> Vec<String> {
        let mut args: Vec<String> = match self {
            Operation::Status => to_owned(GIT_STATUS_ARGS),
            Operation::Diff => to_owned(GIT_DIFF_ARGS),
            Operation::Pull => to_owned(GIT_PULL_ARGS),
            Operation::Add { .. } => to_owned(GIT_ADD_ARGS),
            Operation::Commit { .. } => to_owned(GIT_COMMIT_ARGS),
            Operation::Push { .. } => to_owned(GIT_PUSH_ARGS),
        };

        match self {
            Operation::Add { pathspec } => {
                let pathspec = pathspec
                    .as_deref()
                    .filter(|spec| !spec.is_empty())
                    .unwrap_or(DEFAULT_PATHSPEC);
                args.push(pathspec.to_string());
            }
            Operation::Commit { message } => args.push(message.clone()),
            Operation::Push { force: true } => args.push(GIT_FORCE_FLAG.to_string()),
            _ => {}
        }

        args
    }

    pub fn mode(&self) -> ExecMode {
        match self {
            // Output must be inspected to classify "nothing to commit"
            Operation::Commit { .. } => ExecMode::Capturing,
            _ => ExecMode::Streaming,
        }
    }

    /// Destructive operations go through the confirmation gate
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, Operation::Push { .. })
    }

    /// Rejects unusable arguments before any repository is resolved
    pub fn validate(&self) -> Result<(), BatchError> {
        if let Operation::Commit { message } = self {
            if message.trim().is_empty() {
                return Err(BatchError::Usage(
                    "commit message required: use -m \"message\"".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Checks captured commit output for git's "nothing to commit" phrasings
pub fn is_nothing_to_commit(output: &str) -> bool {
    NOTHING_TO_COMMIT_MARKERS
        .iter()
        .any(|marker| output.contains(marker))
}

fn to_owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_operations_stream() {
        assert_eq!(Operation::Status.git_args(), vec!["status"]);
        assert_eq!(Operation::Diff.git_args(), vec!["--no-pager", "diff"]);
        assert_eq!(Operation::Pull.git_args(), vec!["pull"]);
        for op in [Operation::Status, Operation::Diff, Operation::Pull] {
            assert_eq!(op.mode(), ExecMode::Streaming);
            assert!(!op.requires_confirmation());
        }
    }

    #[test]
    fn test_add_defaults_to_whole_tree() {
        let op = Operation::Add { pathspec: None };
        assert_eq!(op.git_args(), vec!["add", "--", "."]);

        let empty = Operation::Add {
            pathspec: Some(String::new()),
        };
        assert_eq!(empty.git_args(), vec!["add", "--", "."]);
    }

    #[test]
    fn test_add_pathspec_follows_separator_verbatim() {
        let op = Operation::Add {
            pathspec: Some("--all".to_string()),
        };
        assert_eq!(op.git_args(), vec!["add", "--", "--all"]);

        let op = Operation::Add {
            pathspec: Some("src/*.js".to_string()),
        };
        assert_eq!(op.git_args(), vec!["add", "--", "src/*.js"]);
    }

    #[test]
    fn test_commit_captures_with_message() {
        let op = Operation::Commit {
            message: "Fix typo".to_string(),
        };
        assert_eq!(op.git_args(), vec!["commit", "-m", "Fix typo"]);
        assert_eq!(op.mode(), ExecMode::Capturing);
        assert!(op.validate().is_ok());
    }

    #[test]
    fn test_blank_commit_message_is_usage_error() {
        for message in ["", "   ", "\n\t"] {
            let op = Operation::Commit {
                message: message.to_string(),
            };
            assert!(matches!(op.validate(), Err(BatchError::Usage(_))));
        }
    }

    #[test]
    fn test_push_force_and_confirmation() {
        let op = Operation::Push { force: false };
        assert_eq!(op.git_args(), vec!["push"]);
        assert!(op.requires_confirmation());

        let op = Operation::Push { force: true };
        assert_eq!(op.git_args(), vec!["push", "--force"]);
        assert_eq!(op.mode(), ExecMode::Streaming);
    }

    #[test]
    fn test_nothing_to_commit_detection() {
        assert!(is_nothing_to_commit(
            "On branch main\nnothing to commit, working tree clean\n"
        ));
        assert!(is_nothing_to_commit(
            "Untracked files:\n\ta.txt\nnothing added to commit but untracked files present"
        ));
        assert!(!is_nothing_to_commit("error: pathspec did not match"));
        assert!(!is_nothing_to_commit(""));
    }
}
