//! Statistics tracking for batch operations

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::config::{
    ERROR_MESSAGE_MAX_LENGTH, ERROR_MESSAGE_TRUNCATE_LENGTH, PATH_DISPLAY_WIDTH,
};
use crate::git::Outcome;
use crate::utils::shorten_path;

/// Per-batch counters and the repositories that need attention
#[derive(Debug, Default)]
pub struct BatchStatistics {
    pub succeeded: u32,
    pub nothing_to_commit: u32,
    pub skipped: u32,
    pub failed: u32,
    pub failed_repos: Vec<(PathBuf, String)>, // (repo_path, error_message)
    pub skipped_repos: Vec<PathBuf>,
}

impl BatchStatistics {
    /// Creates a new statistics tracker with all counters initialized to zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for one repository
    pub fn update(&mut self, repo_path: &Path, outcome: &Outcome) {
        match outcome {
            Outcome::Succeeded => self.succeeded += 1,
            Outcome::NothingToCommit => self.nothing_to_commit += 1,
            Outcome::Skipped => {
                self.skipped += 1;
                self.skipped_repos.push(repo_path.to_path_buf());
            }
            Outcome::Failed(err) => {
                self.failed += 1;
                self.failed_repos
                    .push((repo_path.to_path_buf(), err.to_string()));
            }
        }
    }

    /// Number of repositories recorded so far
    pub fn total(&self) -> u32 {
        self.succeeded + self.nothing_to_commit + self.skipped + self.failed
    }

    /// One-line summary of the batch
    pub fn generate_summary(&self, operation: &str, duration: Duration) -> String {
        let mut summary = format!(
            "✅ {} completed in {:.1}s • {} succeeded",
            operation,
            duration.as_secs_f64(),
            self.succeeded
        );

        if self.nothing_to_commit > 0 {
            summary.push_str(&format!(" • {} nothing to commit", self.nothing_to_commit));
        }
        if self.failed > 0 {
            summary.push_str(&format!(" • {} failed", self.failed));
        }
        if self.skipped > 0 {
            summary.push_str(&format!(" • {} skipped", self.skipped));
        }

        summary
    }

    /// Lists failed and skipped repositories; empty when nothing needs attention
    pub fn generate_detailed_summary(&self) -> String {
        let mut lines = Vec::new();

        // Failed repos get priority
        if !self.failed_repos.is_empty() {
            lines.push(format!("🔴 FAILED REPOS ({})", self.failed_repos.len()));
            for (i, (repo_path, error)) in self.failed_repos.iter().enumerate() {
                let tree_char = tree_char(i, self.failed_repos.len());
                let short_path = shorten_path(repo_path, PATH_DISPLAY_WIDTH);
                lines.push(format!(
                    "   {} {:40} # {}",
                    tree_char,
                    short_path,
                    clean_error_message(error)
                ));
            }
            lines.push(String::new());
        }

        if !self.skipped_repos.is_empty() {
            lines.push(format!("🟠 SKIPPED REPOS ({})", self.skipped_repos.len()));
            for (i, repo_path) in self.skipped_repos.iter().enumerate() {
                let tree_char = tree_char(i, self.skipped_repos.len());
                let short_path = shorten_path(repo_path, PATH_DISPLAY_WIDTH);
                lines.push(format!("   {} {}", tree_char, short_path));
            }
        }

        // Remove trailing blank line if it exists
        if lines.last() == Some(&String::new()) {
            lines.pop();
        }

        lines.join("\n")
    }
}

fn tree_char(index: usize, len: usize) -> &'static str {
    if index == len - 1 {
        "└─"
    } else {
        "├─"
    }
}

/// Cleans and formats error messages for display
pub(crate) fn clean_error_message(error: &str) -> String {
    // Collapse newlines, tabs and runs of whitespace
    let cleaned = error.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.contains("timed out") {
        "timeout".to_string()
    } else if cleaned.chars().count() > ERROR_MESSAGE_MAX_LENGTH {
        let truncated: String = cleaned.chars().take(ERROR_MESSAGE_TRUNCATE_LENGTH).collect();
        format!("{truncated}...")
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BatchError;

    fn tool_error(code: i32) -> Outcome {
        Outcome::Failed(BatchError::ToolError {
            program: "git".to_string(),
            code: Some(code),
            output: None,
        })
    }

    #[test]
    fn test_update_counts_each_outcome() {
        let mut stats = BatchStatistics::new();
        stats.update(Path::new("/r/a"), &Outcome::Succeeded);
        stats.update(Path::new("/r/b"), &Outcome::NothingToCommit);
        stats.update(Path::new("/r/c"), &tool_error(1));
        stats.update(Path::new("/r/d"), &Outcome::Skipped);

        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.nothing_to_commit, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.total(), 4);
        assert_eq!(stats.failed_repos[0].0, PathBuf::from("/r/c"));
        assert_eq!(stats.skipped_repos, vec![PathBuf::from("/r/d")]);
    }

    #[test]
    fn test_summary_omits_zero_counters() {
        let mut stats = BatchStatistics::new();
        stats.update(Path::new("/r/a"), &Outcome::Succeeded);
        let summary = stats.generate_summary("status", Duration::from_millis(1500));
        assert_eq!(summary, "✅ status completed in 1.5s • 1 succeeded");
        assert!(stats.generate_detailed_summary().is_empty());
    }

    #[test]
    fn test_summary_reports_failures() {
        let mut stats = BatchStatistics::new();
        stats.update(Path::new("/r/a"), &tool_error(128));
        stats.update(Path::new("/r/b"), &Outcome::Skipped);

        let summary = stats.generate_summary("pull", Duration::from_secs(2));
        assert!(summary.contains("1 failed"));
        assert!(summary.contains("1 skipped"));

        let detail = stats.generate_detailed_summary();
        assert!(detail.starts_with("🔴 FAILED REPOS (1)"));
        assert!(detail.contains("/r/a"));
        assert!(detail.contains("git exited with exit status 128"));
        assert!(detail.contains("🟠 SKIPPED REPOS (1)"));
        assert!(!detail.ends_with('\n'));
    }

    #[test]
    fn test_spawn_failure_keeps_its_message() {
        let mut stats = BatchStatistics::new();
        let denied = BatchError::Spawn {
            program: "/opt/git".to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "Permission denied (os error 13)",
            ),
        };
        stats.update(Path::new("/r/a"), &Outcome::Failed(denied));

        let detail = stats.generate_detailed_summary();
        assert!(detail.contains("# failed to run /opt/git: Permission denied (os error 13)"));
        assert!(!detail.contains("authentication"));
    }

    #[test]
    fn test_clean_error_message() {
        assert_eq!(clean_error_message("a\n  b\tc"), "a b c");
        assert_eq!(clean_error_message("git timed out (deadline of 5s exceeded)"), "timeout");
        let long = "x".repeat(100);
        let cleaned = clean_error_message(&long);
        assert_eq!(cleaned.chars().count(), ERROR_MESSAGE_TRUNCATE_LENGTH + 3);
        assert!(cleaned.ends_with("..."));
    }
}
