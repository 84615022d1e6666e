//! Interactive confirmation for destructive operations

use std::io::{self, BufRead, Write};

use super::config::PUSH_FORCE_WARNING;

/// Only these answers approve, compared trimmed and case-insensitively
const APPROVALS: &[&str] = &["y", "yes"];

/// Checks one line of user input for approval
pub fn is_approval(input: &str) -> bool {
    let answer = input.trim().to_lowercase();
    APPROVALS.contains(&answer.as_str())
}

/// Prompts before pushing to `repo_count` repositories
///
/// Reads exactly one line from `input`. Empty input, end of stream and read
/// errors all count as refusal.
pub fn confirm_push<R: BufRead + ?Sized, W: Write + ?Sized>(
    input: &mut R,
    out: &mut W,
    repo_count: usize,
    force: bool,
) -> io::Result<bool> {
    if force {
        writeln!(out, "{PUSH_FORCE_WARNING}")?;
    }
    write!(
        out,
        "About to push to {repo_count} {}. This will contact remotes and may change remote history. Continue? (y/N): ",
        if repo_count == 1 { "repository" } else { "repositories" }
    )?;
    out.flush()?;

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => Ok(false),
        Ok(_) => Ok(is_approval(&line)),
        Err(e) => {
            tracing::warn!(error = %e, "could not read confirmation; treating as refusal");
            Ok(false)
        }
    }
}
