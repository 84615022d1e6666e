//! Glob pattern expansion
//!
//! The glob part of a pattern is compiled with `globset` and the literal
//! directory prefix is walked with `ignore::WalkBuilder`, so `**` can span any
//! number of directory levels. Patterns rejected as written are retried once
//! in a simpler mode: braces are literal and the walk never goes deeper than
//! the pattern has components. This covers paths a shell already expanded
//! that happen to contain an unbalanced brace.

use globset::GlobBuilder;
use ignore::{DirEntry, WalkBuilder};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::BatchError;

const GLOB_META_CHARS: &[char] = &['*', '?', '[', '{', '\\'];
const RECURSIVE_WILDCARD: &str = "**";
const GIT_DIR_NAME: &str = ".git";

/// Expands `pattern` against the filesystem
///
/// Relative patterns are resolved against `working_dir`. Returned paths may be
/// files or directories; order follows a sorted depth-first walk.
pub fn expand_pattern(pattern: &str, working_dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if pattern.trim().is_empty() {
        return Err(BatchError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: "pattern is empty".to_string(),
        });
    }

    match expand_walk(pattern, working_dir, WalkMode::Recursive) {
        Ok(paths) => {
            tracing::debug!(%pattern, matches = paths.len(), "expanded pattern");
            Ok(paths)
        }
        Err(primary) => {
            let invalid = || BatchError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: primary.to_string(),
            };
            let Some(literal) = with_literal_braces(pattern) else {
                return Err(invalid());
            };

            tracing::debug!(%pattern, error = %primary, "retrying pattern with literal braces");
            expand_walk(&literal, working_dir, WalkMode::SingleLevel).map_err(|fallback| {
                tracing::debug!(%pattern, error = %fallback, "literal-brace retry rejected pattern");
                invalid()
            })
        }
    }
}

/// Rewrites `{` and `}` as single-character classes, or `None` if there are none
fn with_literal_braces(pattern: &str) -> Option<String> {
    if !pattern.contains(['{', '}']) {
        return None;
    }
    Some(pattern.replace('{', "[{]").replace('}', "[}]"))
}

/// Splits a pattern into its literal directory prefix and the glob remainder
///
/// `"src/*/lib"` becomes `("src", Some("*/lib"))`; a pattern without glob
/// syntax has no remainder. Empty components are dropped.
pub(crate) fn split_pattern(pattern: &str) -> (String, Option<String>) {
    let components: Vec<&str> = pattern.split('/').filter(|c| !c.is_empty()).collect();
    let first_glob = components
        .iter()
        .position(|component| component.contains(GLOB_META_CHARS))
        .unwrap_or(components.len());

    let mut prefix = components[..first_glob].join("/");
    if pattern.starts_with('/') {
        prefix.insert(0, '/');
    }

    let rest = &components[first_glob..];
    let remainder = if rest.is_empty() {
        None
    } else {
        Some(rest.join("/"))
    };

    (prefix, remainder)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum WalkMode {
    /// `**` spans any number of directory levels
    Recursive,
    /// Walk depth equals the remainder's component count
    SingleLevel,
}

fn expand_walk(
    pattern: &str,
    working_dir: &Path,
    mode: WalkMode,
) -> Result<Vec<PathBuf>, globset::Error> {
    let (prefix, remainder) = split_pattern(pattern);
    let base = if prefix.is_empty() {
        working_dir.to_path_buf()
    } else {
        working_dir.join(&prefix)
    };

    let Some(remainder) = remainder else {
        // Literal path; dangling symlinks are kept and excluded by the resolver
        return Ok(if fs::symlink_metadata(&base).is_ok() {
            vec![base]
        } else {
            Vec::new()
        });
    };

    let recursive = mode == WalkMode::Recursive && remainder.contains(RECURSIVE_WILDCARD);

    // A bare `**` matches the prefix itself and everything below it
    let matcher = if recursive && remainder == RECURSIVE_WILDCARD {
        None
    } else {
        Some(
            GlobBuilder::new(&remainder)
                .literal_separator(true)
                .backslash_escape(true)
                .build()?
                .compile_matcher(),
        )
    };

    if !base.is_dir() {
        return Ok(Vec::new());
    }

    let max_depth = if recursive {
        None
    } else {
        Some(remainder.split('/').count())
    };

    let walker = WalkBuilder::new(&base)
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .max_depth(max_depth)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| !is_inside_git_dir(entry))
        .build();

    let mut matches = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let Ok(relative) = entry.path().strip_prefix(&base) else {
            continue;
        };
        let is_match = match &matcher {
            None => true,
            Some(matcher) => !relative.as_os_str().is_empty() && matcher.is_match(relative),
        };

        if is_match {
            matches.push(entry.into_path());
        }
    }

    Ok(matches)
}

// Nothing below a .git directory is ever inside a work tree; the .git entry
// itself is still yielded since worktrees and submodules use a .git file
fn is_inside_git_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .path()
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|name| name == OsStr::new(GIT_DIR_NAME))
}
