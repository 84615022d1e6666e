//! Repository resolution and repository set building

use indicatif::ProgressBar;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::config::{BatchConfig, SCANNING_MESSAGE};
use super::error::BatchError;
use super::pattern::expand_pattern;
use super::progress::create_discovery_spinner;
use crate::git::GitExecutor;

/// Ordered, deduplicated set of repository directories
///
/// Identity is the canonical path; the first insertion fixes the position.
#[derive(Clone, Debug, Default)]
pub struct RepositorySet {
    repos: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl RepositorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `path` unless already present; returns whether it was added
    pub fn insert(&mut self, path: PathBuf) -> bool {
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.repos.push(path);
        true
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.repos.iter()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.repos
    }
}

impl FromIterator<PathBuf> for RepositorySet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        let mut set = Self::new();
        for path in iter {
            set.insert(path);
        }
        set
    }
}

impl<'a> IntoIterator for &'a RepositorySet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Turns a candidate path into the canonical directory to probe
///
/// Files resolve to their parent directory. Any stat or canonicalization
/// error (dangling symlink, permission denied, vanished entry) excludes the
/// candidate.
pub fn resolve_candidate(candidate: &Path, working_dir: &Path) -> Option<PathBuf> {
    let absolute = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        working_dir.join(candidate)
    };

    let metadata = match fs::metadata(&absolute) {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::debug!(path = %absolute.display(), error = %e, "excluding candidate");
            return None;
        }
    };

    let dir = if metadata.is_dir() {
        absolute
    } else {
        absolute.parent()?.to_path_buf()
    };

    match fs::canonicalize(&dir) {
        Ok(canonical) => Some(canonical),
        Err(e) => {
            tracing::debug!(path = %dir.display(), error = %e, "excluding candidate");
            None
        }
    }
}

/// Expands every pattern and keeps the directories git reports as work trees
///
/// Fails with `NoRepositoriesFound` rather than returning an empty set, and with
/// `InvalidPattern` as soon as any pattern cannot be parsed.
pub async fn collect_repositories(
    patterns: &[String],
    executor: &dyn GitExecutor,
    config: &BatchConfig,
) -> Result<RepositorySet, BatchError> {
    let spinner = create_discovery_spinner(SCANNING_MESSAGE);
    let result = build_repository_set(patterns, executor, config, &spinner).await;
    spinner.finish_and_clear();
    result
}

async fn build_repository_set(
    patterns: &[String],
    executor: &dyn GitExecutor,
    config: &BatchConfig,
    spinner: &ProgressBar,
) -> Result<RepositorySet, BatchError> {
    let mut repos = RepositorySet::new();
    // Directories already probed negative are not asked again
    let mut rejected: HashSet<PathBuf> = HashSet::new();

    for pattern in patterns {
        let candidates = expand_pattern(pattern, &config.working_dir)?;
        spinner.set_message(format!(
            "{SCANNING_MESSAGE} {pattern} ({} candidates)",
            candidates.len()
        ));

        for candidate in candidates {
            let Some(dir) = resolve_candidate(&candidate, &config.working_dir) else {
                continue;
            };
            if repos.contains(&dir) || rejected.contains(&dir) {
                continue;
            }

            if executor.is_work_tree(&dir).await {
                tracing::debug!(repo = %dir.display(), %pattern, "found repository");
                repos.insert(dir);
            } else {
                rejected.insert(dir);
            }
        }
    }

    if repos.is_empty() {
        return Err(BatchError::NoRepositoriesFound {
            patterns: patterns.to_vec(),
        });
    }

    Ok(repos)
}
