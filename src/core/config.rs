//! Configuration constants and settings

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Timeouts
//
// The batch timeout bounds a whole operation run (see `DeadlineScope`). The probe
// timeout bounds each `rev-parse --is-inside-work-tree` call during discovery.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const PROBE_TIMEOUT_SECS: u64 = 10;

// External tool
pub const DEFAULT_GIT_PROGRAM: &str = "git";
pub const DEFAULT_PATHSPEC: &str = ".";
pub const WORK_TREE_TOKEN: &str = "true";

// Phrasings git uses when a commit has nothing to record
pub const NOTHING_TO_COMMIT_MARKERS: &[&str] = &["nothing to commit", "nothing added to commit"];

// Environment variables
pub const TIMEOUT_ENV_VAR: &str = "GITBATCH_TIMEOUT";
pub const GIT_PROGRAM_ENV_VAR: &str = "GITBATCH_GIT";

// Config file location: <config_dir>/gitbatch/config.toml
pub const CONFIG_DIR_NAME: &str = "gitbatch";
pub const CONFIG_FILE_NAME: &str = "config.toml";

// UI Constants
pub const SCANNING_MESSAGE: &str = "🔍 Scanning for git repositories...";
pub const ABORTED_MESSAGE: &str = "aborted";
pub const PUSH_FORCE_WARNING: &str = "⚠️  --force is set: remote history may be overwritten.";

// Display formatting constants
pub const PATH_DISPLAY_WIDTH: usize = 40;
pub const ERROR_MESSAGE_MAX_LENGTH: usize = 60;
pub const ERROR_MESSAGE_TRUNCATE_LENGTH: usize = 57;

/// How the batch timeout is applied across repositories
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeadlineScope {
    /// One deadline for the whole batch; a slow repository can starve later ones
    #[default]
    Batch,
    /// A fresh deadline for every repository
    PerRepository,
}

/// Explicit configuration threaded into every batch invocation
#[derive(Clone, Debug)]
pub struct BatchConfig {
    pub timeout: Duration,
    pub deadline_scope: DeadlineScope,
    pub git_program: String,
    /// Directory relative patterns are expanded against
    pub working_dir: PathBuf,
}

impl BatchConfig {
    /// Built-in defaults rooted at `working_dir`
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            deadline_scope: DeadlineScope::Batch,
            git_program: DEFAULT_GIT_PROGRAM.to_string(),
            working_dir: working_dir.into(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_deadline_scope(mut self, scope: DeadlineScope) -> Self {
        self.deadline_scope = scope;
        self
    }

    pub fn with_git_program(mut self, program: impl Into<String>) -> Self {
        self.git_program = program.into();
        self
    }

    /// Loads the effective configuration for this process
    ///
    /// Priority order:
    /// 1. CLI flags (`--timeout`, `--per-repo-timeout`)
    /// 2. GITBATCH_TIMEOUT / GITBATCH_GIT env vars
    /// 3. Config file (`--config` or the default location)
    /// 4. Built-in defaults
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let working_dir =
            std::env::current_dir().context("failed to determine the current directory")?;

        let file = match &overrides.config_path {
            // An explicitly requested file must exist
            Some(path) => FileConfig::read(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => FileConfig::read(&path)?,
                _ => FileConfig::default(),
            },
        };

        let env = EnvSettings {
            timeout: std::env::var(TIMEOUT_ENV_VAR).ok(),
            git_program: std::env::var(GIT_PROGRAM_ENV_VAR).ok(),
        };

        Self::resolve(working_dir, &file, &env, overrides)
    }

    /// Merges the configuration sources without touching the process environment
    pub fn resolve(
        working_dir: PathBuf,
        file: &FileConfig,
        env: &EnvSettings,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let mut config = Self::new(working_dir);

        if let Some(secs) = file.timeout_secs {
            config.timeout = validated_timeout(secs, "config file timeout_secs")?;
        }
        if let Some(program) = file.git_program.as_deref().filter(|p| !p.trim().is_empty()) {
            config.git_program = program.to_string();
        }
        if file.per_repository_timeout == Some(true) {
            config.deadline_scope = DeadlineScope::PerRepository;
        }

        if let Some(raw) = &env.timeout {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(
                    value = %raw,
                    "ignoring {TIMEOUT_ENV_VAR}: expected a positive number of seconds"
                ),
            }
        }
        if let Some(program) = env.git_program.as_deref().filter(|p| !p.trim().is_empty()) {
            config.git_program = program.to_string();
        }

        if let Some(secs) = overrides.timeout_secs {
            config.timeout = validated_timeout(secs, "--timeout")?;
        }
        if overrides.per_repository_timeout {
            config.deadline_scope = DeadlineScope::PerRepository;
        }

        Ok(config)
    }
}

/// Values supplied on the command line
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub timeout_secs: Option<u64>,
    pub per_repository_timeout: bool,
    pub config_path: Option<PathBuf>,
}

/// Raw environment values, captured once so resolution stays pure
#[derive(Clone, Debug, Default)]
pub struct EnvSettings {
    pub timeout: Option<String>,
    pub git_program: Option<String>,
}

/// On-disk configuration (`config.toml`)
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub timeout_secs: Option<u64>,
    pub git_program: Option<String>,
    pub per_repository_timeout: Option<bool>,
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid gitbatch configuration")
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }
}

/// Default config file location, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn validated_timeout(secs: u64, source: &str) -> Result<Duration> {
    if secs == 0 {
        bail!("{source} must be at least one second");
    }
    Ok(Duration::from_secs(secs))
}
