//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Pattern expansion and repository discovery
//! - Batch execution and confirmation
//! - Statistics tracking
//! - Configuration
//!
//! Internal implementation details are not exposed through this API.

// Errors
pub use super::error::BatchError;

// Configuration
pub use super::config::{
    default_config_path, BatchConfig, ConfigOverrides, DeadlineScope, EnvSettings, FileConfig,
    DEFAULT_TIMEOUT_SECS,
};

// Discovery
pub use super::discovery::{collect_repositories, resolve_candidate, RepositorySet};
pub use super::pattern::expand_pattern;

// Execution
pub use super::confirm::{confirm_push, is_approval};
pub use super::runner::{execute_batch, run_operation, BatchRequest, BatchResult};
pub use super::stats::BatchStatistics;

// Terminal utilities (re-exported from utils)
pub use crate::utils::{set_terminal_title, set_terminal_title_and_flush};
