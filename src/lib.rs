//! # gitbatch
//!
//! `gitbatch` runs one git subcommand across every repository matched by a set
//! of glob patterns. It powers the `gitbatch` CLI tool.
//!
//! ## Core Features
//!
//! - **Pattern Discovery**: `**`-aware glob expansion via `globset` and `ignore`,
//!   with git itself deciding what counts as a repository.
//! - **Sequential Execution**: one repository at a time, ordered output, a
//!   failure in one repository never stops the rest.
//! - **Safety Gates**: confirmation before push, a shared deadline, and a
//!   whole-tree pathspec default for add.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitbatch::core::{collect_repositories, BatchConfig};
//! use gitbatch::git::GitCli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = BatchConfig::new(std::env::current_dir()?);
//!     let git = GitCli::from_config(&config);
//!     let repos = collect_repositories(&["projects/**".to_string()], &git, &config).await?;
//!     for repo in &repos {
//!         println!("{}", repo.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod git;
pub mod utils;
