//! gitbatch: run git subcommands across many repositories at once
//! Repositories are selected with glob patterns and processed one at a time.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gitbatch::commands::staging::{
    handle_add_command, handle_commit_command, handle_diff_command, handle_status_command,
};
use gitbatch::commands::sync::{handle_pull_command, handle_push_command};
use gitbatch::core::{BatchConfig, ConfigOverrides};
use gitbatch::utils::logging;

#[derive(Parser)]
#[command(name = "gitbatch")]
#[command(about = "Run git commands across repositories matched by glob patterns")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Time budget in seconds for the whole batch (default 120)
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Apply the timeout to each repository instead of the whole batch
    #[arg(long = "per-repo-timeout", global = true)]
    per_repo_timeout: bool,

    /// Read settings from this TOML file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the working tree status of each repository
    Status {
        #[arg(required = true, value_name = "PATTERN")]
        patterns: Vec<String>,
    },
    /// Show unstaged changes in each repository
    Diff {
        #[arg(required = true, value_name = "PATTERN")]
        patterns: Vec<String>,
    },
    /// Pull from upstream in each repository
    Pull {
        #[arg(required = true, value_name = "PATTERN")]
        patterns: Vec<String>,
    },
    /// Stage changes in each repository
    #[command(visible_alias = "stage")]
    Add {
        /// Pathspec passed to git add (defaults to ".")
        #[arg(short, long)]
        pathspec: Option<String>,

        #[arg(required = true, value_name = "PATTERN")]
        patterns: Vec<String>,
    },
    /// Commit staged changes in each repository
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,

        #[arg(required = true, value_name = "PATTERN")]
        patterns: Vec<String>,
    },
    /// Push to upstream in each repository
    Push {
        /// Force push (overwrites remote history)
        #[arg(short, long)]
        force: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        #[arg(required = true, value_name = "PATTERN")]
        patterns: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = BatchConfig::load(&ConfigOverrides {
        timeout_secs: cli.timeout,
        per_repository_timeout: cli.per_repo_timeout,
        config_path: cli.config,
    })?;
    tracing::debug!(?config, "effective configuration");

    match cli.command {
        Commands::Status { patterns } => handle_status_command(patterns, &config).await,
        Commands::Diff { patterns } => handle_diff_command(patterns, &config).await,
        Commands::Pull { patterns } => handle_pull_command(patterns, &config).await,
        Commands::Add { pathspec, patterns } => {
            handle_add_command(patterns, pathspec, &config).await
        }
        Commands::Commit { message, patterns } => {
            handle_commit_command(patterns, message, &config).await
        }
        Commands::Push {
            force,
            yes,
            patterns,
        } => handle_push_command(patterns, force, yes, &config).await,
    }
}
