//! Diagnostic logging setup

use tracing_subscriber::{fmt, EnvFilter};

const VERBOSE_FILTER: &str = "gitbatch=debug,warn";
const DEFAULT_FILTER: &str = "warn";

/// Installs the global tracing subscriber, writing to stderr
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` enables this crate's
/// debug events. Calling this twice keeps the first subscriber.
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            VERBOSE_FILTER.into()
        } else {
            DEFAULT_FILTER.into()
        }
    });

    let result = fmt()
        .with_env_filter(env_filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(e) = result {
        eprintln!("Note: logging already initialized ({e})");
    }
}
