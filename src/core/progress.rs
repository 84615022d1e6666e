//! Discovery spinner

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner} {wide_msg}";
const SPINNER_TICK_MS: u64 = 100;

/// Creates a spinner on stderr for repository discovery
///
/// indicatif hides the spinner when stderr is not a terminal, so piped output
/// stays clean.
pub(crate) fn create_discovery_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    spinner
}
