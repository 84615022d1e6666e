//! Terminal title handling

use std::io::{self, IsTerminal, Write};

/// Sets the terminal title; does nothing when stdout is not a terminal
pub fn set_terminal_title(title: &str) {
    let mut stdout = io::stdout();
    if !stdout.is_terminal() {
        return;
    }
    if let Err(e) = write_title(&mut stdout, title) {
        tracing::debug!(error = %e, "failed to set terminal title");
    }
}

/// Sets the terminal title and flushes stdout so it takes effect immediately
pub fn set_terminal_title_and_flush(title: &str) {
    set_terminal_title(title);
    if let Err(e) = io::stdout().flush() {
        tracing::debug!(error = %e, "failed to flush terminal title");
    }
}

// OSC 0: set icon name and window title
fn write_title<W: Write + ?Sized>(out: &mut W, title: &str) -> io::Result<()> {
    write!(out, "\x1b]0;{title}\x07")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_title_escape_sequence() {
        let mut out = Vec::new();
        write_title(&mut out, "gitbatch push").unwrap();
        assert_eq!(out, b"\x1b]0;gitbatch push\x07");
    }

    #[test]
    fn test_title_write_failure_is_returned() {
        let err = write_title(&mut ClosedPipe, "gitbatch").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
