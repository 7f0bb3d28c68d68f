//! Diagnostic reporting
//!
//! The one sink every component talks to: informational messages, verbose
//! diagnostics, and the fatal path that emits and terminates the process.

use std::error::Error as _;

use colored::Colorize;
use tracing::debug;

use crate::error::FatalError;

/// Print an informational message.
pub fn info(message: &str) {
    eprintln!("{} {}", "info".cyan(), message);
}

/// Print a success message.
pub fn success(message: &str) {
    eprintln!("{} {}", "success".green(), message);
}

/// Emit a verbose diagnostic. Visible with `--verbose` (or a matching
/// `RUST_LOG` filter).
pub fn verbose(message: &str) {
    debug!("{message}");
}

/// Emit a fatal error with its cause chain and terminate with a non-zero
/// status. This is the only failure exit in the binary.
pub fn panic(err: &FatalError) -> ! {
    eprintln!("\n{} {}", "error".red().bold(), err);

    let mut cause = err.source();
    while let Some(inner) = cause {
        eprintln!("  {} {}", "caused by:".dimmed(), inner);
        cause = inner.source();
    }

    std::process::exit(1);
}
