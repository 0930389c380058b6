//! Command implementations for dot0n.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the small set of output helpers they share.

mod conformance;
mod create;
mod init;
mod list;
mod resolve;
mod validate;

#[cfg(test)]
mod tests;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Validate(args) => validate::cmd_validate(args),
        Command::Test(args) => conformance::cmd_test(args),
        Command::Init => init::cmd_init(),
        Command::Create(args) => create::cmd_create(args),
        Command::List(args) => list::cmd_list(args),
        Command::Resolve(args) => resolve::cmd_resolve(args),
    }
}

// ============================================================================
// Output helpers
// ============================================================================

/// Status marker printed in front of a line of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker {
    Info,
    Success,
    Error,
    Warn,
}

impl Marker {
    fn symbol(self) -> char {
        match self {
            Marker::Info => 'i',
            Marker::Success => '+',
            Marker::Error => 'x',
            Marker::Warn => '!',
        }
    }
}

/// Format a marked status line, e.g. `+ flows/invoice.0n`.
pub(crate) fn marked(marker: Marker, message: impl std::fmt::Display) -> String {
    format!("{} {}", marker.symbol(), message)
}

/// Format an indented detail line under a file entry.
pub(crate) fn detail(message: impl std::fmt::Display) -> String {
    format!("   | {}", message)
}
