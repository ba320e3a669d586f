//! Command-line interface for Switchbar.
//!
//! The CLI works offline: it inspects and scaffolds the configuration and
//! previews the frames the tiling engine would compute for a given screen.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;

use crate::error::SwitchbarError;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), SwitchbarError> {
    let cli = Cli::parse();
    cli.execute()
}
