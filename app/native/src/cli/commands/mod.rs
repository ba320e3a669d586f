//! CLI command definitions using Clap.
//!
//! - `config_cmd` - Configuration file management
//! - `layout` - Preview of computed window frames

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::error::SwitchbarError;
use crate::utils::path;

pub mod config_cmd;
pub mod layout;

pub use config_cmd::ConfigCommands;
pub use layout::LayoutArgs;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Switchbar CLI - window arrangement core for a desktop taskbar.
#[derive(Parser, Debug)]
#[command(name = "switchbar")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments) and `~` expansion.
    #[arg(long, short, global = true, value_name = "PATH", env = "SWITCHBAR_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Show the frames the tiling engine computes for a screen.
    ///
    /// With `--count 1` (the default) the fullscreen frame is shown; larger
    /// counts show the columns of a split group, left to right. Padding and
    /// the taskbar band default to the loaded configuration.
    #[command(after_long_help = r#"Examples:
  switchbar layout --width 1920 --height 1080
  switchbar layout --width 2560 --height 1440 --count 3
  switchbar layout --width 1920 --height 1080 --count 2 --taskbar-position top --json"#)]
    Layout(LayoutArgs),

    /// Configuration file management commands.
    ///
    /// Initialize, locate, print, and describe the configuration file.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    ///
    /// Usage:
    ///   eval "$(switchbar completions --shell zsh)"
    ///   switchbar completions --shell fish > ~/.config/fish/completions/switchbar.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Returns the custom config path if specified, with `~` expanded.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.as_deref().map(path::expand).filter(|p| !p.as_os_str().is_empty())
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), SwitchbarError> {
        let config_path = self.config_path();
        let must_exist = !matches!(
            self.command,
            Commands::Config(ConfigCommands::Init { .. }) | Commands::Completions { .. }
        );
        if must_exist {
            if let Some(ref path) = config_path {
                if !path.exists() {
                    return Err(SwitchbarError::ConfigError(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
            }
        }

        tracing::debug!(command = ?self.command, "executing command");

        match &self.command {
            Commands::Layout(args) => layout::execute(args, config_path.as_deref()),
            Commands::Config(cmd) => config_cmd::execute(cmd, config_path.as_deref()),
            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "switchbar", &mut io::stdout());
    }
}
