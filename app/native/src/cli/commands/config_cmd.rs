//! Config CLI commands.
//!
//! Commands for managing the Switchbar configuration file.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::Colorize;

use crate::cli::output;
use crate::config::template::{create_config_file, generate_config_template};
use crate::config::{self, SwitchbarConfig, config_paths};
use crate::error::SwitchbarError;

/// Config management commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Initialize a new configuration file with all options documented.
    ///
    /// Creates a configuration file with every option commented out at its
    /// default value. Uncomment the ones you want to change.
    #[command(
        name = "init",
        after_long_help = r#"Examples:
  switchbar config init              # Create config at default location
  switchbar config init --force      # Overwrite existing config
  switchbar config init --path ~/my-config.jsonc  # Create at custom path
  switchbar config init --stdout     # Print template to stdout"#
    )]
    Init {
        /// Overwrite existing configuration file if it exists.
        #[arg(long, short)]
        force: bool,

        /// Custom path for the configuration file.
        /// If not specified, uses `--config` or ~/.config/switchbar/config.jsonc
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the configuration template to stdout instead of writing to a file.
        #[arg(long)]
        stdout: bool,
    },

    /// Show the configuration file search paths.
    ///
    /// Lists where Switchbar looks for its configuration file and marks the
    /// one in use, if any.
    Path,

    /// Print the effective configuration as JSON.
    ///
    /// Missing sections and fields are shown with their defaults.
    Show,

    /// Output the configuration JSON Schema.
    ///
    /// Can be redirected to a file and referenced from `$schema` for editor
    /// validation and completion.
    Schema,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cmd: &ConfigCommands, config_path: Option<&Path>) -> Result<(), SwitchbarError> {
    match cmd {
        ConfigCommands::Init { force, path, stdout } => {
            if *stdout {
                println!("{}", generate_config_template());
                return Ok(());
            }
            let target = path.clone().or_else(|| config_path.map(Path::to_path_buf));
            let written = init_config(*force, target)?;
            println!("Configuration file created at: {}", written.display());
            println!("\nAll options are commented out by default.");
            println!("Edit the file and uncomment the options you want to configure.");
            Ok(())
        }
        ConfigCommands::Path => {
            show_config_path(config_path);
            Ok(())
        }
        ConfigCommands::Show => show_config(config_path),
        ConfigCommands::Schema => {
            println!("{}", schema_json()?);
            Ok(())
        }
    }
}

/// Writes the template to `custom_path` or the preferred search location.
///
/// Returns the path that was written.
fn init_config(force: bool, custom_path: Option<PathBuf>) -> Result<PathBuf, SwitchbarError> {
    let config_path = custom_path.unwrap_or_else(|| {
        config_paths().into_iter().next().unwrap_or_else(|| PathBuf::from("config.jsonc"))
    });

    if config_path.exists() && !force {
        return Err(SwitchbarError::ConfigError(format!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        )));
    }

    create_config_file(&config_path).map_err(|e| {
        SwitchbarError::ConfigError(format!(
            "Failed to create config file {}: {e}",
            config_path.display()
        ))
    })?;

    tracing::info!(path = %config_path.display(), "configuration template written");
    Ok(config_path)
}

/// Lists the search paths, marking the file that would be loaded.
fn show_config_path(config_path: Option<&Path>) {
    if let Some(path) = config_path {
        println!("Using configuration from --config:\n");
        println!("  {} {}", path.display(), output::format_marker(true, true));
        return;
    }

    println!("Configuration file search paths (in priority order):\n");

    let mut found_config = false;
    for (i, path) in config_paths().iter().enumerate() {
        let exists = path.exists();
        let active = exists && !found_config;
        found_config |= exists;
        println!("  {}. {} {}", i + 1, path.display(), output::format_marker(active, exists));
    }

    if !found_config {
        println!("\n{}", "No configuration file found.".dimmed());
        println!("Run 'switchbar config init' to create one.");
    }
}

/// Prints the effective configuration.
fn show_config(config_path: Option<&Path>) -> Result<(), SwitchbarError> {
    let config = match config_path {
        Some(path) => config::load_config_from_path(path)?.0,
        None => match config::load_config() {
            Ok((config, _)) => config,
            Err(config::ConfigError::NotFound) => SwitchbarConfig::default(),
            Err(err) => return Err(err.into()),
        },
    };
    output::print_json(&config)?;
    Ok(())
}

/// Renders the JSON Schema of [`SwitchbarConfig`].
fn schema_json() -> Result<String, SwitchbarError> {
    let schema = schemars::schema_for!(SwitchbarConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths_returns_non_empty() {
        let paths = config_paths();
        assert!(!paths.is_empty() || std::env::var("HOME").is_err());
    }

    #[test]
    fn test_init_config_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.jsonc");
        let written = init_config(false, Some(path.clone())).unwrap();
        assert_eq!(written, path);
        let (config, _) = config::load_config_from_path(&path).unwrap();
        assert_eq!(config, SwitchbarConfig::default());
    }

    #[test]
    fn test_init_config_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.jsonc");
        std::fs::write(&path, "{}").unwrap();

        let err = init_config(false, Some(path.clone())).unwrap_err();
        assert!(matches!(err, SwitchbarError::ConfigError(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        init_config(true, Some(path.clone())).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("Switchbar Configuration"));
    }

    #[test]
    fn test_show_config_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ \"tiling\": ").unwrap();
        let err = show_config(Some(&path)).unwrap_err();
        assert!(matches!(err, SwitchbarError::ConfigError(_)));
    }

    #[test]
    fn test_schema_describes_all_sections() {
        let schema = schema_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&schema).unwrap();
        let properties = &value["properties"];
        assert!(properties.get("tiling").is_some());
        assert!(properties.get("rebalance").is_some());
        assert!(properties.get("switcher").is_some());
    }
}
