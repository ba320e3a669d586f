//! Root configuration type and file loading.
//!
//! The configuration file supports JSONC format (JSON with comments).

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::switcher::SwitcherConfig;
use super::tiling::{RebalanceConfig, TilingConfig};

/// Root configuration for Switchbar.
///
/// Every section is optional; missing sections and fields fall back to
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SwitchbarConfig {
    /// JSON Schema reference, ignored at runtime.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Automatic tiling, split layouts and taskbar-overlap avoidance.
    pub tiling: TilingConfig,

    /// Periodic rebalancing of split groups.
    pub rebalance: RebalanceConfig,

    /// Keyboard-driven window switcher.
    pub switcher: SwitcherConfig,
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected at ~/.config/switchbar/config.jsonc \
         or ~/.config/switchbar/config.json"
    )]
    NotFound,
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Directory name used under the configuration roots.
const CONFIG_DIR_NAME: &str = "switchbar";

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/switchbar/` when the variable is set
/// 2. `~/.config/switchbar/`
/// 3. The platform configuration directory (`dirs::config_dir()`)
///
/// Each directory is checked for `config.jsonc` then `config.json`.
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut dirs_to_check = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        dirs_to_check.push(PathBuf::from(xdg_config).join(CONFIG_DIR_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        dirs_to_check.push(home.join(".config").join(CONFIG_DIR_NAME));
    }
    if let Some(config_dir) = dirs::config_dir() {
        dirs_to_check.push(config_dir.join(CONFIG_DIR_NAME));
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for dir in dirs_to_check {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            // XDG_CONFIG_HOME is often ~/.config already
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    paths
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of the expected locations.
/// Returns `ConfigError::IoError` if a configuration file exists but could not be read.
/// Returns `ConfigError::ParseError` if the configuration file contains invalid JSON.
pub fn load_config() -> Result<(SwitchbarConfig, PathBuf), ConfigError> {
    let path = config_paths().into_iter().find(|path| path.exists()).ok_or(ConfigError::NotFound)?;
    load_config_from_path(&path)
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist, or the
/// I/O and parse errors of [`load_config`].
pub fn load_config_from_path(path: &Path) -> Result<(SwitchbarConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }
    let file = fs::File::open(path)?;
    // Strip comments from JSONC before parsing
    let reader = json_comments::StripComments::new(file);
    let config: SwitchbarConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config_has_all_sections_enabled() {
        let config = SwitchbarConfig::default();
        assert!(config.tiling.enabled);
        assert!(config.rebalance.enabled);
        assert!(config.switcher.enabled);
    }

    #[test]
    fn test_config_paths_prefer_jsonc() {
        let paths = config_paths();
        if let Some(first) = paths.first() {
            assert!(first.ends_with("switchbar/config.jsonc"));
        }
    }

    #[test]
    fn test_load_config_from_path_strips_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{
                // Larger padding
                "tiling": {{ "padding": 16 }},
                /* Slower rebalance */
                "rebalance": {{ "intervalMs": 5000 }}
            }}"#
        )
        .unwrap();

        let (config, path) = load_config_from_path(file.path()).unwrap();
        assert_eq!(path, file.path());
        assert_eq!(config.tiling.padding, 16.0);
        assert_eq!(config.rebalance.interval_ms, 5000);
        assert_eq!(config.switcher, SwitcherConfig::default());
    }

    #[test]
    fn test_load_config_from_missing_path() {
        let err = load_config_from_path(Path::new("/nonexistent/switchbar.jsonc")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound));
    }

    #[test]
    fn test_load_config_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load_config_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().contains("Failed to parse"));
    }
}
