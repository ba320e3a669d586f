//! Configuration module for Switchbar.
//!
//! This module provides configuration types, loading, and template
//! generation. Configuration is loaded once by the binary and passed into the
//! components that need it; there is no global configuration instance.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod template;
pub mod types;

use std::path::{Path, PathBuf};

pub use types::{
    ConfigError, DEFAULT_ASSIGNMENT_KEYS, MinWindowSize, RebalanceConfig, SwitchbarConfig,
    SwitcherConfig, TaskbarConfig, TaskbarPosition, TilingConfig, config_paths, load_config,
    load_config_from_path,
};

/// Loads the configuration, falling back to defaults.
///
/// `custom_path` (from `--config`) takes precedence over the search paths.
/// Returns the configuration and the path it was read from, if any.
#[must_use]
pub fn load_or_default(custom_path: Option<&Path>) -> (SwitchbarConfig, Option<PathBuf>) {
    let result = custom_path.map_or_else(load_config, load_config_from_path);

    match result {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            (config, Some(path))
        }
        Err(ConfigError::NotFound) => {
            tracing::debug!("no configuration file found, using defaults");
            (SwitchbarConfig::default(), None)
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration, using defaults");
            (SwitchbarConfig::default(), None)
        }
    }
}
