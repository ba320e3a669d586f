//! Configuration types for Switchbar.
//!
//! This module provides all configuration types organized by domain.
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod root;
pub mod switcher;
pub mod tiling;

// Root config types
pub use root::{
    ConfigError, SwitchbarConfig, config_paths, load_config, load_config_from_path,
};
// Switcher types
pub use switcher::{DEFAULT_ASSIGNMENT_KEYS, SwitcherConfig};
// Tiling types
pub use tiling::{MinWindowSize, RebalanceConfig, TaskbarConfig, TaskbarPosition, TilingConfig};
