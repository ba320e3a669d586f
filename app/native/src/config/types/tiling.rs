//! Tiling configuration types.
//!
//! Settings for automatic fullscreen tiling, split geometry, taskbar-overlap
//! avoidance and the split rebalancer.

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::modules::tiling::constants::{layout, timing, window_size};

/// Edge of the screen the taskbar is docked to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TaskbarPosition {
    /// Band along the top edge.
    Top,
    /// Band along the bottom edge.
    #[default]
    Bottom,
}

impl FromStr for TaskbarPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(format!("Invalid taskbar position '{other}'. Use 'top' or 'bottom'")),
        }
    }
}

/// Reserved taskbar band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskbarConfig {
    /// Edge the band is docked to.
    /// Default: "bottom"
    pub position: TaskbarPosition,

    /// Height of the band in pixels.
    /// Default: 48
    pub height: f64,
}

impl Default for TaskbarConfig {
    fn default() -> Self {
        Self {
            position: TaskbarPosition::Bottom,
            height: layout::DEFAULT_TASKBAR_HEIGHT_PX,
        }
    }
}

/// Smallest window that is tiled automatically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MinWindowSize {
    /// Minimum width in pixels.
    pub width: f64,
    /// Minimum height in pixels.
    pub height: f64,
}

impl Default for MinWindowSize {
    fn default() -> Self {
        Self {
            width: window_size::MIN_TILEABLE_WIDTH,
            height: window_size::MIN_TILEABLE_HEIGHT,
        }
    }
}

/// Tiling engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TilingConfig {
    /// Whether the tiling engine reacts to window events at all.
    /// Default: true
    pub enabled: bool,

    /// Whether new windows are tiled to fullscreen automatically.
    /// Default: true
    pub auto_fullscreen: bool,

    /// Padding between windows and around the screen edges, in pixels.
    /// Default: 8
    pub padding: f64,

    /// Reserved taskbar band.
    pub taskbar: TaskbarConfig,

    /// Windows smaller than this are never tiled.
    pub min_window_size: MinWindowSize,

    /// Name of this process, whose own windows are always skipped.
    /// Default: "switchbar"
    pub own_process_name: String,

    /// Owner names that are never tiled (shell chrome, overlays).
    pub skip_owners: Vec<String>,

    /// Owners whose screen-sized windows are skipped (desktop windows of a
    /// file manager, for example). Their regular windows are still tiled.
    pub oversized_skip_owners: Vec<String>,

    /// Regular expressions matched against window titles; matches are skipped.
    pub skip_titles: Vec<String>,

    /// Per-axis tolerance when verifying a window reached its target size.
    /// Default: 10
    pub verify_tolerance: f64,

    /// How long a recorded size restriction is kept, in seconds.
    /// Default: 3600
    pub restriction_retention_secs: u64,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_fullscreen: true,
            padding: layout::DEFAULT_PADDING_PX,
            taskbar: TaskbarConfig::default(),
            min_window_size: MinWindowSize::default(),
            own_process_name: "switchbar".to_string(),
            skip_owners: [
                "Dock",
                "SystemUIServer",
                "Control Center",
                "Notification Center",
                "Window Server",
                "Spotlight",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            oversized_skip_owners: vec!["Finder".to_string()],
            skip_titles: Vec::new(),
            verify_tolerance: layout::VERIFY_TOLERANCE_PX,
            restriction_retention_secs: timing::RESTRICTION_RETENTION_SECS,
        }
    }
}

/// Split rebalancer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RebalanceConfig {
    /// Whether the periodic rebalance pass runs.
    /// Default: true
    pub enabled: bool,

    /// Period of the rebalance pass in milliseconds.
    /// Default: 2000
    pub interval_ms: u64,

    /// Minimum size change, in pixels, treated as a user resize.
    /// Default: 2
    pub tolerance: f64,

    /// How long a window adjusted by the rebalancer is left alone, in milliseconds.
    /// Default: 2200
    pub cooldown_ms: u64,
}

impl Default for RebalanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: timing::REBALANCE_INTERVAL_MS,
            tolerance: layout::REBALANCE_TOLERANCE_PX,
            cooldown_ms: timing::REBALANCE_COOLDOWN_MS,
        }
    }
}
