//! Configuration template generation.
//!
//! Generates a commented configuration template with all available options.

use std::fs;
use std::path::Path;

/// Generates a configuration template with all options commented out.
#[must_use]
pub fn generate_config_template() -> String {
    r##"// Switchbar Configuration File
// ============================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.

{
  // ============================================================================
  // Tiling
  // ============================================================================
  // "tiling": {
  //   // Enable or disable the tiling engine
  //   "enabled": true,
  //
  //   // Tile new windows to fullscreen automatically
  //   "autoFullscreen": true,
  //
  //   // Padding between windows and around the screen edges, in pixels
  //   "padding": 8,
  //
  //   // Reserved taskbar band: "top" or "bottom"
  //   "taskbar": { "position": "bottom", "height": 48 },
  //
  //   // Windows smaller than this are never tiled
  //   "minWindowSize": { "width": 200, "height": 100 },
  //
  //   // Owners that are never tiled
  //   "skipOwners": ["Dock", "SystemUIServer", "Control Center"],
  //
  //   // Owners whose screen-sized windows are skipped
  //   "oversizedSkipOwners": ["Finder"],
  //
  //   // Regular expressions matched against window titles
  //   "skipTitles": [],
  //
  //   // Per-axis tolerance when verifying a window reached its target size
  //   "verifyTolerance": 10,
  //
  //   // How long a detected size restriction is remembered, in seconds
  //   "restrictionRetentionSecs": 3600
  // },

  // ============================================================================
  // Split Rebalancing
  // ============================================================================
  // "rebalance": {
  //   "enabled": true,
  //
  //   // Period of the rebalance pass in milliseconds
  //   "intervalMs": 2000,
  //
  //   // Minimum size change, in pixels, treated as a user resize
  //   "tolerance": 2,
  //
  //   // How long an adjusted window is left alone, in milliseconds
  //   "cooldownMs": 2200
  // },

  // ============================================================================
  // Window Switcher
  // ============================================================================
  // "switcher": {
  //   "enabled": true,
  //
  //   // Tap this modifier (hold no longer than tapThresholdMs) to start switching
  //   "activationModifier": "alt",
  //   "tapThresholdMs": 200,
  //
  //   // Leave switching mode after this much inactivity
  //   "timeoutMs": 3000,
  //
  //   // Keys with a fixed meaning while switching
  //   "splitKey": "tab",
  //   "closeKey": "backspace",
  //   "confirmKey": "enter",
  //   "cancelKey": "escape",
  //
  //   // Characters handed out as per-window shortcuts, in order
  //   "assignmentKeys": "asdfghjklqwertyuiopzxcvbnm1234567890"
  // }
}
"##
    .to_string()
}

/// Writes the configuration template to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directories or the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}
