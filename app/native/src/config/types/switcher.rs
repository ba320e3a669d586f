//! Switcher configuration types.
//!
//! Keys are written as strings: a single character (`"a"`) or a key name
//! (`"tab"`, `"enter"`, `"escape"`, `"backspace"`, `"f1"`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::modules::switcher::keys::{Key, Modifier, NamedKey};

/// Default alphabet for per-window shortcut keys, in assignment order.
pub const DEFAULT_ASSIGNMENT_KEYS: &str = "asdfghjklqwertyuiopzxcvbnm1234567890";

/// Keyboard-driven window switcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SwitcherConfig {
    /// Whether the switcher listens for its activation gesture.
    /// Default: true
    pub enabled: bool,

    /// Modifier whose short tap enters switching mode.
    /// Default: "alt"
    pub activation_modifier: Modifier,

    /// Longest hold, in milliseconds, still counted as a tap.
    /// Default: 200
    pub tap_threshold_ms: u64,

    /// Inactivity timeout of switching mode, in milliseconds.
    /// Default: 3000
    pub timeout_ms: u64,

    /// Key that enters split-select mode.
    /// Default: "tab"
    #[schemars(with = "String")]
    pub split_key: Key,

    /// Key that enters close mode.
    /// Default: "backspace"
    #[schemars(with = "String")]
    pub close_key: Key,

    /// Key that executes the split selection.
    /// Default: "enter"
    #[schemars(with = "String")]
    pub confirm_key: Key,

    /// Key that leaves a submode, or switching mode altogether.
    /// Default: "escape"
    #[schemars(with = "String")]
    pub cancel_key: Key,

    /// Characters handed out as per-window shortcuts, in order.
    pub assignment_keys: String,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            activation_modifier: Modifier::Alt,
            tap_threshold_ms: 200,
            timeout_ms: 3000,
            split_key: Key::Named(NamedKey::Tab),
            close_key: Key::Named(NamedKey::Backspace),
            confirm_key: Key::Named(NamedKey::Enter),
            cancel_key: Key::Named(NamedKey::Escape),
            assignment_keys: DEFAULT_ASSIGNMENT_KEYS.to_string(),
        }
    }
}

impl SwitcherConfig {
    /// Keys with a fixed meaning in switching mode.
    #[must_use]
    pub const fn reserved_keys(&self) -> [Key; 4] {
        [self.split_key, self.close_key, self.confirm_key, self.cancel_key]
    }
}
