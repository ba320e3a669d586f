//! Per-window shortcut key assignment.

use super::keys::Key;
use crate::config::SwitcherConfig;
use crate::modules::tiling::state::{WindowDescriptor, WindowHandle};

/// Hands out one shortcut character per window.
pub trait KeyAssigner: Send {
    /// Assigns keys to `windows`, in order. Windows beyond the available keys
    /// get none.
    fn assign(&self, windows: &[WindowDescriptor]) -> Vec<(char, WindowHandle)>;
}

/// Assigns keys from a fixed alphabet, skipping keys the switcher reserves.
#[derive(Debug, Clone)]
pub struct DefaultKeyAssigner {
    alphabet: Vec<char>,
}

impl DefaultKeyAssigner {
    /// Builds the alphabet from the switcher configuration.
    #[must_use]
    pub fn from_config(config: &SwitcherConfig) -> Self {
        let reserved = config.reserved_keys();
        let mut alphabet: Vec<char> = Vec::new();
        for c in config.assignment_keys.chars().map(|c| c.to_ascii_lowercase()) {
            if c.is_whitespace() || alphabet.contains(&c) || reserved.contains(&Key::char(c)) {
                continue;
            }
            alphabet.push(c);
        }
        Self { alphabet }
    }

    /// The usable characters, in assignment order.
    #[must_use]
    pub fn alphabet(&self) -> &[char] { &self.alphabet }
}

impl KeyAssigner for DefaultKeyAssigner {
    fn assign(&self, windows: &[WindowDescriptor]) -> Vec<(char, WindowHandle)> {
        self.alphabet
            .iter()
            .zip(windows)
            .map(|(c, window)| (*c, window.handle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::tiling::state::Rect;

    fn windows(count: u64) -> Vec<WindowDescriptor> {
        (1..=count)
            .map(|i| {
                WindowDescriptor::new(
                    WindowHandle::from_raw(i),
                    "App",
                    format!("w{i}"),
                    Rect::new(0.0, 0.0, 100.0, 100.0),
                )
            })
            .collect()
    }

    #[test]
    fn test_assigns_in_alphabet_order() {
        let assigner = DefaultKeyAssigner::from_config(&SwitcherConfig::default());
        let assigned = assigner.assign(&windows(3));
        assert_eq!(assigned, vec![
            ('a', WindowHandle::from_raw(1)),
            ('s', WindowHandle::from_raw(2)),
            ('d', WindowHandle::from_raw(3)),
        ]);
    }

    #[test]
    fn test_skips_reserved_and_duplicate_keys() {
        let config = SwitcherConfig {
            assignment_keys: "aAqq b".to_string(),
            split_key: Key::char('q'),
            ..SwitcherConfig::default()
        };
        let assigner = DefaultKeyAssigner::from_config(&config);
        assert_eq!(assigner.alphabet(), &['a', 'b']);
    }

    #[test]
    fn test_more_windows_than_keys() {
        let config = SwitcherConfig {
            assignment_keys: "ab".to_string(),
            ..SwitcherConfig::default()
        };
        let assigner = DefaultKeyAssigner::from_config(&config);
        assert_eq!(assigner.assign(&windows(5)).len(), 2);
    }
}
