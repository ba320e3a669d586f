//! Keyboard vocabulary for the switcher.
//!
//! Keys arrive from the platform's global event tap already translated into
//! this small, layout-independent vocabulary. Keys can also be written as
//! strings (`"tab"`, `"f5"`, `"a"`) so they can appear in the configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A modifier key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// Control key.
    Control,
    /// Alt / Option key.
    #[default]
    Alt,
    /// Shift key.
    Shift,
    /// Super / Command / Windows key.
    Super,
}

/// Modifier state held while another key is pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub control: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        control: false,
        alt: false,
        shift: false,
        super_key: false,
    };

    /// Returns a copy with `modifier` held.
    #[must_use]
    pub const fn with(mut self, modifier: Modifier) -> Self {
        match modifier {
            Modifier::Control => self.control = true,
            Modifier::Alt => self.alt = true,
            Modifier::Shift => self.shift = true,
            Modifier::Super => self.super_key = true,
        }
        self
    }

    /// Returns `true` if a chording modifier (anything but shift) is held.
    #[must_use]
    pub const fn has_chord(&self) -> bool { self.control || self.alt || self.super_key }
}

/// Keys with a name rather than a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Escape,
    Tab,
    Space,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// `F1`..`F24`.
    Function(u8),
}

impl NamedKey {
    const NAMES: [(&'static str, Self); 14] = [
        ("enter", Self::Enter),
        ("escape", Self::Escape),
        ("tab", Self::Tab),
        ("space", Self::Space),
        ("backspace", Self::Backspace),
        ("delete", Self::Delete),
        ("up", Self::Up),
        ("down", Self::Down),
        ("left", Self::Left),
        ("right", Self::Right),
        ("home", Self::Home),
        ("end", Self::End),
        ("pageup", Self::PageUp),
        ("pagedown", Self::PageDown),
    ];
}

/// A single key on the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    /// A printable character, always stored lowercase.
    Char(char),
    /// A named, non-printable key.
    Named(NamedKey),
    /// A modifier pressed on its own.
    Modifier(Modifier),
    /// Anything the platform could not translate.
    Other(u32),
}

impl Key {
    /// Creates a character key, normalizing case.
    #[must_use]
    pub fn char(c: char) -> Self { Self::Char(c.to_ascii_lowercase()) }

    /// Returns `true` for arrows and paging keys.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::Named(
                NamedKey::Up
                    | NamedKey::Down
                    | NamedKey::Left
                    | NamedKey::Right
                    | NamedKey::Home
                    | NamedKey::End
                    | NamedKey::PageUp
                    | NamedKey::PageDown
            )
        )
    }

    /// Returns `true` for `F1`..`F24`.
    #[must_use]
    pub const fn is_function(&self) -> bool { matches!(self, Self::Named(NamedKey::Function(_))) }

    /// Returns `true` if this key is a modifier.
    #[must_use]
    pub const fn is_modifier(&self) -> bool { matches!(self, Self::Modifier(_)) }
}

/// Error returned when a key name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key '{0}'")]
pub struct ParseKeyError(pub String);

impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::char(c));
        }

        let lower = trimmed.to_lowercase();
        let normalized = match lower.as_str() {
            "return" => "enter",
            "esc" => "escape",
            "del" => "delete",
            other => other,
        };

        if let Some((_, named)) = NamedKey::NAMES.iter().find(|(name, _)| *name == normalized) {
            return Ok(Self::Named(*named));
        }

        let function = normalized
            .strip_prefix('f')
            .and_then(|number| number.parse::<u8>().ok())
            .filter(|n| (1..=24).contains(n));
        if let Some(n) = function {
            return Ok(Self::Named(NamedKey::Function(n)));
        }

        match normalized {
            "ctrl" | "control" => Ok(Self::Modifier(Modifier::Control)),
            "alt" | "option" => Ok(Self::Modifier(Modifier::Alt)),
            "shift" => Ok(Self::Modifier(Modifier::Shift)),
            "super" | "cmd" | "command" | "meta" => Ok(Self::Modifier(Modifier::Super)),
            _ => Err(ParseKeyError(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Named(NamedKey::Function(n)) => write!(f, "f{n}"),
            Self::Named(named) => {
                let name = NamedKey::NAMES
                    .iter()
                    .find(|(_, key)| key == named)
                    .map_or("unknown", |(name, _)| name);
                write!(f, "{name}")
            }
            Self::Modifier(Modifier::Control) => write!(f, "ctrl"),
            Self::Modifier(Modifier::Alt) => write!(f, "alt"),
            Self::Modifier(Modifier::Shift) => write!(f, "shift"),
            Self::Modifier(Modifier::Super) => write!(f, "super"),
            Self::Other(code) => write!(f, "key{code}"),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = ParseKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<Key> for String {
    fn from(key: Key) -> Self { key.to_string() }
}

/// Whether a key went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A keystroke observed by the global event tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
    pub modifiers: Modifiers,
    pub at: Instant,
}

impl KeyEvent {
    /// A key press with no modifiers held.
    #[must_use]
    pub const fn press(key: Key, at: Instant) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::NONE,
            at,
        }
    }

    /// A key release with no modifiers held.
    #[must_use]
    pub const fn release(key: Key, at: Instant) -> Self {
        Self {
            key,
            state: KeyState::Released,
            modifiers: Modifiers::NONE,
            at,
        }
    }

    /// Returns a copy carrying the given modifier state.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns `true` for a press.
    #[must_use]
    pub fn is_press(&self) -> bool { self.state == KeyState::Pressed }
}

/// What the event tap should do with a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Deliver the keystroke to the focused application.
    PassThrough,
    /// Swallow the keystroke.
    Consume,
}
