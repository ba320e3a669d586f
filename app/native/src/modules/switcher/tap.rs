//! Modifier tap detection.
//!
//! A tap is a press and release of the activation modifier, on its own,
//! within the threshold. Holding it longer or pressing any other key while it
//! is down makes the gesture an ordinary chord.

use std::time::{Duration, Instant};

use super::keys::{Key, KeyEvent, KeyState, Modifier};

/// Detects taps of a single modifier.
#[derive(Debug)]
pub struct TapDetector {
    modifier: Modifier,
    threshold: Duration,
    pressed_at: Option<Instant>,
    interrupted: bool,
}

impl TapDetector {
    /// Creates a detector for `modifier` with the given tap threshold.
    #[must_use]
    pub const fn new(modifier: Modifier, threshold: Duration) -> Self {
        Self {
            modifier,
            threshold,
            pressed_at: None,
            interrupted: false,
        }
    }

    /// Feeds a key event. Returns `true` when it completes a tap.
    pub fn on_event(&mut self, event: &KeyEvent) -> bool {
        if event.key == Key::Modifier(self.modifier) {
            return match event.state {
                KeyState::Pressed => {
                    // Auto-repeat keeps the original press time
                    if self.pressed_at.is_none() {
                        self.pressed_at = Some(event.at);
                        self.interrupted = false;
                    }
                    false
                }
                KeyState::Released => {
                    let Some(pressed_at) = self.pressed_at.take() else {
                        return false;
                    };
                    let held = event.at.saturating_duration_since(pressed_at);
                    !self.interrupted && held <= self.threshold
                }
            };
        }

        if event.is_press() && self.pressed_at.is_some() {
            self.interrupted = true;
        }
        false
    }

    /// Forgets any press in progress.
    pub fn reset(&mut self) {
        self.pressed_at = None;
        self.interrupted = false;
    }
}
