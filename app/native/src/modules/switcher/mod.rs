//! Keyboard-driven window switcher.
//!
//! A short tap of the activation modifier enters switching mode: the visible
//! windows get one shortcut key each and the next keystroke decides what
//! happens.
//!
//! # Modes
//!
//! - `Switching`: a mapped key activates its window
//! - `SplitSelect`: mapped keys build a selection, confirm tiles it as a split
//! - `Close`: a mapped key closes its window
//!
//! The state machine is pure. It returns [`SwitcherAction`]s for the caller
//! to carry out and a [`KeyDisposition`] telling the event tap whether to
//! swallow the keystroke.

pub mod assign;
pub mod keys;
pub mod tap;

use std::time::{Duration, Instant};

pub use assign::{DefaultKeyAssigner, KeyAssigner};
pub use keys::{Key, KeyDisposition, KeyEvent, KeyState, Modifier, Modifiers, NamedKey};
use serde::Serialize;
pub use tap::TapDetector;

use crate::config::SwitcherConfig;
use crate::modules::tiling::state::{WindowDescriptor, WindowHandle};

/// Mode of the switcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SwitcherState {
    #[default]
    Idle,
    Switching,
    SplitSelect,
    Close,
}

impl SwitcherState {
    /// Returns `true` in any switching mode.
    #[must_use]
    pub const fn is_active(self) -> bool { !matches!(self, Self::Idle) }
}

/// Work the switcher asks its owner to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitcherAction {
    /// Raise and focus a window.
    Activate(WindowHandle),
    /// Close a window.
    Close(WindowHandle),
    /// Tile the selection side by side, in order.
    Split(Vec<WindowHandle>),
}

/// Result of feeding one keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    pub disposition: KeyDisposition,
    pub action: Option<SwitcherAction>,
}

impl KeyOutcome {
    const fn pass() -> Self {
        Self {
            disposition: KeyDisposition::PassThrough,
            action: None,
        }
    }

    const fn consume() -> Self {
        Self {
            disposition: KeyDisposition::Consume,
            action: None,
        }
    }

    const fn consume_with(action: SwitcherAction) -> Self {
        Self {
            disposition: KeyDisposition::Consume,
            action: Some(action),
        }
    }
}

/// The switching-mode state machine.
pub struct Switcher {
    config: SwitcherConfig,
    assigner: Box<dyn KeyAssigner>,
    tap: TapDetector,
    state: SwitcherState,
    assignments: Vec<(char, WindowHandle)>,
    selection: Vec<WindowHandle>,
    deadline: Option<Instant>,
}

impl Switcher {
    /// Creates a switcher using the default key assigner.
    #[must_use]
    pub fn new(config: SwitcherConfig) -> Self {
        let assigner = Box::new(DefaultKeyAssigner::from_config(&config));
        Self::with_assigner(config, assigner)
    }

    /// Creates a switcher with a custom key assigner.
    #[must_use]
    pub fn with_assigner(config: SwitcherConfig, assigner: Box<dyn KeyAssigner>) -> Self {
        let tap = TapDetector::new(
            config.activation_modifier,
            Duration::from_millis(config.tap_threshold_ms),
        );
        Self {
            config,
            assigner,
            tap,
            state: SwitcherState::Idle,
            assignments: Vec::new(),
            selection: Vec::new(),
            deadline: None,
        }
    }

    /// Current mode.
    #[must_use]
    pub const fn state(&self) -> SwitcherState { self.state }

    /// Shortcut keys handed out on entry.
    #[must_use]
    pub fn assignments(&self) -> &[(char, WindowHandle)] { &self.assignments }

    /// Windows selected so far in split-select mode.
    #[must_use]
    pub fn selection(&self) -> &[WindowHandle] { &self.selection }

    /// When the inactivity timer fires.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> { self.deadline }

    /// Leaves switching mode if the inactivity timer expired.
    ///
    /// Returns `true` if the timer fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self.state.is_active() && self.deadline.is_some_and(|d| now >= d);
        if expired {
            tracing::debug!(state = ?self.state, "switching mode timed out");
            self.exit();
        }
        expired
    }

    /// Feeds a keystroke.
    ///
    /// `windows` is called once, on entry into switching mode, to snapshot
    /// the windows to assign keys to.
    pub fn on_key<F>(&mut self, event: &KeyEvent, windows: F) -> KeyOutcome
    where
        F: FnOnce() -> Vec<WindowDescriptor>,
    {
        self.tick(event.at);

        if !self.state.is_active() {
            if self.config.enabled && self.tap.on_event(event) {
                self.enter(&windows(), event.at);
            }
            return KeyOutcome::pass();
        }

        // Releases and bare modifiers never change the mode
        if !event.is_press() || event.key.is_modifier() {
            return KeyOutcome::consume();
        }
        if self.is_disallowed(event) {
            tracing::debug!(key = %event.key, "disallowed key, leaving switching mode");
            self.exit();
            return KeyOutcome::consume();
        }

        match self.state {
            SwitcherState::Switching => self.on_switching_key(event),
            SwitcherState::SplitSelect => self.on_split_key(event),
            SwitcherState::Close => self.on_close_key(event),
            SwitcherState::Idle => KeyOutcome::pass(),
        }
    }

    fn on_switching_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        let key = event.key;
        if key == self.config.cancel_key {
            self.exit();
        } else if key == self.config.split_key {
            self.selection.clear();
            self.transition(SwitcherState::SplitSelect, event.at);
        } else if key == self.config.close_key {
            self.transition(SwitcherState::Close, event.at);
        } else if let Some(handle) = self.mapped(key) {
            self.exit();
            return KeyOutcome::consume_with(SwitcherAction::Activate(handle));
        } else {
            self.exit();
        }
        KeyOutcome::consume()
    }

    fn on_split_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        let key = event.key;
        if key == self.config.confirm_key {
            let selection = std::mem::take(&mut self.selection);
            self.exit();
            if selection.is_empty() {
                return KeyOutcome::consume();
            }
            return KeyOutcome::consume_with(SwitcherAction::Split(selection));
        }
        if key == self.config.cancel_key {
            self.selection.clear();
            self.transition(SwitcherState::Switching, event.at);
        } else if let Some(handle) = self.mapped(key) {
            if !self.selection.contains(&handle) {
                self.selection.push(handle);
            }
            self.arm(event.at);
        } else {
            self.exit();
        }
        KeyOutcome::consume()
    }

    fn on_close_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        let key = event.key;
        if key == self.config.cancel_key {
            self.transition(SwitcherState::Switching, event.at);
        } else if let Some(handle) = self.mapped(key) {
            self.exit();
            return KeyOutcome::consume_with(SwitcherAction::Close(handle));
        } else {
            self.exit();
        }
        KeyOutcome::consume()
    }

    fn mapped(&self, key: Key) -> Option<WindowHandle> {
        let Key::Char(c) = key else {
            return None;
        };
        self.assignments.iter().find(|(k, _)| *k == c).map(|(_, h)| *h)
    }

    fn is_disallowed(&self, event: &KeyEvent) -> bool {
        event.modifiers.has_chord() || event.key.is_function() || event.key.is_navigation()
    }

    fn enter(&mut self, windows: &[WindowDescriptor], now: Instant) {
        self.assignments = self.assigner.assign(windows);
        if self.assignments.is_empty() {
            tracing::debug!("no windows to switch to");
            return;
        }
        tracing::debug!(windows = self.assignments.len(), "entering switching mode");
        self.selection.clear();
        self.transition(SwitcherState::Switching, now);
    }

    fn transition(&mut self, state: SwitcherState, now: Instant) {
        tracing::trace!(from = ?self.state, to = ?state, "switcher transition");
        self.state = state;
        self.arm(now);
    }

    fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + Duration::from_millis(self.config.timeout_ms));
    }

    fn exit(&mut self) {
        self.state = SwitcherState::Idle;
        self.deadline = None;
        self.assignments.clear();
        self.selection.clear();
        self.tap.reset();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::tiling::state::Rect;

    const ALT: Key = Key::Modifier(Modifier::Alt);
    const TAB: Key = Key::Named(NamedKey::Tab);
    const ENTER: Key = Key::Named(NamedKey::Enter);
    const ESCAPE: Key = Key::Named(NamedKey::Escape);
    const BACKSPACE: Key = Key::Named(NamedKey::Backspace);

    fn handle(raw: u64) -> WindowHandle { WindowHandle::from_raw(raw) }

    fn windows() -> Vec<WindowDescriptor> {
        ["Mail", "Editor", "Terminal"]
            .iter()
            .enumerate()
            .map(|(i, owner)| {
                WindowDescriptor::new(handle(i as u64 + 1), *owner, *owner, Rect::new(0.0, 0.0, 800.0, 600.0))
            })
            .collect()
    }

    struct Driver {
        switcher: Switcher,
        now: Instant,
    }

    impl Driver {
        fn new() -> Self {
            Self {
                switcher: Switcher::new(SwitcherConfig::default()),
                now: Instant::now(),
            }
        }

        fn wait(&mut self, ms: u64) { self.now += Duration::from_millis(ms); }

        fn press(&mut self, key: Key) -> KeyOutcome {
            let event = KeyEvent::press(key, self.now);
            self.switcher.on_key(&event, windows)
        }

        fn release(&mut self, key: Key) -> KeyOutcome {
            let event = KeyEvent::release(key, self.now);
            self.switcher.on_key(&event, windows)
        }

        fn enter(&mut self) {
            self.press(ALT);
            self.wait(50);
            self.release(ALT);
            assert_eq!(self.switcher.state(), SwitcherState::Switching);
        }
    }

    #[test]
    fn test_tap_enters_switching_and_assigns_keys() {
        let mut d = Driver::new();
        assert_eq!(d.press(ALT).disposition, KeyDisposition::PassThrough);
        d.wait(100);
        assert_eq!(d.release(ALT).disposition, KeyDisposition::PassThrough);

        assert_eq!(d.switcher.state(), SwitcherState::Switching);
        assert_eq!(d.switcher.assignments(), &[('a', handle(1)), ('s', handle(2)), ('d', handle(3))]);
    }

    #[test]
    fn test_idle_keys_pass_through() {
        let mut d = Driver::new();
        let outcome = d.press(Key::char('a'));
        assert_eq!(outcome, KeyOutcome::pass());
        assert_eq!(d.switcher.state(), SwitcherState::Idle);
    }

    #[test]
    fn test_long_hold_does_not_enter() {
        let mut d = Driver::new();
        d.press(ALT);
        d.wait(300);
        d.release(ALT);
        assert_eq!(d.switcher.state(), SwitcherState::Idle);
    }

    #[test]
    fn test_no_windows_stays_idle() {
        let mut switcher = Switcher::new(SwitcherConfig::default());
        let now = Instant::now();
        switcher.on_key(&KeyEvent::press(ALT, now), Vec::new);
        switcher.on_key(&KeyEvent::release(ALT, now), Vec::new);
        assert_eq!(switcher.state(), SwitcherState::Idle);
    }

    #[test]
    fn test_mapped_key_activates_and_exits() {
        let mut d = Driver::new();
        d.enter();
        let outcome = d.press(Key::char('s'));
        assert_eq!(outcome.disposition, KeyDisposition::Consume);
        assert_eq!(outcome.action, Some(SwitcherAction::Activate(handle(2))));
        assert_eq!(d.switcher.state(), SwitcherState::Idle);
        assert!(d.switcher.assignments().is_empty());
    }

    #[test]
    fn test_unmapped_key_exits_without_action() {
        let mut d = Driver::new();
        d.enter();
        let outcome = d.press(Key::char('z'));
        assert_eq!(outcome, KeyOutcome::consume());
        assert_eq!(d.switcher.state(), SwitcherState::Idle);
    }

    #[test]
    fn test_disallowed_keys_exit() {
        for key in [Key::Named(NamedKey::Function(5)), Key::Named(NamedKey::Up)] {
            let mut d = Driver::new();
            d.enter();
            assert_eq!(d.press(key).disposition, KeyDisposition::Consume);
            assert_eq!(d.switcher.state(), SwitcherState::Idle);
        }

        let mut d = Driver::new();
        d.enter();
        let chord = KeyEvent::press(Key::char('a'), d.now).with_modifiers(Modifiers::NONE.with(Modifier::Control));
        let outcome = d.switcher.on_key(&chord, windows);
        assert_eq!(outcome.action, None);
        assert_eq!(d.switcher.state(), SwitcherState::Idle);
    }

    #[test]
    fn test_releases_and_bare_modifiers_are_consumed_without_effect() {
        let mut d = Driver::new();
        d.enter();
        assert_eq!(d.release(Key::char('x')), KeyOutcome::consume());
        assert_eq!(d.press(Key::Modifier(Modifier::Shift)), KeyOutcome::consume());
        assert_eq!(d.switcher.state(), SwitcherState::Switching);
    }

    #[test]
    fn test_timeout_returns_to_idle() {
        let mut d = Driver::new();
        d.enter();
        d.wait(2999);
        assert!(!d.switcher.tick(d.now));
        assert_eq!(d.switcher.state(), SwitcherState::Switching);
        assert!(!d.switcher.assignments().is_empty());
        d.wait(1);
        assert!(d.switcher.tick(d.now));
        assert_eq!(d.switcher.state(), SwitcherState::Idle);
        assert!(d.switcher.assignments().is_empty());
    }

    #[test]
    fn test_keys_rearm_the_timer() {
        let mut d = Driver::new();
        d.enter();
        d.wait(2000);
        d.press(TAB);
        d.wait(2000);
        d.press(Key::char('a'));
        d.wait(2000);
        assert!(!d.switcher.tick(d.now));
        assert_eq!(d.switcher.state(), SwitcherState::SplitSelect);
    }

    #[test]
    fn test_key_after_timeout_passes_through() {
        let mut d = Driver::new();
        d.enter();
        d.wait(3500);
        let outcome = d.press(Key::char('a'));
        assert_eq!(outcome, KeyOutcome::pass());
        assert_eq!(d.switcher.state(), SwitcherState::Idle);
    }

    #[test]
    fn test_split_select_builds_selection_in_order() {
        let mut d = Driver::new();
        d.enter();
        d.press(TAB);
        assert_eq!(d.switcher.state(), SwitcherState::SplitSelect);
        d.press(Key::char('d'));
        d.press(Key::char('a'));
        d.press(Key::char('d'));
        assert_eq!(d.switcher.selection(), &[handle(3), handle(1)]);

        let outcome = d.press(ENTER);
        assert_eq!(outcome.action, Some(SwitcherAction::Split(vec![handle(3), handle(1)])));
        assert_eq!(d.switcher.state(), SwitcherState::Idle);
    }

    #[test]
    fn test_confirm_with_empty_selection_just_exits() {
        let mut d = Driver::new();
        d.enter();
        d.press(TAB);
        let outcome = d.press(ENTER);
        assert_eq!(outcome, KeyOutcome::consume());
        assert_eq!(d.switcher.state(), SwitcherState::Idle);
    }

    #[test]
    fn test_cancel_from_split_select_returns_to_switching() {
        let mut d = Driver::new();
        d.enter();
        d.press(TAB);
        d.press(Key::char('a'));
        d.press(ESCAPE);
        assert_eq!(d.switcher.state(), SwitcherState::Switching);
        assert!(d.switcher.selection().is_empty());

        d.press(ESCAPE);
        assert_eq!(d.switcher.state(), SwitcherState::Idle);
    }

    #[test]
    fn test_close_mode_closes_exactly_one_window() {
        let mut d = Driver::new();
        d.enter();
        d.press(BACKSPACE);
        assert_eq!(d.switcher.state(), SwitcherState::Close);

        let outcome = d.press(Key::char('s'));
        assert_eq!(outcome.action, Some(SwitcherAction::Close(handle(2))));
        assert_eq!(d.switcher.state(), SwitcherState::Idle);

        // A second press is an ordinary keystroke again
        assert_eq!(d.press(Key::char('a')), KeyOutcome::pass());
    }

    #[test]
    fn test_cancel_from_close_returns_to_switching() {
        let mut d = Driver::new();
        d.enter();
        d.press(BACKSPACE);
        d.press(ESCAPE);
        assert_eq!(d.switcher.state(), SwitcherState::Switching);
        assert_eq!(d.press(Key::char('a')).action, Some(SwitcherAction::Activate(handle(1))));
    }

    #[test]
    fn test_disabled_switcher_never_enters() {
        let config = SwitcherConfig {
            enabled: false,
            ..SwitcherConfig::default()
        };
        let mut switcher = Switcher::new(config);
        let now = Instant::now();
        switcher.on_key(&KeyEvent::press(ALT, now), windows);
        switcher.on_key(&KeyEvent::release(ALT, now), windows);
        assert_eq!(switcher.state(), SwitcherState::Idle);
    }
}
