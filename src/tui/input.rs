// Key debouncing for action keys
//
// Many terminals never send release events, so a held or bounced Enter
// arrives as a burst of presses. Action keys fire once, then again only
// after ACTION_DEBOUNCE has passed. Editing keys repeat at a fixed rate.
// Plain characters never pass through here; typing must not be throttled.

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Minimum spacing between two triggers of the same action key
pub const ACTION_DEBOUNCE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBehavior {
    /// Fires once per press, debounced
    Action,
    /// Fires on press, then every `interval` while held
    Repeat { interval: Duration },
}

#[derive(Debug, Default)]
struct KeyState {
    pressed: bool,
    last_fired: Option<Instant>,
}

pub struct InputHandler {
    states: HashMap<KeyCode, KeyState>,
    behaviors: HashMap<KeyCode, KeyBehavior>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            behaviors: HashMap::new(),
        }
    }

    pub fn configure(&mut self, keys: &[KeyCode], behavior: KeyBehavior) {
        for key in keys {
            self.behaviors.insert(*key, behavior);
        }
    }

    /// Whether this press should trigger its action
    pub fn press(&mut self, key: KeyCode) -> bool {
        self.press_at(key, Instant::now())
    }

    pub(crate) fn press_at(&mut self, key: KeyCode, now: Instant) -> bool {
        let gap = match self.behaviors.get(&key) {
            Some(KeyBehavior::Repeat { interval }) => *interval,
            _ => ACTION_DEBOUNCE,
        };
        let state = self.states.entry(key).or_default();

        let fire = match (state.pressed, state.last_fired) {
            (true, Some(last)) => now.saturating_duration_since(last) >= gap,
            _ => true,
        };
        state.pressed = true;
        if fire {
            state.last_fired = Some(now);
        }
        fire
    }

    pub fn release(&mut self, key: KeyCode) {
        if let Some(state) = self.states.get_mut(&key) {
            *state = KeyState::default();
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        let mut handler = Self::new();
        handler.configure(
            &[
                KeyCode::Enter,
                KeyCode::Esc,
                KeyCode::Tab,
                KeyCode::BackTab,
                KeyCode::F(1),
                KeyCode::F(2),
                KeyCode::F(3),
                KeyCode::F(4),
                KeyCode::F(5),
            ],
            KeyBehavior::Action,
        );
        handler.configure(
            &[
                KeyCode::Up,
                KeyCode::Down,
                KeyCode::PageUp,
                KeyCode::PageDown,
            ],
            KeyBehavior::Repeat {
                interval: Duration::from_millis(40),
            },
        );
        handler
    }
}
