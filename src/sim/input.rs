//! Keyboard intent state
//!
//! Hosts feed raw key codes in; the simulation only ever sees a `TickInput`.

use std::collections::HashMap;

/// Logical player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Fire,
}

/// Maps `KeyboardEvent.code` strings to intents
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<String, Intent>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            map: HashMap::new(),
        };
        bindings.bind("KeyA", Intent::MoveLeft);
        bindings.bind("ArrowLeft", Intent::MoveLeft);
        bindings.bind("KeyD", Intent::MoveRight);
        bindings.bind("ArrowRight", Intent::MoveRight);
        bindings.bind("ShiftLeft", Intent::Fire);
        bindings.bind("ShiftRight", Intent::Fire);
        bindings.bind("Space", Intent::Fire);
        bindings
    }
}

impl KeyBindings {
    pub fn bind(&mut self, code: &str, intent: Intent) {
        self.map.insert(code.to_string(), intent);
    }

    pub fn intent(&self, code: &str) -> Option<Intent> {
        self.map.get(code).copied()
    }

    fn codes_for(&self, intent: Intent) -> impl Iterator<Item = &str> {
        self.map
            .iter()
            .filter(move |(_, i)| **i == intent)
            .map(|(code, _)| code.as_str())
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move-left intent held
    pub left: bool,
    /// Move-right intent held
    pub right: bool,
    /// Fire triggers queued since the previous frame
    pub fire: u32,
}

/// Pressed state per key code plus queued fire triggers
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: KeyBindings,
    pressed: HashMap<String, bool>,
    pending_fire: u32,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pressed: HashMap::new(),
            pending_fire: 0,
        }
    }

    /// Record a key press. Every press of a fire key (auto-repeat included) queues a shot.
    pub fn key_down(&mut self, code: &str) {
        self.pressed.insert(code.to_string(), true);
        if self.bindings.intent(code) == Some(Intent::Fire) {
            self.pending_fire += 1;
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.pressed.insert(code.to_string(), false);
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.get(code).copied().unwrap_or(false)
    }

    /// Whether any key bound to `intent` is held
    pub fn is_held(&self, intent: Intent) -> bool {
        self.bindings
            .codes_for(intent)
            .any(|code| self.is_pressed(code))
    }

    /// Snapshot for the next frame; drains queued fire triggers
    pub fn tick_input(&mut self) -> TickInput {
        let input = TickInput {
            left: self.is_held(Intent::MoveLeft),
            right: self.is_held(Intent::MoveRight),
            fire: self.pending_fire,
        };
        self.pending_fire = 0;
        input
    }

    /// Drop queued shots (fire presses are ignored while the game is over)
    pub fn discard_fire(&mut self) {
        self.pending_fire = 0;
    }

    /// Release everything (restart)
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.pending_fire = 0;
    }
}
