//! Keyboard state sampled once per frame

use std::collections::HashSet;

/// Logical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    Up,
    Down,
    Escape,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Key::W),
            "KeyS" => Some(Key::S),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "Escape" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Held keys plus keys that went down since the last `end_frame`
#[derive(Debug, Clone, Default)]
pub struct InputState {
    down: HashSet<Key>,
    pressed: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. OS auto-repeat of a held key is not a new press.
    pub fn press(&mut self, key: Key) {
        if self.down.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.down.remove(&key);
    }

    /// Is the key currently held
    pub fn key_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    /// Did the key go down during this frame
    pub fn key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Forget one-shot presses (call after each update)
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.down.clear();
        self.pressed.clear();
    }
}
