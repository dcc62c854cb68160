//! Keyboard snapshot refreshed once per frame by the event pump.
//!
//! Gameplay polls the held state only: a key counts every frame it is down,
//! and cooldown timers stand in for press edges.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Full jump (Z).
    Jump,
    /// Short jump (X).
    ShortJump,
    /// Sprint (Space).
    Sprint,
    /// Talk to helpers, open doors, dismiss messages (C).
    Interact,
    /// Cycle the player character (Q).
    Cycle,
    Escape,
    LeftCtrl,
    LeftShift,
    Num0,
}

impl Key {
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "Left" => Self::Left,
            "Right" => Self::Right,
            "Up" => Self::Up,
            "Down" => Self::Down,
            "Jump" | "Z" => Self::Jump,
            "ShortJump" | "X" => Self::ShortJump,
            "Sprint" | "Space" => Self::Sprint,
            "Interact" | "C" => Self::Interact,
            "Cycle" | "Q" => Self::Cycle,
            "Escape" => Self::Escape,
            "LeftCtrl" => Self::LeftCtrl,
            "LeftShift" => Self::LeftShift,
            "Num0" | "0" => Self::Num0,
            _ => return None,
        };
        Some(key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Replace the held set with `keys`.
    pub fn set_held<I: IntoIterator<Item = Key>>(&mut self, keys: I) {
        self.held = keys.into_iter().collect();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
