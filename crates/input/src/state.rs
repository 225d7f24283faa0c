use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::MoveKey;

/// Live set of held movement keys, updated from press/release events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: BTreeSet<MoveKey>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: MoveKey) {
        if self.held.insert(key) {
            tracing::trace!(?key, "key pressed");
        }
    }

    pub fn release(&mut self, key: MoveKey) {
        if self.held.remove(&key) {
            tracing::trace!(?key, "key released");
        }
    }

    /// Apply a raw key event by character. Returns false for unbound keys.
    pub fn handle_char(&mut self, c: char, pressed: bool) -> bool {
        let Some(key) = MoveKey::from_char(c) else {
            return false;
        };
        if pressed {
            self.press(key);
        } else {
            self.release(key);
        }
        true
    }

    /// Drop every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held.contains(&key)
    }

    /// Copy the current key set for one frame.
    pub fn snapshot(&self) -> InputSnapshot {
        self.held.iter().copied().collect()
    }
}

/// Immutable point-in-time copy of the held keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    bits: u8,
}

impl InputSnapshot {
    /// Snapshot with nothing held.
    pub const EMPTY: Self = Self { bits: 0 };

    pub fn is_held(self, key: MoveKey) -> bool {
        self.bits & key.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Parse a string of bound characters such as `"wd"`; unbound ones are skipped.
    pub fn from_chars(chars: &str) -> Self {
        chars.chars().filter_map(MoveKey::from_char).collect()
    }

    pub fn keys(self) -> impl Iterator<Item = MoveKey> {
        MoveKey::ALL.into_iter().filter(move |k| self.is_held(*k))
    }
}

impl FromIterator<MoveKey> for InputSnapshot {
    fn from_iter<I: IntoIterator<Item = MoveKey>>(iter: I) -> Self {
        let bits = iter.into_iter().fold(0, |acc, k| acc | k.bit());
        Self { bits }
    }
}
