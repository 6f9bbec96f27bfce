use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Live pressed/released state per key identifier.
///
/// Entries appear on the first event for a key; a key that was never seen
/// reads as released.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardState {
    keys: HashMap<String, bool>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into(), true);
    }

    pub fn release(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into(), false);
    }

    /// Whether `key` is currently held.
    pub fn is_pressed(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// Raw entry for `key`: `None` if no event was ever seen for it.
    pub fn get(&self, key: &str) -> Option<bool> {
        self.keys.get(key).copied()
    }

    /// Mark every known key released. Entries are kept, only flipped.
    pub fn clear_all(&mut self) {
        for pressed in self.keys.values_mut() {
            *pressed = false;
        }
    }

    /// Keys currently held, sorted for stable output.
    pub fn pressed_keys(&self) -> Vec<&str> {
        let mut held: Vec<&str> = self
            .keys
            .iter()
            .filter(|(_, pressed)| **pressed)
            .map(|(key, _)| key.as_str())
            .collect();
        held.sort_unstable();
        held
    }

    /// Every key seen so far with its state.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.keys.iter().map(|(key, pressed)| (key.as_str(), *pressed))
    }

    /// Number of keys that have received at least one event.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
