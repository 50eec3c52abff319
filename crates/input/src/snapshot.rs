//! Per-frame key presence set.

use crate::types::{Key, Modifiers, KEY_CAPACITY};

const WORD_BITS: usize = 64;
const WORDS: usize = KEY_CAPACITY / WORD_BITS;

/// Keys observed going down since the last poll, plus the modifier mask.
///
/// Backends call [`InputSnapshot::clear`] at the start of every poll, so a key
/// is only reported for the frames in which a down event actually arrived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    keys: [u64; WORDS],
    modifiers: Modifiers,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.keys = [0; WORDS];
        self.modifiers = Modifiers::empty();
    }

    /// Mark `key` as down. `Key::None` is ignored.
    pub fn press(&mut self, key: Key) {
        if key == Key::None {
            return;
        }
        let i = key.index();
        self.keys[i / WORD_BITS] |= 1 << (i % WORD_BITS);
    }

    pub fn add_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers |= modifiers;
    }

    /// Whether `key` went down this frame, ignoring modifiers.
    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        let i = key.index();
        self.keys[i / WORD_BITS] & (1 << (i % WORD_BITS)) != 0
    }

    /// Whether `key` went down this frame with exactly `modifiers` held.
    ///
    /// `Modifiers::empty()` means no modifier at all; a superset does not match.
    pub fn is_key_pressed(&self, key: Key, modifiers: Modifiers) -> bool {
        self.is_down(key) && self.modifiers == modifiers
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_empty(&self) -> bool {
        self.keys.iter().all(|&w| w == 0)
    }

    /// Every key currently marked down, in key-code order.
    pub fn pressed(&self) -> impl Iterator<Item = Key> + '_ {
        Key::all().filter(move |&key| self.is_down(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_query() {
        let mut input = InputSnapshot::new();
        input.press(Key::A);
        input.press(Key::Menu);
        assert!(input.is_down(Key::A));
        assert!(input.is_down(Key::Menu));
        assert!(!input.is_down(Key::B));
        assert!(input.is_key_pressed(Key::A, Modifiers::empty()));
    }

    #[test]
    fn test_modifier_mask_must_match_exactly() {
        let mut input = InputSnapshot::new();
        input.press(Key::C);
        input.add_modifiers(Modifiers::CONTROL | Modifiers::SHIFT);
        assert!(!input.is_key_pressed(Key::C, Modifiers::empty()));
        assert!(!input.is_key_pressed(Key::C, Modifiers::CONTROL));
        assert!(input.is_key_pressed(Key::C, Modifiers::CONTROL | Modifiers::SHIFT));
        assert!(input.is_down(Key::C));
    }

    #[test]
    fn test_clear_resets_keys_and_modifiers() {
        let mut input = InputSnapshot::new();
        input.press(Key::Space);
        input.add_modifiers(Modifiers::ALT);
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.modifiers(), Modifiers::empty());
        assert!(!input.is_down(Key::Space));
    }

    #[test]
    fn test_none_is_never_pressed() {
        let mut input = InputSnapshot::new();
        input.press(Key::None);
        assert!(input.is_empty());
    }

    #[test]
    fn test_pressed_iterates_in_order() {
        let mut input = InputSnapshot::new();
        input.press(Key::Z);
        input.press(Key::A);
        input.press(Key::F5);
        let keys: Vec<Key> = input.pressed().collect();
        assert_eq!(keys, vec![Key::A, Key::Z, Key::F5]);
    }
}
