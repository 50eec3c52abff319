//! Game key bindings.

use crate::snapshot::InputSnapshot;
use crate::types::{GameInput, Key, Modifiers};

/// One key chord bound to a game input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: Key,
    pub modifiers: Modifiers,
    pub input: GameInput,
}

impl KeyBinding {
    pub const fn new(key: Key, modifiers: Modifiers, input: GameInput) -> Self {
        Self {
            key,
            modifiers,
            input,
        }
    }

    pub const fn plain(key: Key, input: GameInput) -> Self {
        Self::new(key, Modifiers::empty(), input)
    }
}

/// Checked top to bottom; the first chord pressed this frame wins.
pub const KEY_BINDINGS: [KeyBinding; 8] = [
    KeyBinding::plain(Key::Q, GameInput::Quit),
    KeyBinding::new(Key::C, Modifiers::CONTROL, GameInput::Quit),
    KeyBinding::plain(Key::F5, GameInput::Restart),
    KeyBinding::plain(Key::Left, GameInput::Left),
    KeyBinding::plain(Key::Up, GameInput::Up),
    KeyBinding::plain(Key::Right, GameInput::Right),
    KeyBinding::plain(Key::Down, GameInput::Down),
    KeyBinding::plain(Key::Space, GameInput::Space),
];

/// Resolve this frame's input against `bindings`.
pub fn read_input(snapshot: &InputSnapshot, bindings: &[KeyBinding]) -> GameInput {
    bindings
        .iter()
        .find(|b| snapshot.is_key_pressed(b.key, b.modifiers))
        .map_or(GameInput::None, |b| b.input)
}

/// Resolve this frame's input against [`KEY_BINDINGS`].
pub fn read_game_input(snapshot: &InputSnapshot) -> GameInput {
    read_input(snapshot, &KEY_BINDINGS)
}
