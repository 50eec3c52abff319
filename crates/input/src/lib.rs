//! Terminal input module (engine-facing).
//!
//! Holds the per-frame [`InputSnapshot`], the two native-event-to-[`Key`] tables
//! used by the backends, and the game's key bindings. Events arrive as
//! `crossterm` key events; nothing here reads from the terminal itself.
//!
//! [`Key`]: crate::types::Key

pub mod bindings;
pub mod map;
pub mod snapshot;

pub use threes_types as types;

pub use bindings::{read_game_input, read_input, KeyBinding, KEY_BINDINGS};
pub use map::{map_modifiers, map_native_key, map_posix_key, record_key_event};
pub use snapshot::InputSnapshot;
