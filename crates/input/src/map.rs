//! Key mapping from terminal events to engine key codes.
//!
//! Two tables exist because the two backends see different key sets. The
//! console table reports physical keys (keypad, lock and modifier keys, shifted
//! symbols folded onto their base key); the curses-style table only sees what a
//! terminal transmits as characters or escape sequences.

use crate::snapshot::InputSnapshot;
use crate::types::{Key, Modifiers};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, ModifierKeyCode};

/// Map modifier state to the engine's mask. Super/Hyper/Meta are not modelled.
pub fn map_modifiers(modifiers: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    if modifiers.contains(KeyModifiers::CONTROL) {
        out |= Modifiers::CONTROL;
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if modifiers.contains(KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    out
}

fn punctuation(c: char) -> Option<Key> {
    Some(match c {
        '\'' => Key::Apostrophe,
        ',' => Key::Comma,
        '-' => Key::Minus,
        '.' => Key::Period,
        '/' => Key::Slash,
        ';' => Key::Semicolon,
        '=' => Key::Equal,
        '[' => Key::LeftBracket,
        '\\' => Key::Backslash,
        ']' => Key::RightBracket,
        '`' => Key::GraveAccent,
        _ => return None,
    })
}

/// Shifted symbol to the key that produces it on a US layout.
fn shifted_symbol(c: char) -> Option<Key> {
    Some(match c {
        '!' => Key::Num1,
        '@' => Key::Num2,
        '#' => Key::Num3,
        '$' => Key::Num4,
        '%' => Key::Num5,
        '^' => Key::Num6,
        '&' => Key::Num7,
        '*' => Key::Num8,
        '(' => Key::Num9,
        ')' => Key::Num0,
        '"' => Key::Apostrophe,
        '<' => Key::Comma,
        '_' => Key::Minus,
        '>' => Key::Period,
        '?' => Key::Slash,
        ':' => Key::Semicolon,
        '+' => Key::Equal,
        '{' => Key::LeftBracket,
        '|' => Key::Backslash,
        '}' => Key::RightBracket,
        '~' => Key::GraveAccent,
        _ => return None,
    })
}

fn keypad(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) if c.is_ascii_digit() => c.to_digit(10).and_then(Key::keypad_digit),
        KeyCode::Char('.') => Some(Key::KpDecimal),
        KeyCode::Char('/') => Some(Key::KpDivide),
        KeyCode::Char('*') => Some(Key::KpMultiply),
        KeyCode::Char('-') => Some(Key::KpSubtract),
        KeyCode::Char('+') => Some(Key::KpAdd),
        KeyCode::Char('=') => Some(Key::KpEqual),
        KeyCode::Enter => Some(Key::KpEnter),
        _ => None,
    }
}

fn modifier_key(code: ModifierKeyCode) -> Option<Key> {
    match code {
        ModifierKeyCode::LeftShift => Some(Key::LeftShift),
        ModifierKeyCode::LeftControl => Some(Key::LeftControl),
        ModifierKeyCode::LeftAlt => Some(Key::LeftAlt),
        ModifierKeyCode::LeftSuper => Some(Key::LeftSuper),
        ModifierKeyCode::RightShift => Some(Key::RightShift),
        ModifierKeyCode::RightControl => Some(Key::RightControl),
        ModifierKeyCode::RightAlt => Some(Key::RightAlt),
        ModifierKeyCode::RightSuper => Some(Key::RightSuper),
        _ => None,
    }
}

/// Keys both tables agree on.
fn common(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Insert => Some(Key::Insert),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab | KeyCode::BackTab => Some(Key::Tab),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Key::digit(c)
            .or_else(|| Key::letter(c))
            .or_else(|| punctuation(c)),
        _ => None,
    }
}

/// Console key table: physical keys, including keypad, lock and modifier keys.
///
/// Function keys stop at F24.
pub fn map_native_key(event: &KeyEvent) -> Option<Key> {
    if event.state.contains(KeyEventState::KEYPAD) {
        if let Some(key) = keypad(event.code) {
            return Some(key);
        }
    }
    match event.code {
        KeyCode::F(n) if n <= 24 => Key::function(n),
        KeyCode::F(_) => None,
        KeyCode::CapsLock => Some(Key::CapsLock),
        KeyCode::ScrollLock => Some(Key::ScrollLock),
        KeyCode::NumLock => Some(Key::NumLock),
        KeyCode::PrintScreen => Some(Key::PrintScreen),
        KeyCode::Pause => Some(Key::Pause),
        KeyCode::Menu => Some(Key::Menu),
        KeyCode::Modifier(code) => modifier_key(code),
        KeyCode::Char(c) => common(event.code).or_else(|| shifted_symbol(c)),
        code => common(code),
    }
}

/// Curses-style key table: what a POSIX terminal transmits.
pub fn map_posix_key(event: &KeyEvent) -> Option<Key> {
    match event.code {
        KeyCode::F(n) => Key::function(n),
        code => common(code),
    }
}

/// Record one key event into `snapshot` using `map`.
///
/// Releases and unrecognized keys are dropped. Returns whether the event counted.
pub fn record_key_event(
    snapshot: &mut InputSnapshot,
    event: &KeyEvent,
    map: fn(&KeyEvent) -> Option<Key>,
) -> bool {
    if event.kind == KeyEventKind::Release {
        return false;
    }
    match map(event) {
        Some(key) => {
            snapshot.press(key);
            snapshot.add_modifiers(map_modifiers(event.modifiers));
            true
        }
        None => false,
    }
}
