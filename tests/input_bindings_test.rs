//! Key events through a backend into game inputs.

use crossterm::event::{KeyCode, KeyModifiers};

use terminal_threes::input::read_game_input;
use terminal_threes::term::{NativeConsoleBackend, PosixTerminalBackend, ScriptedEvents, Tui};
use terminal_threes::types::{GameInput, Key, Modifiers};

type PosixTui = Tui<PosixTerminalBackend<Vec<u8>, ScriptedEvents>>;

fn posix() -> PosixTui {
    let mut tui = Tui::new(PosixTerminalBackend::with_io(
        Vec::new(),
        ScriptedEvents::new(20, 10),
    ));
    tui.init(false).unwrap();
    tui
}

fn input_for(tui: &mut PosixTui, keys: &[(KeyCode, KeyModifiers)]) -> GameInput {
    for &(code, modifiers) in keys {
        tui.backend_mut().source_mut().push_key_with(code, modifiers);
    }
    tui.begin_frame().unwrap();
    let input = read_game_input(tui.input());
    tui.end_frame(0).unwrap();
    input
}

#[test]
fn arrows_and_space_map_to_moves() {
    let mut tui = posix();
    let none = KeyModifiers::NONE;
    assert_eq!(input_for(&mut tui, &[(KeyCode::Left, none)]), GameInput::Left);
    assert_eq!(input_for(&mut tui, &[(KeyCode::Right, none)]), GameInput::Right);
    assert_eq!(input_for(&mut tui, &[(KeyCode::Up, none)]), GameInput::Up);
    assert_eq!(input_for(&mut tui, &[(KeyCode::Down, none)]), GameInput::Down);
    assert_eq!(input_for(&mut tui, &[(KeyCode::Char(' '), none)]), GameInput::Space);
    assert_eq!(input_for(&mut tui, &[]), GameInput::None);
}

#[test]
fn quit_and_restart_chords() {
    let mut tui = posix();
    assert_eq!(
        input_for(&mut tui, &[(KeyCode::Char('q'), KeyModifiers::NONE)]),
        GameInput::Quit
    );
    assert_eq!(
        input_for(&mut tui, &[(KeyCode::Char('c'), KeyModifiers::CONTROL)]),
        GameInput::Quit
    );
    assert_eq!(
        input_for(&mut tui, &[(KeyCode::F(5), KeyModifiers::NONE)]),
        GameInput::Restart
    );
    // A plain 'c' is not bound.
    assert_eq!(
        input_for(&mut tui, &[(KeyCode::Char('c'), KeyModifiers::NONE)]),
        GameInput::None
    );
}

#[test]
fn modifier_mask_must_match_exactly() {
    let mut tui = posix();
    // Ctrl+Left: the mask is CONTROL, so the plain Left binding does not fire.
    assert_eq!(
        input_for(&mut tui, &[(KeyCode::Left, KeyModifiers::CONTROL)]),
        GameInput::None
    );
}

#[test]
fn priority_order_decides_between_simultaneous_keys() {
    let mut tui = posix();
    let none = KeyModifiers::NONE;
    assert_eq!(
        input_for(&mut tui, &[(KeyCode::Down, none), (KeyCode::Left, none)]),
        GameInput::Left
    );
    assert_eq!(
        input_for(&mut tui, &[(KeyCode::Left, none), (KeyCode::Char('q'), none)]),
        GameInput::Quit
    );
}

#[test]
fn held_key_does_not_carry_into_next_frame() {
    let mut tui = posix();
    assert_eq!(
        input_for(&mut tui, &[(KeyCode::Left, KeyModifiers::NONE)]),
        GameInput::Left
    );
    assert_eq!(input_for(&mut tui, &[]), GameInput::None);
}

#[test]
fn native_backend_uses_console_key_table() {
    let mut tui = Tui::new(NativeConsoleBackend::with_io(
        Vec::new(),
        ScriptedEvents::new(20, 10),
    ));
    tui.init(false).unwrap();
    let source = tui.backend_mut().source_mut();
    source.push_key(KeyCode::F(24));
    source.push_key(KeyCode::NumLock);
    source.push_release(KeyCode::Char('x'));
    tui.begin_frame().unwrap();
    assert!(tui.is_key_pressed(Key::F24, Modifiers::empty()));
    assert!(tui.is_key_pressed(Key::NumLock, Modifiers::empty()));
    assert!(!tui.input().is_down(Key::X));
}

#[test]
fn posix_backend_ignores_lock_keys_but_knows_f25() {
    let mut tui = posix();
    let source = tui.backend_mut().source_mut();
    source.push_key(KeyCode::F(25));
    source.push_key(KeyCode::NumLock);
    tui.begin_frame().unwrap();
    assert!(tui.input().is_down(Key::F25));
    assert!(!tui.input().is_down(Key::NumLock));
}
