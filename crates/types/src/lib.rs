//! Core types module - shared data structures and constants
//!
//! This module defines the value types shared by the puzzle rules, the input layer
//! and the terminal renderer. Everything here is plain data: no I/O, no terminal
//! handles, no global state.
//!
//! # Board Dimensions
//!
//! - **Extent**: 4 columns by 4 rows
//! - **Size**: 16 tiles, stored row-major (`y * BOARD_EXTENT + x`)
//!
//! # Frame Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TARGET_FPS` | 60 | Frame pacing target |
//! | `DEFAULT_MAX_DELTA_SECS` | 0.03 | Upper bound for animation steps |
//! | `KEY_CAPACITY` | 128 | Bits in the input presence set |
//!
//! # Colors
//!
//! A [`Color`] packs a 4-bit foreground and a 4-bit background [`Palette`] index into
//! one byte (foreground in the low nibble).
//!
//! ```
//! use threes_types::{decode_color, encode_color, Color, Palette};
//!
//! let c = Color::new(Palette::Black, Palette::LightGray);
//! assert_eq!(c.raw(), encode_color(Palette::Black, Palette::LightGray));
//! assert_eq!(decode_color(c.raw()), (Palette::Black, Palette::LightGray));
//! assert_eq!(Color::default(), Color::new(Palette::White, Palette::Black));
//! ```

use bitflags::bitflags;

/// Board width and height in tiles.
pub const BOARD_EXTENT: usize = 4;

/// Number of tiles on the board.
pub const BOARD_SIZE: usize = BOARD_EXTENT * BOARD_EXTENT;

/// Default frame pacing target.
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Default clamp for the frame delta handed to animation code, in seconds.
pub const DEFAULT_MAX_DELTA_SECS: f32 = 0.03;

/// Number of bits in the input presence set. Must cover [`Key::COUNT`].
pub const KEY_CAPACITY: usize = 128;

/// The 16-entry color palette, in console attribute order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Palette {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    Yellow = 14,
    White = 15,
}

impl Palette {
    pub const ALL: [Palette; 16] = [
        Palette::Black,
        Palette::Blue,
        Palette::Green,
        Palette::Cyan,
        Palette::Red,
        Palette::Magenta,
        Palette::Brown,
        Palette::LightGray,
        Palette::DarkGray,
        Palette::LightBlue,
        Palette::LightGreen,
        Palette::LightCyan,
        Palette::LightRed,
        Palette::LightMagenta,
        Palette::Yellow,
        Palette::White,
    ];

    /// Palette entry for the low 4 bits of `index`.
    pub const fn from_index(index: u8) -> Self {
        Self::ALL[(index & 0x0F) as usize]
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Parse a snake_case palette name (`"light_gray"`, `"dark_gray"`, ...).
    ///
    /// ```
    /// use threes_types::Palette;
    ///
    /// assert_eq!(Palette::from_name("light_blue"), Some(Palette::LightBlue));
    /// assert_eq!(Palette::from_name("Yellow"), Some(Palette::Yellow));
    /// assert_eq!(Palette::from_name("orange"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL.into_iter().find(|p| p.name() == normalized)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Palette::Black => "black",
            Palette::Blue => "blue",
            Palette::Green => "green",
            Palette::Cyan => "cyan",
            Palette::Red => "red",
            Palette::Magenta => "magenta",
            Palette::Brown => "brown",
            Palette::LightGray => "light_gray",
            Palette::DarkGray => "dark_gray",
            Palette::LightBlue => "light_blue",
            Palette::LightGreen => "light_green",
            Palette::LightCyan => "light_cyan",
            Palette::LightRed => "light_red",
            Palette::LightMagenta => "light_magenta",
            Palette::Yellow => "yellow",
            Palette::White => "white",
        }
    }
}

/// Pack a foreground/background pair into one byte.
///
/// Purely bitwise: foreground in bits 0..4, background in bits 4..8.
#[inline]
pub const fn encode_color(fg: Palette, bg: Palette) -> u8 {
    (fg as u8 & 0x0F) | ((bg as u8 & 0x0F) << 4)
}

/// Unpack a byte produced by [`encode_color`].
#[inline]
pub const fn decode_color(raw: u8) -> (Palette, Palette) {
    (Palette::from_index(raw), Palette::from_index(raw >> 4))
}

/// Packed foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u8);

impl Color {
    pub const fn new(fg: Palette, bg: Palette) -> Self {
        Self(encode_color(fg, bg))
    }

    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn fg(self) -> Palette {
        decode_color(self.0).0
    }

    pub const fn bg(self) -> Palette {
        decode_color(self.0).1
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(Palette::White, Palette::Black)
    }
}

impl From<u8> for Color {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl From<(Palette, Palette)> for Color {
    fn from((fg, bg): (Palette, Palette)) -> Self {
        Self::new(fg, bg)
    }
}

bitflags! {
    /// Modifier mask carried by the input snapshot.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const CONTROL = 0x1;
        const SHIFT = 0x2;
        const ALT = 0x4;
        /// Super/Windows/Command. Not reported by either backend.
        const RESERVED = 0x8;
    }
}

/// Engine key codes.
///
/// The order is fixed: the discriminant is the bit index in the input presence set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Key {
    None = 0,
    Space,
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Semicolon,
    Equal,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    LeftBracket,
    Backslash,
    RightBracket,
    GraveAccent,
    World1,
    World2,
    Escape,
    Enter,
    Tab,
    Backspace,
    Insert,
    Delete,
    Right,
    Left,
    Down,
    Up,
    PageUp,
    PageDown,
    Home,
    End,
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    F25,
    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    KpDecimal,
    KpDivide,
    KpMultiply,
    KpSubtract,
    KpAdd,
    KpEnter,
    KpEqual,
    LeftShift,
    LeftControl,
    LeftAlt,
    LeftSuper,
    RightShift,
    RightControl,
    RightAlt,
    RightSuper,
    Menu,
}

impl Key {
    /// Number of key codes, including [`Key::None`].
    pub const COUNT: usize = Key::Menu as usize + 1;

    const DIGITS: [Key; 10] = [
        Key::Num0,
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::Num4,
        Key::Num5,
        Key::Num6,
        Key::Num7,
        Key::Num8,
        Key::Num9,
    ];

    const KEYPAD_DIGITS: [Key; 10] = [
        Key::Kp0,
        Key::Kp1,
        Key::Kp2,
        Key::Kp3,
        Key::Kp4,
        Key::Kp5,
        Key::Kp6,
        Key::Kp7,
        Key::Kp8,
        Key::Kp9,
    ];

    const LETTERS: [Key; 26] = [
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::L,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::V,
        Key::W,
        Key::X,
        Key::Y,
        Key::Z,
    ];

    const FUNCTION: [Key; 25] = [
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
        Key::F11,
        Key::F12,
        Key::F13,
        Key::F14,
        Key::F15,
        Key::F16,
        Key::F17,
        Key::F18,
        Key::F19,
        Key::F20,
        Key::F21,
        Key::F22,
        Key::F23,
        Key::F24,
        Key::F25,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Key for a presence-set bit index.
    pub fn from_index(index: usize) -> Option<Self> {
        KEY_TABLE.get(index).copied()
    }

    /// All key codes in discriminant order.
    pub fn all() -> impl Iterator<Item = Key> {
        KEY_TABLE.iter().copied()
    }

    /// `'0'..='9'` to [`Key::Num0`]..[`Key::Num9`].
    pub fn digit(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self::DIGITS[d as usize])
    }

    /// Keypad digit 0..=9.
    pub fn keypad_digit(d: u32) -> Option<Self> {
        Self::KEYPAD_DIGITS.get(d as usize).copied()
    }

    /// Case-insensitive ASCII letter.
    pub fn letter(c: char) -> Option<Self> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let offset = (c.to_ascii_lowercase() as u8 - b'a') as usize;
        Some(Self::LETTERS[offset])
    }

    /// Function key `F{n}`, 1-based.
    pub fn function(n: u8) -> Option<Self> {
        (n as usize)
            .checked_sub(1)
            .and_then(|i| Self::FUNCTION.get(i).copied())
    }
}

static KEY_TABLE: [Key; Key::COUNT] = [
    Key::None,
    Key::Space,
    Key::Apostrophe,
    Key::Comma,
    Key::Minus,
    Key::Period,
    Key::Slash,
    Key::Num0,
    Key::Num1,
    Key::Num2,
    Key::Num3,
    Key::Num4,
    Key::Num5,
    Key::Num6,
    Key::Num7,
    Key::Num8,
    Key::Num9,
    Key::Semicolon,
    Key::Equal,
    Key::A,
    Key::B,
    Key::C,
    Key::D,
    Key::E,
    Key::F,
    Key::G,
    Key::H,
    Key::I,
    Key::J,
    Key::K,
    Key::L,
    Key::M,
    Key::N,
    Key::O,
    Key::P,
    Key::Q,
    Key::R,
    Key::S,
    Key::T,
    Key::U,
    Key::V,
    Key::W,
    Key::X,
    Key::Y,
    Key::Z,
    Key::LeftBracket,
    Key::Backslash,
    Key::RightBracket,
    Key::GraveAccent,
    Key::World1,
    Key::World2,
    Key::Escape,
    Key::Enter,
    Key::Tab,
    Key::Backspace,
    Key::Insert,
    Key::Delete,
    Key::Right,
    Key::Left,
    Key::Down,
    Key::Up,
    Key::PageUp,
    Key::PageDown,
    Key::Home,
    Key::End,
    Key::CapsLock,
    Key::ScrollLock,
    Key::NumLock,
    Key::PrintScreen,
    Key::Pause,
    Key::F1,
    Key::F2,
    Key::F3,
    Key::F4,
    Key::F5,
    Key::F6,
    Key::F7,
    Key::F8,
    Key::F9,
    Key::F10,
    Key::F11,
    Key::F12,
    Key::F13,
    Key::F14,
    Key::F15,
    Key::F16,
    Key::F17,
    Key::F18,
    Key::F19,
    Key::F20,
    Key::F21,
    Key::F22,
    Key::F23,
    Key::F24,
    Key::F25,
    Key::Kp0,
    Key::Kp1,
    Key::Kp2,
    Key::Kp3,
    Key::Kp4,
    Key::Kp5,
    Key::Kp6,
    Key::Kp7,
    Key::Kp8,
    Key::Kp9,
    Key::KpDecimal,
    Key::KpDivide,
    Key::KpMultiply,
    Key::KpSubtract,
    Key::KpAdd,
    Key::KpEnter,
    Key::KpEqual,
    Key::LeftShift,
    Key::LeftControl,
    Key::LeftAlt,
    Key::LeftSuper,
    Key::RightShift,
    Key::RightControl,
    Key::RightAlt,
    Key::RightSuper,
    Key::Menu,
];

/// Inputs the puzzle understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameInput {
    None,
    Left,
    Right,
    Up,
    Down,
    Space,
    Restart,
    Quit,
}

impl GameInput {
    /// Directional inputs, in the order the game-over check tries them.
    pub const DIRECTIONS: [GameInput; 4] = [
        GameInput::Left,
        GameInput::Right,
        GameInput::Up,
        GameInput::Down,
    ];

    pub fn is_direction(self) -> bool {
        matches!(
            self,
            GameInput::Left | GameInput::Right | GameInput::Up | GameInput::Down
        )
    }
}

/// Board placement and animation timing, in terminal cells and seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub pos_x: i32,
    pub pos_y: i32,
    pub tile_width: i32,
    pub tile_height: i32,
    pub tile_spacing: i32,
    pub anim_seconds: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            pos_x: 3,
            pos_y: 3,
            tile_width: 8,
            tile_height: 5,
            tile_spacing: 1,
            anim_seconds: 0.25,
        }
    }
}

/// Named colors used by the board view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub board_lines: Color,
    pub board_background: Color,
    pub tile_one: Color,
    pub tile_two: Color,
    pub tile: Color,
    pub header: Color,
    pub status_bar: Color,
    pub panel: Color,
    pub panel_header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            board_lines: Color::new(Palette::White, Palette::DarkGray),
            board_background: Color::new(Palette::White, Palette::Black),
            tile_one: Color::new(Palette::Black, Palette::LightBlue),
            tile_two: Color::new(Palette::Black, Palette::LightRed),
            tile: Color::new(Palette::Black, Palette::LightGray),
            header: Color::new(Palette::White, Palette::Black),
            status_bar: Color::new(Palette::Black, Palette::LightGray),
            panel: Color::new(Palette::Black, Palette::DarkGray),
            panel_header: Color::new(Palette::Black, Palette::LightGray),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_round_trips_every_palette_pair() {
        for fg in Palette::ALL {
            for bg in Palette::ALL {
                let c = Color::new(fg, bg);
                assert_eq!(c.fg(), fg);
                assert_eq!(c.bg(), bg);
                assert_eq!(Color::from_raw(c.raw()), c);
            }
        }
    }

    #[test]
    fn color_packs_foreground_in_low_nibble() {
        assert_eq!(encode_color(Palette::Blue, Palette::Black), 0x01);
        assert_eq!(encode_color(Palette::Black, Palette::Blue), 0x10);
        assert_eq!(Color::default().raw(), 0x0F);
    }

    #[test]
    fn key_table_matches_discriminants() {
        assert_eq!(Key::COUNT, 121);
        assert!(Key::COUNT <= KEY_CAPACITY);
        for (i, key) in Key::all().enumerate() {
            assert_eq!(key.index(), i);
            assert_eq!(Key::from_index(i), Some(key));
        }
        assert_eq!(Key::from_index(Key::COUNT), None);
    }

    #[test]
    fn key_helpers() {
        assert_eq!(Key::letter('q'), Some(Key::Q));
        assert_eq!(Key::letter('Q'), Some(Key::Q));
        assert_eq!(Key::letter('1'), None);
        assert_eq!(Key::digit('7'), Some(Key::Num7));
        assert_eq!(Key::function(5), Some(Key::F5));
        assert_eq!(Key::function(0), None);
        assert_eq!(Key::function(26), None);
        assert_eq!(Key::keypad_digit(9), Some(Key::Kp9));
    }

    #[test]
    fn modifier_bits_match_mask_layout() {
        assert_eq!(Modifiers::CONTROL.bits(), 0x1);
        assert_eq!(Modifiers::SHIFT.bits(), 0x2);
        assert_eq!(Modifiers::ALT.bits(), 0x4);
        assert_eq!((Modifiers::CONTROL | Modifiers::ALT).bits(), 0x5);
    }
}
