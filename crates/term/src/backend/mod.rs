//! Backends: own the physical screen, poll input and present the logical buffer.
//!
//! Both backends diff against a [`CellCache`] and only write cells that changed
//! since the last present. They differ in how they talk to the terminal:
//!
//! - [`NativeConsoleBackend`]: console screen-buffer protocol. Each changed cell
//!   is an independent positioned attribute+character write.
//! - [`PosixTerminalBackend`]: terminal-library protocol. One batched write per
//!   frame with cursor-move elision and active-color tracking.

mod cache;
mod native;
mod posix;

use crossterm::style;

pub use cache::CellCache;
pub use native::{NativeConsoleBackend, MAX_INPUT_RECORDS};
pub use posix::{encode_diff_into, PosixTerminalBackend};

use crate::buffer::Buffer;
use crate::config::BackendKind;
use crate::error::Result;
use crate::input::InputSnapshot;
use crate::types::{Color, Palette};

/// Platform terminal driver.
pub trait Backend {
    /// Take over the terminal. Errors with `AlreadyInitialized` when called twice.
    fn init(&mut self, double_buffered: bool) -> Result<()>;

    /// Restore the terminal. Idempotent.
    fn shutdown(&mut self) -> Result<()>;

    fn is_initialized(&self) -> bool;

    /// Rebuild `input` from the events that arrived since the last poll.
    fn poll_input(&mut self, input: &mut InputSnapshot) -> Result<()>;

    /// Current terminal size in columns and rows.
    fn size(&mut self) -> Result<(u16, u16)>;

    /// Write every cell of `buffer` that differs from the cache. Returns the number of cells written.
    fn present(&mut self, buffer: &Buffer) -> Result<usize>;

    fn kind(&self) -> BackendKind;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn init(&mut self, double_buffered: bool) -> Result<()> {
        (**self).init(double_buffered)
    }

    fn shutdown(&mut self) -> Result<()> {
        (**self).shutdown()
    }

    fn is_initialized(&self) -> bool {
        (**self).is_initialized()
    }

    fn poll_input(&mut self, input: &mut InputSnapshot) -> Result<()> {
        (**self).poll_input(input)
    }

    fn size(&mut self) -> Result<(u16, u16)> {
        (**self).size()
    }

    fn present(&mut self, buffer: &Buffer) -> Result<usize> {
        (**self).present(buffer)
    }

    fn kind(&self) -> BackendKind {
        (**self).kind()
    }
}

/// Backend for `kind` on the process's terminal.
pub fn open_backend(kind: BackendKind) -> Box<dyn Backend> {
    match kind {
        BackendKind::Native => Box::new(NativeConsoleBackend::new()),
        BackendKind::Posix => Box::new(PosixTerminalBackend::new()),
    }
}

/// Console attribute index to ANSI color index: red and blue bits swap places.
pub fn console_to_ansi(index: u8) -> u8 {
    let index = index & 0x0F;
    ((index & 0x1) << 2) | (index & 0x2) | ((index & 0x4) >> 2) | (index & 0x8)
}

/// Curses-style named color for a palette entry.
pub fn palette_color(p: Palette) -> style::Color {
    match p {
        Palette::Black => style::Color::Black,
        Palette::Blue => style::Color::DarkBlue,
        Palette::Green => style::Color::DarkGreen,
        Palette::Cyan => style::Color::DarkCyan,
        Palette::Red => style::Color::DarkRed,
        Palette::Magenta => style::Color::DarkMagenta,
        Palette::Brown => style::Color::DarkYellow,
        Palette::LightGray => style::Color::Grey,
        Palette::DarkGray => style::Color::DarkGrey,
        Palette::LightBlue => style::Color::Blue,
        Palette::LightGreen => style::Color::Green,
        Palette::LightCyan => style::Color::Cyan,
        Palette::LightRed => style::Color::Red,
        Palette::LightMagenta => style::Color::Magenta,
        Palette::Yellow => style::Color::Yellow,
        Palette::White => style::Color::White,
    }
}

/// Foreground/background pair for a packed color, as curses-style names.
pub fn named_colors(color: Color) -> style::Colors {
    style::Colors::new(palette_color(color.fg()), palette_color(color.bg()))
}

/// Foreground/background pair for a packed color, as console attributes.
pub fn console_colors(color: Color) -> style::Colors {
    style::Colors::new(
        style::Color::AnsiValue(console_to_ansi(color.fg().index())),
        style::Color::AnsiValue(console_to_ansi(color.bg().index())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_to_ansi_swaps_red_and_blue() {
        assert_eq!(console_to_ansi(Palette::Black.index()), 0);
        assert_eq!(console_to_ansi(Palette::Blue.index()), 4);
        assert_eq!(console_to_ansi(Palette::Red.index()), 1);
        assert_eq!(console_to_ansi(Palette::Brown.index()), 3);
        assert_eq!(console_to_ansi(Palette::Cyan.index()), 6);
        assert_eq!(console_to_ansi(Palette::LightBlue.index()), 12);
        assert_eq!(console_to_ansi(Palette::Yellow.index()), 11);
        assert_eq!(console_to_ansi(Palette::White.index()), 15);
    }

    #[test]
    fn test_console_to_ansi_is_a_permutation() {
        let mut seen = [false; 16];
        for p in Palette::ALL {
            seen[console_to_ansi(p.index()) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_named_colors() {
        let colors = named_colors(Color::new(Palette::Black, Palette::LightGray));
        assert_eq!(colors.foreground, Some(style::Color::Black));
        assert_eq!(colors.background, Some(style::Color::Grey));
    }
}
