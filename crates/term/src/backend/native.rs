//! NativeConsoleBackend: console screen-buffer protocol.
//!
//! Mirrors how a console screen buffer is driven: every changed cell is its own
//! positioned attribute write followed by a character write, a resize blanks the
//! whole screen before the repaint, and at most [`MAX_INPUT_RECORDS`] input
//! records are read per poll.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::Event,
    style::{Print, ResetColor, SetColors},
    terminal, QueueableCommand,
};
use tracing::{debug, info, trace};

use super::{console_colors, Backend, CellCache};
use crate::buffer::Buffer;
use crate::config::BackendKind;
use crate::error::{Result, TuiError};
use crate::input::{map_native_key, record_key_event, InputSnapshot};
use crate::source::{CrosstermEvents, EventSource};
use crate::types::Color;

/// Input records read per poll; the rest wait for the next frame.
pub const MAX_INPUT_RECORDS: usize = 128;

pub struct NativeConsoleBackend<W: Write = Stdout, S: EventSource = CrosstermEvents> {
    out: W,
    source: S,
    cache: CellCache,
    initialized: bool,
    alternate: bool,
}

impl NativeConsoleBackend {
    pub fn new() -> Self {
        Self::with_io(io::stdout(), CrosstermEvents::new())
    }
}

impl Default for NativeConsoleBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write, S: EventSource> NativeConsoleBackend<W, S> {
    pub fn with_io(out: W, source: S) -> Self {
        Self {
            out,
            source,
            cache: CellCache::new(),
            initialized: false,
            alternate: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn acquire(&mut self, double_buffered: bool) -> io::Result<()> {
        if double_buffered {
            self.out.queue(terminal::EnterAlternateScreen)?;
        }
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.out.flush()
    }

    fn release(&mut self) -> io::Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        if self.alternate {
            self.out.queue(terminal::LeaveAlternateScreen)?;
        }
        self.out.flush()
    }

    /// Fill the physical screen with default blanks.
    fn blank_screen(&mut self) -> io::Result<()> {
        self.out.queue(SetColors(console_colors(Color::default())))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }
}

impl<W: Write, S: EventSource> Backend for NativeConsoleBackend<W, S> {
    fn init(&mut self, double_buffered: bool) -> Result<()> {
        if self.initialized {
            return Err(TuiError::AlreadyInitialized);
        }
        self.source
            .enable()
            .map_err(|source| TuiError::Acquire { source })?;
        self.alternate = double_buffered;
        if let Err(source) = self.acquire(double_buffered) {
            let _ = self.release();
            let _ = self.source.disable();
            return Err(TuiError::Acquire { source });
        }
        self.cache = CellCache::new();
        self.initialized = true;
        info!(backend = "native", double_buffered, "console initialized");
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;
        let restored = self.release();
        self.source.disable()?;
        restored?;
        info!(backend = "native", "console restored");
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn poll_input(&mut self, input: &mut InputSnapshot) -> Result<()> {
        input.clear();
        for _ in 0..MAX_INPUT_RECORDS {
            match self.source.poll()? {
                Some(Event::Key(key)) => {
                    record_key_event(input, &key, map_native_key);
                }
                Some(_) => {}
                None => break,
            }
        }
        Ok(())
    }

    fn size(&mut self) -> Result<(u16, u16)> {
        Ok(self.source.size()?)
    }

    fn present(&mut self, buffer: &Buffer) -> Result<usize> {
        if !self.initialized {
            return Err(TuiError::NotInitialized);
        }
        if self.cache.ensure_size(buffer.width(), buffer.height()) {
            debug!(width = buffer.width(), height = buffer.height(), "console resized");
            self.blank_screen()?;
        }
        let out = &mut self.out;
        let written = self.cache.diff(buffer, |x, y, cell| -> io::Result<()> {
            out.queue(cursor::MoveTo(x, y))?;
            out.queue(SetColors(console_colors(cell.color)))?;
            out.queue(cursor::MoveTo(x, y))?;
            out.queue(Print(cell.glyph))?;
            Ok(())
        })?;
        self.out.flush()?;
        trace!(written, "console present");
        Ok(written)
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Native
    }
}

impl<W: Write, S: EventSource> Drop for NativeConsoleBackend<W, S> {
    fn drop(&mut self) {
        if self.initialized {
            let _ = self.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Cell;
    use crate::source::ScriptedEvents;
    use crate::types::{Key, Palette};
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers, ModifierKeyCode};

    fn backend(w: u16, h: u16) -> NativeConsoleBackend<Vec<u8>, ScriptedEvents> {
        NativeConsoleBackend::with_io(Vec::new(), ScriptedEvents::new(w, h))
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn test_every_cell_is_a_positioned_write() {
        let mut b = backend(3, 1);
        b.init(false).unwrap();
        let mut buf = Buffer::new(3, 1);
        let c = Color::new(Palette::Yellow, Palette::Blue);
        for x in 0..3 {
            buf.set(x, 0, Cell::new(c, 'y'));
        }
        b.writer_mut().clear();
        assert_eq!(b.present(&buf).unwrap(), 3);

        let mut colors = Vec::new();
        colors.queue(SetColors(console_colors(c))).unwrap();
        // No color run tracking: one attribute write per cell.
        assert_eq!(count(b.writer(), &colors), 3);
    }

    #[test]
    fn test_resize_blanks_screen() {
        let mut b = backend(2, 2);
        b.init(false).unwrap();
        let mut clear = Vec::new();
        clear.queue(terminal::Clear(terminal::ClearType::All)).unwrap();

        b.writer_mut().clear();
        b.present(&Buffer::new(2, 2)).unwrap();
        assert_eq!(count(b.writer(), &clear), 1);

        b.writer_mut().clear();
        assert_eq!(b.present(&Buffer::new(2, 2)).unwrap(), 0);
        assert_eq!(count(b.writer(), &clear), 0);

        b.writer_mut().clear();
        assert_eq!(b.present(&Buffer::new(3, 2)).unwrap(), 6);
        assert_eq!(count(b.writer(), &clear), 1);
    }

    #[test]
    fn test_poll_reads_at_most_128_records() {
        let mut b = backend(2, 2);
        for _ in 0..MAX_INPUT_RECORDS + 10 {
            b.source_mut().push_key(KeyCode::Char('a'));
        }
        let mut input = InputSnapshot::new();
        b.poll_input(&mut input).unwrap();
        assert!(input.is_down(Key::A));
        assert_eq!(b.source().pending(), 10);
    }

    #[test]
    fn test_poll_recognizes_console_keys() {
        let mut b = backend(2, 2);
        b.source_mut().push_key(KeyCode::CapsLock);
        b.source_mut()
            .push_key(KeyCode::Modifier(ModifierKeyCode::LeftControl));
        let mut kp = crossterm::event::KeyEvent::new(KeyCode::Char('5'), KeyModifiers::NONE);
        kp.state = KeyEventState::KEYPAD;
        b.source_mut().push_event(Event::Key(kp));
        b.source_mut().push_release(KeyCode::Char('b'));

        let mut input = InputSnapshot::new();
        b.poll_input(&mut input).unwrap();
        assert!(input.is_down(Key::CapsLock));
        assert!(input.is_down(Key::LeftControl));
        assert!(input.is_down(Key::Kp5));
        assert!(!input.is_down(Key::B));
    }

    #[test]
    fn test_init_twice_is_an_error() {
        let mut b = backend(2, 2);
        b.init(true).unwrap();
        assert!(matches!(b.init(true), Err(TuiError::AlreadyInitialized)));
        b.shutdown().unwrap();
        b.shutdown().unwrap();
        assert!(!b.is_initialized());
    }
}
