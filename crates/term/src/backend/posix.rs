//! PosixTerminalBackend: curses-style terminal protocol.
//!
//! Output for a frame is queued into one byte buffer and written with a single
//! `write_all`. Cursor moves are skipped for cells that follow the previous one
//! on the same row, and color escapes are only emitted when the color changes.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::Event,
    style::{Print, ResetColor, SetColors},
    terminal, QueueableCommand,
};
use tracing::{debug, info, trace};

use super::{named_colors, Backend, CellCache};
use crate::buffer::Buffer;
use crate::config::BackendKind;
use crate::error::{Result, TuiError};
use crate::input::{map_posix_key, record_key_event, InputSnapshot};
use crate::source::{CrosstermEvents, EventSource};
use crate::types::Color;

pub struct PosixTerminalBackend<W: Write = Stdout, S: EventSource = CrosstermEvents> {
    out: W,
    source: S,
    cache: CellCache,
    buf: Vec<u8>,
    initialized: bool,
    alternate: bool,
}

impl PosixTerminalBackend {
    pub fn new() -> Self {
        Self::with_io(io::stdout(), CrosstermEvents::new())
    }
}

impl Default for PosixTerminalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write, S: EventSource> PosixTerminalBackend<W, S> {
    pub fn with_io(out: W, source: S) -> Self {
        Self {
            out,
            source,
            cache: CellCache::new(),
            buf: Vec::with_capacity(64 * 1024),
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

    fn enter(&mut self, double_buffered: bool) -> io::Result<()> {
        self.buf.clear();
        if double_buffered {
            self.buf.queue(terminal::EnterAlternateScreen)?;
        }
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()
    }

    fn leave(&mut self) -> io::Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        if self.alternate {
            self.buf.queue(terminal::LeaveAlternateScreen)?;
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()
    }
}

/// Queue the changed cells of `buffer` into `out`.
///
/// `active` is the color last emitted into `out`; it is updated as cells are queued.
pub fn encode_diff_into(
    cache: &mut CellCache,
    buffer: &Buffer,
    active: &mut Option<Color>,
    out: &mut Vec<u8>,
) -> io::Result<usize> {
    let mut cursor_at: Option<(u16, u16)> = None;
    cache.diff(buffer, |x, y, cell| {
        if cursor_at != Some((x, y)) {
            out.queue(cursor::MoveTo(x, y))?;
        }
        if *active != Some(cell.color) {
            out.queue(SetColors(named_colors(cell.color)))?;
            *active = Some(cell.color);
        }
        out.queue(Print(cell.glyph))?;
        cursor_at = Some((x.saturating_add(1), y));
        Ok(())
    })
}

impl<W: Write, S: EventSource> Backend for PosixTerminalBackend<W, S> {
    fn init(&mut self, double_buffered: bool) -> Result<()> {
        if self.initialized {
            return Err(TuiError::AlreadyInitialized);
        }
        self.source
            .enable()
            .map_err(|source| TuiError::Acquire { source })?;
        self.alternate = double_buffered;
        if let Err(source) = self.enter(double_buffered) {
            let _ = self.leave();
            let _ = self.source.disable();
            return Err(TuiError::Acquire { source });
        }
        self.cache = CellCache::new();
        self.initialized = true;
        info!(backend = "posix", double_buffered, "terminal initialized");
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;
        let restored = self.leave();
        self.source.disable()?;
        restored?;
        info!(backend = "posix", "terminal restored");
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn poll_input(&mut self, input: &mut InputSnapshot) -> Result<()> {
        input.clear();
        while let Some(event) = self.source.poll()? {
            if let Event::Key(key) = event {
                record_key_event(input, &key, map_posix_key);
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
        if self.cache.size() != buffer.size() {
            debug!(width = buffer.width(), height = buffer.height(), "posix cache resized");
        }
        self.buf.clear();
        // Every frame ends with a color reset.
        let mut active = None;
        let written = encode_diff_into(&mut self.cache, buffer, &mut active, &mut self.buf)?;
        if written > 0 {
            self.buf.queue(ResetColor)?;
            self.flush_buf()?;
        }
        trace!(written, bytes = self.buf.len(), "posix present");
        Ok(written)
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Posix
    }
}

impl<W: Write, S: EventSource> Drop for PosixTerminalBackend<W, S> {
    fn drop(&mut self) {
        if self.initialized {
            let _ = self.shutdown();
        }
    }
}
