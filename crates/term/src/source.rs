//! Event sources feeding the backends.
//!
//! [`CrosstermEvents`] talks to the real terminal. [`ScriptedEvents`] replays a
//! queue of events with a settable size, so backends and the frame driver run
//! headless in tests.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// Raw-mode switch, non-blocking event reads and size queries.
pub trait EventSource {
    /// Put the terminal in raw mode (no echo, no line buffering).
    fn enable(&mut self) -> io::Result<()>;
    fn disable(&mut self) -> io::Result<()>;
    /// Next pending event, without blocking.
    fn poll(&mut self) -> io::Result<Option<Event>>;
    /// Terminal size in columns and rows.
    fn size(&self) -> io::Result<(u16, u16)>;
}

/// The process's controlling terminal.
#[derive(Debug, Default)]
pub struct CrosstermEvents {
    raw: bool,
}

impl CrosstermEvents {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSource for CrosstermEvents {
    fn enable(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        Ok(())
    }

    fn disable(&mut self) -> io::Result<()> {
        if self.raw {
            self.raw = false;
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    fn poll(&mut self) -> io::Result<Option<Event>> {
        if event::poll(Duration::ZERO)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

/// Headless event source.
#[derive(Debug, Clone)]
pub struct ScriptedEvents {
    queue: VecDeque<Event>,
    size: (u16, u16),
    raw: bool,
    fail_enable: bool,
}

impl ScriptedEvents {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            queue: VecDeque::new(),
            size: (width, height),
            raw: false,
            fail_enable: false,
        }
    }

    /// Make the next `enable` fail, as if no terminal were attached.
    pub fn failing() -> Self {
        Self {
            fail_enable: true,
            ..Self::new(0, 0)
        }
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.size = (width, height);
    }

    pub fn push_event(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    pub fn push_key(&mut self, code: KeyCode) {
        self.push_key_with(code, KeyModifiers::NONE);
    }

    pub fn push_key_with(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.push_event(Event::Key(KeyEvent::new(code, modifiers)));
    }

    pub fn push_release(&mut self, code: KeyCode) {
        let mut key = KeyEvent::new(code, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        self.push_event(Event::Key(key));
    }

    /// Events not yet consumed.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }
}

impl EventSource for ScriptedEvents {
    fn enable(&mut self) -> io::Result<()> {
        if self.fail_enable {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no terminal attached"));
        }
        self.raw = true;
        Ok(())
    }

    fn disable(&mut self) -> io::Result<()> {
        self.raw = false;
        Ok(())
    }

    fn poll(&mut self) -> io::Result<Option<Event>> {
        Ok(self.queue.pop_front())
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        Ok(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_events_drain_in_order() {
        let mut src = ScriptedEvents::new(10, 5);
        src.push_key(KeyCode::Left);
        src.push_event(Event::FocusGained);
        assert_eq!(src.pending(), 2);
        assert!(matches!(src.poll().unwrap(), Some(Event::Key(k)) if k.code == KeyCode::Left));
        assert_eq!(src.poll().unwrap(), Some(Event::FocusGained));
        assert_eq!(src.poll().unwrap(), None);
    }

    #[test]
    fn test_scripted_size_and_raw_mode() {
        let mut src = ScriptedEvents::new(10, 5);
        assert_eq!(src.size().unwrap(), (10, 5));
        src.set_size(20, 8);
        assert_eq!(src.size().unwrap(), (20, 8));
        src.enable().unwrap();
        assert!(src.is_raw());
        src.disable().unwrap();
        assert!(!src.is_raw());
    }

    #[test]
    fn test_failing_source() {
        let mut src = ScriptedEvents::failing();
        assert!(src.enable().is_err());
        assert!(!src.is_raw());
    }
}
