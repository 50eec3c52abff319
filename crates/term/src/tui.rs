//! Tui: the per-frame driver tying a backend to the logical canvas.
//!
//! A frame is `begin_frame` (poll input, track size), any number of draw calls
//! on [`Tui::canvas`], then `end_frame` (present the diff, pace, measure).

use std::time::Duration;

use tracing::{debug, trace};

use crate::backend::Backend;
use crate::canvas::Canvas;
use crate::error::{Result, TuiError};
use crate::input::InputSnapshot;
use crate::timer::FrameTimer;
use crate::types::{Color, Key, Modifiers};

/// What `end_frame` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub cells_written: usize,
    pub delta: Duration,
}

pub struct Tui<B: Backend> {
    backend: B,
    canvas: Canvas,
    input: InputSnapshot,
    timer: FrameTimer,
    last_size: Option<(u16, u16)>,
}

impl<B: Backend> Tui<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            canvas: Canvas::new(0, 0),
            input: InputSnapshot::new(),
            timer: FrameTimer::new(),
            last_size: None,
        }
    }

    pub fn init(&mut self, double_buffered: bool) -> Result<()> {
        self.backend.init(double_buffered)?;
        self.last_size = None;
        self.input.clear();
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.backend.shutdown()
    }

    pub fn is_initialized(&self) -> bool {
        self.backend.is_initialized()
    }

    /// Start a frame. Returns true when the terminal size changed since the
    /// previous frame (always true for the first frame after `init`).
    pub fn begin_frame(&mut self) -> Result<bool> {
        if !self.backend.is_initialized() {
            return Err(TuiError::NotInitialized);
        }
        self.timer.begin_frame();
        self.backend.poll_input(&mut self.input)?;

        let size = self.backend.size()?;
        if self.last_size == Some(size) {
            return Ok(false);
        }
        debug!(width = size.0, height = size.1, "canvas resized");
        self.canvas.resize(size.0, size.1);
        self.last_size = Some(size);
        Ok(true)
    }

    /// Present the canvas, then sleep out the rest of the frame budget.
    pub fn end_frame(&mut self, target_fps: u32) -> Result<FrameStats> {
        if !self.backend.is_initialized() {
            return Err(TuiError::NotInitialized);
        }
        let cells_written = self.backend.present(self.canvas.buffer())?;
        let delta = self.timer.end_frame(target_fps);
        trace!(cells_written, delta_us = delta.as_micros() as u64, "frame");
        Ok(FrameStats {
            cells_written,
            delta,
        })
    }

    pub fn size(&self) -> (u16, u16) {
        self.canvas.size()
    }

    /// Duration of the previous frame in seconds, clamped to `max`.
    pub fn delta_seconds(&self, max: f32) -> f32 {
        self.timer.delta_seconds(max)
    }

    pub fn is_key_pressed(&self, key: Key, modifiers: Modifiers) -> bool {
        self.input.is_key_pressed(key, modifiers)
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    pub fn canvas(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn clear_screen(&mut self) {
        self.canvas.clear();
    }

    pub fn color(&self) -> Color {
        self.canvas.color()
    }

    pub fn set_color(&mut self, color: Color) {
        self.canvas.set_color(color);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut FrameTimer {
        &mut self.timer
    }
}
