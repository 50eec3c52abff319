//! Canvas: the logical buffer plus the current color and the drawing primitives.
//!
//! All primitives take signed coordinates and clip silently to the buffer, so
//! callers can draw partially off-screen shapes without checking bounds.
//!
//! The current color is scoped with [`Canvas::color_scope`], an RAII guard that
//! restores the previous color when dropped:
//!
//! ```
//! use threes_term::{Canvas, types::{Color, Palette}};
//!
//! let mut canvas = Canvas::new(10, 3);
//! let before = canvas.color();
//! {
//!     let mut header = canvas.color_scope(Color::new(Palette::Black, Palette::LightGray));
//!     header.draw_line(0, 0, 9, 0, ' ');
//!     {
//!         let mut title = header.color_scope(Color::new(Palette::Red, Palette::LightGray));
//!         title.draw_text(1, 0, "Title");
//!     }
//!     header.draw_text(7, 0, "q");
//! }
//! assert_eq!(canvas.color(), before);
//! ```

use std::fmt::{self, Write as _};
use std::ops::{Deref, DerefMut};

use crate::buffer::{Buffer, Cell};
use crate::types::{Color, Palette};

/// Upper bound, in bytes, on the output of one [`Canvas::draw_fmt`] call.
pub const TEXT_SCRATCH_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Default)]
pub struct Canvas {
    buffer: Buffer,
    color: Color,
    scratch: String,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            color: Color::default(),
            scratch: String::with_capacity(TEXT_SCRATCH_CAPACITY),
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    pub fn size(&self) -> (u16, u16) {
        self.buffer.size()
    }

    /// Recreate the logical buffer; all cells become default.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.buffer.resize(width, height);
    }

    /// Reset every cell to the default. The current color is untouched.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_colors(&mut self, fg: Palette, bg: Palette) {
        self.color = Color::new(fg, bg);
    }

    /// Install `color` until the returned guard is dropped.
    pub fn color_scope(&mut self, color: Color) -> ColorScope<'_> {
        let saved = self.color;
        self.color = color;
        ColorScope {
            canvas: self,
            saved,
        }
    }

    /// Run `f` with `color` installed, restoring the previous color afterwards.
    pub fn with_color<R>(&mut self, color: Color, f: impl FnOnce(&mut Canvas) -> R) -> R {
        let mut scope = self.color_scope(color);
        f(&mut *scope)
    }

    #[inline]
    fn plot(&mut self, x: i32, y: i32, glyph: char) {
        if x < 0 || y < 0 || x >= i32::from(self.width()) || y >= i32::from(self.height()) {
            return;
        }
        self.buffer.set(x as u16, y as u16, Cell::new(self.color, glyph));
    }

    /// Inclusive line from `(x0, y0)` to `(x1, y1)`.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, glyph: char) {
        let (w, h) = (i32::from(self.width()), i32::from(self.height()));
        if y0 == y1 {
            if y0 < 0 || y0 >= h {
                return;
            }
            let from = x0.min(x1).max(0);
            let to = x0.max(x1).min(w - 1);
            for x in from..=to {
                self.plot(x, y0, glyph);
            }
            return;
        }
        if x0 == x1 {
            if x0 < 0 || x0 >= w {
                return;
            }
            let from = y0.min(y1).max(0);
            let to = y0.max(y1).min(h - 1);
            for y in from..=to {
                self.plot(x0, y, glyph);
            }
            return;
        }

        // Bresenham over i64 so extreme endpoints cannot overflow the error term.
        let (mut x, mut y) = (i64::from(x0), i64::from(y0));
        let (x1, y1) = (i64::from(x1), i64::from(y1));
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            if let (Ok(px), Ok(py)) = (i32::try_from(x), i32::try_from(y)) {
                self.plot(px, py, glyph);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fill the half-open rectangle `[x, x+w) x [y, y+h)`.
    ///
    /// Negative extents span backwards from `(x, y)`.
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, glyph: char) {
        let (x0, x1) = span(x, w);
        let (y0, y1) = span(y, h);
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(i64::from(self.width()));
        let y1 = y1.min(i64::from(self.height()));
        for row in y0..y1 {
            for col in x0..x1 {
                self.plot(col as i32, row as i32, glyph);
            }
        }
    }

    /// Write a single cell.
    pub fn draw_char(&mut self, x: i32, y: i32, glyph: char) {
        self.plot(x, y, glyph);
    }

    /// Write `text` left to right on row `y`, one cell per char. No wrapping.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        if y < 0 || y >= i32::from(self.height()) {
            return;
        }
        let w = i32::from(self.width());
        let mut col = x;
        for ch in text.chars() {
            if col >= w {
                break;
            }
            self.plot(col, y, ch);
            col = col.saturating_add(1);
        }
    }

    /// Format into the scratch buffer, then draw like [`Canvas::draw_text`].
    ///
    /// Output beyond [`TEXT_SCRATCH_CAPACITY`] bytes is dropped.
    pub fn draw_fmt(&mut self, x: i32, y: i32, args: fmt::Arguments<'_>) {
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();
        let _ = BoundedWriter(&mut scratch).write_fmt(args);
        self.draw_text(x, y, &scratch);
        self.scratch = scratch;
    }

    pub fn draw_line_with(&mut self, color: Color, x0: i32, y0: i32, x1: i32, y1: i32, glyph: char) {
        self.with_color(color, |c| c.draw_line(x0, y0, x1, y1, glyph));
    }

    pub fn draw_rect_with(&mut self, color: Color, x: i32, y: i32, w: i32, h: i32, glyph: char) {
        self.with_color(color, |c| c.draw_rect(x, y, w, h, glyph));
    }

    pub fn draw_char_with(&mut self, color: Color, x: i32, y: i32, glyph: char) {
        self.with_color(color, |c| c.draw_char(x, y, glyph));
    }

    pub fn draw_text_with(&mut self, color: Color, x: i32, y: i32, text: &str) {
        self.with_color(color, |c| c.draw_text(x, y, text));
    }
}

fn span(start: i32, extent: i32) -> (i64, i64) {
    let a = i64::from(start);
    let b = a + i64::from(extent);
    (a.min(b), a.max(b))
}

struct BoundedWriter<'a>(&'a mut String);

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = TEXT_SCRATCH_CAPACITY - self.0.len();
        if s.len() <= room {
            self.0.push_str(s);
            return Ok(());
        }
        let mut end = room;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.0.push_str(&s[..end]);
        Err(fmt::Error)
    }
}

/// Scoped color: restores the color captured at creation when dropped.
///
/// Dereferences to the [`Canvas`], so drawing goes through the guard. A nested
/// scope borrows the outer guard mutably, so scopes always unwind innermost first.
pub struct ColorScope<'a> {
    canvas: &'a mut Canvas,
    saved: Color,
}

impl ColorScope<'_> {
    /// Color that will be restored on drop.
    pub fn saved(&self) -> Color {
        self.saved
    }
}

impl Deref for ColorScope<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for ColorScope<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for ColorScope<'_> {
    fn drop(&mut self) {
        self.canvas.color = self.saved;
    }
}
