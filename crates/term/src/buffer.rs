//! Cell buffer for terminal rendering.

use crate::types::Color;

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub color: Color,
    pub glyph: char,
}

impl Cell {
    pub const fn new(color: Color, glyph: char) -> Self {
        Self { color, glyph }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            color: Color::default(),
            glyph: ' ',
        }
    }
}

/// 2D row-major grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Recreate the buffer at a new size.
    ///
    /// Every cell is reset to the default, even when the size is unchanged.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.clear();
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Write one cell. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Reset every cell to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Palette;

    #[test]
    fn test_new_buffer_is_default_cells() {
        let buf = Buffer::new(3, 2);
        assert_eq!(buf.size(), (3, 2));
        assert_eq!(buf.cells().len(), 6);
        assert!(buf.cells().iter().all(|c| *c == Cell::default()));
        assert_eq!(Cell::default().glyph, ' ');
        assert_eq!(Cell::default().color, Color::new(Palette::White, Palette::Black));
    }

    #[test]
    fn test_row_major_indexing() {
        let buf = Buffer::new(4, 3);
        assert_eq!(buf.index(0, 0), Some(0));
        assert_eq!(buf.index(3, 0), Some(3));
        assert_eq!(buf.index(0, 1), Some(4));
        assert_eq!(buf.index(3, 2), Some(11));
        assert_eq!(buf.index(4, 0), None);
        assert_eq!(buf.index(0, 3), None);
    }

    #[test]
    fn test_set_out_of_range_is_ignored() {
        let mut buf = Buffer::new(2, 2);
        let cell = Cell::new(Color::default(), '#');
        buf.set(5, 5, cell);
        assert!(buf.cells().iter().all(|c| c.glyph == ' '));
        buf.set(1, 1, cell);
        assert_eq!(buf.get(1, 1), Some(cell));
    }

    #[test]
    fn test_resize_recreates_cells() {
        let mut buf = Buffer::new(2, 2);
        buf.fill(Cell::new(Color::default(), 'x'));
        buf.resize(3, 1);
        assert_eq!(buf.cells().len(), 3);
        assert!(buf.cells().iter().all(|c| *c == Cell::default()));

        buf.fill(Cell::new(Color::default(), 'x'));
        buf.resize(3, 1);
        assert!(buf.cells().iter().all(|c| *c == Cell::default()));
    }

    #[test]
    fn test_cell_equality_compares_both_fields() {
        let a = Cell::new(Color::new(Palette::Red, Palette::Black), 'a');
        let b = Cell::new(Color::new(Palette::Blue, Palette::Black), 'a');
        let c = Cell::new(Color::new(Palette::Red, Palette::Black), 'b');
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, a);
    }
}
