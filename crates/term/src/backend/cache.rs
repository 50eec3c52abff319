use crate::buffer::{Buffer, Cell};

/// What the backend last wrote to the physical screen.
///
/// Cells start out unknown, so the first present after creation or a resize
/// writes every cell, whatever the logical buffer holds.
#[derive(Debug, Clone, Default)]
pub struct CellCache {
    width: u16,
    height: u16,
    sized: bool,
    cells: Vec<Option<Cell>>,
}

impl CellCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Forget everything; the next diff writes every cell.
    pub fn invalidate(&mut self) {
        self.cells.fill(None);
    }

    /// Match the cache to `width` x `height`. Returns true when it had to be recreated.
    pub fn ensure_size(&mut self, width: u16, height: u16) -> bool {
        if self.sized && self.size() == (width, height) {
            return false;
        }
        self.sized = true;
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize((width as usize) * (height as usize), None);
        true
    }

    /// Visit every cell of `buffer` that differs from the cache, updating the cache as it goes.
    ///
    /// Cells are visited row by row. Returns the number of cells emitted.
    pub fn diff<E>(
        &mut self,
        buffer: &Buffer,
        mut emit: impl FnMut(u16, u16, Cell) -> Result<(), E>,
    ) -> Result<usize, E> {
        self.ensure_size(buffer.width(), buffer.height());
        let width = buffer.width() as usize;
        let mut written = 0;
        for (i, (cached, &cell)) in self.cells.iter_mut().zip(buffer.cells()).enumerate() {
            if *cached == Some(cell) {
                continue;
            }
            emit((i % width) as u16, (i / width) as u16, cell)?;
            *cached = Some(cell);
            written += 1;
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;
    use std::convert::Infallible;

    fn count(cache: &mut CellCache, buffer: &Buffer) -> usize {
        cache.diff(buffer, |_, _, _| Ok::<_, Infallible>(())).unwrap()
    }

    #[test]
    fn test_first_diff_writes_everything() {
        let mut cache = CellCache::new();
        let buffer = Buffer::new(4, 3);
        assert_eq!(count(&mut cache, &buffer), 12);
        assert_eq!(count(&mut cache, &buffer), 0);
    }

    #[test]
    fn test_only_changed_cells_are_written() {
        let mut cache = CellCache::new();
        let mut buffer = Buffer::new(4, 3);
        count(&mut cache, &buffer);
        buffer.set(1, 2, Cell::new(Color::default(), 'x'));
        buffer.set(3, 0, Cell::new(Color::default(), 'y'));

        let mut seen = Vec::new();
        let n = cache
            .diff(&buffer, |x, y, cell| {
                seen.push((x, y, cell.glyph));
                Ok::<_, Infallible>(())
            })
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(seen, vec![(3, 0, 'y'), (1, 2, 'x')]);
    }

    #[test]
    fn test_resize_forces_full_repaint() {
        let mut cache = CellCache::new();
        count(&mut cache, &Buffer::new(4, 3));
        assert_eq!(count(&mut cache, &Buffer::new(5, 2)), 10);
        assert_eq!(cache.size(), (5, 2));
    }

    #[test]
    fn test_invalidate() {
        let mut cache = CellCache::new();
        let buffer = Buffer::new(2, 2);
        count(&mut cache, &buffer);
        cache.invalidate();
        assert_eq!(count(&mut cache, &buffer), 4);
    }

    #[test]
    fn test_emit_error_stops_diff() {
        let mut cache = CellCache::new();
        let buffer = Buffer::new(3, 1);
        let err = cache.diff(&buffer, |x, _, _| if x == 1 { Err("boom") } else { Ok(()) });
        assert_eq!(err, Err("boom"));
        // Cell 0 was written, cells 1 and 2 are still unknown.
        assert_eq!(count(&mut cache, &buffer), 2);
    }
}
