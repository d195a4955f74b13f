//! `CellGrid`: The double-buffered pair of cell grids.
//!
//! `front` holds the last committed frame, `back` is rebuilt on every render.
//! After a rebuild the two swap roles by exchanging ownership, so the frame
//! just built becomes the reference for the next diff.

use super::{Buffer, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Viewport size in character cells for a pixel size, rounding up partial cells.
#[inline]
pub const fn cells_for_pixels(pixel_width: u32, pixel_height: u32) -> (u16, u16) {
    let columns = pixel_width.div_ceil(GLYPH_WIDTH);
    let rows = pixel_height.div_ceil(GLYPH_HEIGHT);
    (clamp_u16(columns), clamp_u16(rows))
}

#[inline]
const fn clamp_u16(value: u32) -> u16 {
    if value > u16::MAX as u32 {
        u16::MAX
    } else {
        value as u16
    }
}

/// Front and back cell buffers of identical size.
#[derive(Debug, Clone, Default)]
pub struct CellGrid {
    front: Buffer,
    back: Buffer,
}

impl CellGrid {
    /// Create a grid of `columns × rows` whose content is unknown, so the
    /// first diff repaints every cell.
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            front: Buffer::stale(columns, rows),
            back: Buffer::stale(columns, rows),
        }
    }

    /// Width in columns.
    #[inline]
    pub const fn columns(&self) -> u16 {
        self.front.width()
    }

    /// Height in rows.
    #[inline]
    pub const fn rows(&self) -> u16 {
        self.front.height()
    }

    /// Whether the grid has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front.is_empty()
    }

    /// The last committed frame.
    #[inline]
    pub const fn front(&self) -> &Buffer {
        &self.front
    }

    /// The frame being rebuilt.
    #[inline]
    pub const fn back(&self) -> &Buffer {
        &self.back
    }

    /// Mutable access to the frame being rebuilt.
    #[inline]
    pub fn back_mut(&mut self) -> &mut Buffer {
        &mut self.back
    }

    /// Both buffers at once, for diffing.
    #[inline]
    pub const fn pair(&self) -> (&Buffer, &Buffer) {
        (&self.front, &self.back)
    }

    /// Reallocate both buffers for a new size.
    ///
    /// Content is not preserved: every cell becomes stale. Returns `false`
    /// (and keeps the current buffers) when the size is unchanged.
    pub fn resize(&mut self, columns: u16, rows: u16) -> bool {
        if columns == self.columns() && rows == self.rows() {
            return false;
        }
        *self = Self::new(columns, rows);
        true
    }

    /// Commit the back buffer: it becomes the front, and the old front
    /// becomes the next back buffer.
    pub fn swap(&mut self) {
        self.front.swap(&mut self.back);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Cell;
    use crate::theme::ThemeColor;

    #[test]
    fn test_cells_for_pixels() {
        assert_eq!(cells_for_pixels(800, 600), (89, 38));
        assert_eq!(cells_for_pixels(9, 16), (1, 1));
        assert_eq!(cells_for_pixels(10, 17), (2, 2));
        assert_eq!(cells_for_pixels(0, 0), (0, 0));
        assert_eq!(cells_for_pixels(u32::MAX, 16), (u16::MAX, 1));
    }

    #[test]
    fn test_new_grid_is_stale() {
        let grid = CellGrid::new(4, 3);
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.rows(), 3);
        assert!(grid.front().cells().iter().all(Cell::is_stale));
        assert!(grid.back().cells().iter().all(Cell::is_stale));
    }

    #[test]
    fn test_swap_exchanges_roles() {
        let mut grid = CellGrid::new(2, 2);
        grid.back_mut().clear();
        grid.back_mut()
            .set(0, 0, Cell::new(b'Z', ThemeColor::Code, ThemeColor::BackNormal));
        grid.swap();
        assert_eq!(grid.front().get(0, 0).unwrap().ch(), b'Z');
        assert!(grid.back().get(0, 0).unwrap().is_stale());
    }

    #[test]
    fn test_resize_reallocates() {
        let mut grid = CellGrid::new(2, 2);
        grid.back_mut().clear();
        grid.swap();

        assert!(!grid.resize(2, 2));
        assert!(!grid.front().get(0, 0).unwrap().is_stale());

        assert!(grid.resize(3, 2));
        assert_eq!(grid.columns(), 3);
        assert!(grid.front().cells().iter().all(Cell::is_stale));

        // Same cell count, different shape still reallocates
        assert!(grid.resize(2, 3));
        assert_eq!((grid.columns(), grid.rows()), (2, 3));
    }

    #[test]
    fn test_resize_to_zero() {
        let mut grid = CellGrid::new(5, 5);
        assert!(grid.resize(0, 0));
        assert!(grid.is_empty());
        assert!(grid.front().is_empty());
        assert!(grid.back().is_empty());
    }
}
