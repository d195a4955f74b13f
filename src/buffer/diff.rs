//! Diffing Engine: Turn the change between two frames into draw instructions.
//!
//! This module implements the repaint-minimizing logic:
//! 1. Compare the front (committed) and back (rebuilt) buffers cell by cell
//! 2. Emit one instruction per changed cell: a glyph blit, or a background
//!    fill for cells that became empty
//! 3. Accumulate the bounding rectangle of all changes, in pixels
//!
//! Unchanged cells produce nothing, and a frame with no changes carries an
//! empty rectangle so the presenter can skip it entirely.

use super::{Buffer, Cell, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::layout::Rect;
use crate::theme::{Rgb, Theme};

/// One repaint operation for a single glyph cell, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawInstruction {
    /// Rasterize `ch` with its top-left corner at (`x`, `y`).
    Glyph {
        /// Glyph byte.
        ch: u8,
        /// Foreground color.
        fg: Rgb,
        /// Background color.
        bg: Rgb,
        /// Left edge in pixels.
        x: u32,
        /// Top edge in pixels.
        y: u32,
    },
    /// Paint one glyph-cell-sized rectangle with a solid color.
    Fill {
        /// Fill color.
        color: Rgb,
        /// Pixel rectangle, exactly one cell in size.
        rect: Rect,
    },
}

impl DrawInstruction {
    /// Top-left corner in pixels.
    #[inline]
    pub const fn origin(&self) -> (u32, u32) {
        match self {
            Self::Glyph { x, y, .. } => (*x, *y),
            Self::Fill { rect, .. } => (rect.left, rect.top),
        }
    }

    /// Grid cell (column, row) this instruction repaints.
    #[inline]
    pub const fn cell(&self) -> (u32, u32) {
        let (x, y) = self.origin();
        (x / GLYPH_WIDTH, y / GLYPH_HEIGHT)
    }
}

/// Output of a render: what changed, and how to repaint it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Pixel bounding box of every changed cell (exclusive right/bottom).
    pub dirty: Rect,
    /// Repaint operations in row-major order.
    pub instructions: Vec<DrawInstruction>,
}

impl Frame {
    /// A frame with no changes.
    pub const EMPTY: Self = Self {
        dirty: Rect::EMPTY,
        instructions: Vec::new(),
    };

    /// Whether nothing changed; such a frame must not be presented.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dirty.is_empty()
    }

    /// Number of cells repainted.
    #[inline]
    pub fn cells_changed(&self) -> usize {
        self.instructions.len()
    }
}

/// Build the repaint instruction for a changed cell at grid (col, row).
#[inline]
fn instruction_for(cell: &Cell, col: u32, row: u32, theme: &Theme) -> DrawInstruction {
    let x = col * GLYPH_WIDTH;
    let y = row * GLYPH_HEIGHT;
    let bg = theme[cell.bg()];

    if cell.is_empty() {
        DrawInstruction::Fill {
            color: bg,
            rect: Rect::from_origin(x, y, GLYPH_WIDTH, GLYPH_HEIGHT),
        }
    } else {
        DrawInstruction::Glyph {
            ch: cell.ch(),
            fg: theme[cell.fg()],
            bg,
            x,
            y,
        }
    }
}

/// Compare two frames of the same size and describe how to get from
/// `front` to `back`.
///
/// Cells are visited in row-major order and compared by full value. The
/// returned rectangle is the pixel bounding box of every mismatch, with
/// exclusive right/bottom edges; it is empty when the frames are identical.
pub fn diff(front: &Buffer, back: &Buffer, theme: &Theme) -> Frame {
    debug_assert_eq!(front.width(), back.width());
    debug_assert_eq!(front.height(), back.height());

    let width = usize::from(back.width().max(1));
    let mut changed = Rect::EMPTY;
    let mut instructions = Vec::new();

    for (idx, (old, new)) in front.cells().iter().zip(back.cells()).enumerate() {
        // Skip if cells are identical
        if old == new {
            continue;
        }

        let col = (idx % width) as u32;
        let row = (idx / width) as u32;
        instructions.push(instruction_for(new, col, row, theme));
        changed.include(col, row);
    }

    Frame {
        dirty: changed.scale(GLYPH_WIDTH, GLYPH_HEIGHT),
        instructions,
    }
}

/// Instructions that repaint every cell of `buffer`, ignoring any previous frame.
pub fn full(buffer: &Buffer, theme: &Theme) -> Frame {
    let stale = Buffer::stale(buffer.width(), buffer.height());
    diff(&stale, buffer, theme)
}
