//! Cell: The atomic unit of the display grid.
//!
//! # Memory Layout
//!
//! A cell is four bytes: one glyph byte, two palette indices and a flag
//! byte. Colors are resolved through the [`Theme`](crate::theme::Theme)
//! only when a changed cell is turned into a draw instruction.
//!
//! ```text
//! ┌────────┬────────────┬────────────┬─────────┐
//! │   ch   │     fg     │     bg     │  flags  │
//! │   u8   │ ThemeColor │ ThemeColor │  u8     │
//! └────────┴────────────┴────────────┴─────────┘
//! ```

use crate::theme::ThemeColor;
use bitflags::bitflags;

bitflags! {
    /// Cell-level flags for special states.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Content unknown (freshly allocated buffer). A stale cell never
        /// equals a laid-out cell, so the next diff repaints it.
        const STALE = 0b0000_0001;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// One character position of the grid.
///
/// Cells compare by full value. A cell whose glyph byte is `0` is empty:
/// only its background is painted.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Glyph byte (0 = empty).
    ch: u8,
    /// Foreground palette slot.
    fg: ThemeColor,
    /// Background palette slot.
    bg: ThemeColor,
    /// Cell flags.
    flags: CellFlags,
}

const _: () = assert!(std::mem::size_of::<Cell>() == 4, "Cell must stay 4 bytes");

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell on the default background.
    pub const EMPTY: Self = Self {
        ch: 0,
        fg: ThemeColor::BackNormal,
        bg: ThemeColor::BackNormal,
        flags: CellFlags::empty(),
    };

    /// A cell with unknown content; mismatches every laid-out cell.
    pub const STALE: Self = Self {
        ch: 0,
        fg: ThemeColor::BackNormal,
        bg: ThemeColor::BackNormal,
        flags: CellFlags::STALE,
    };

    /// Create a cell showing `ch` with the given palette slots.
    #[inline]
    pub const fn new(ch: u8, fg: ThemeColor, bg: ThemeColor) -> Self {
        Self {
            ch,
            fg,
            bg,
            flags: CellFlags::empty(),
        }
    }

    /// The glyph byte (0 for an empty cell).
    #[inline]
    pub const fn ch(&self) -> u8 {
        self.ch
    }

    /// Whether this cell has no glyph.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.ch == 0
    }

    /// Whether this cell's content is unknown.
    #[inline]
    pub const fn is_stale(&self) -> bool {
        self.flags.contains(CellFlags::STALE)
    }

    /// Foreground palette slot.
    #[inline]
    pub const fn fg(&self) -> ThemeColor {
        self.fg
    }

    /// Background palette slot.
    #[inline]
    pub const fn bg(&self) -> ThemeColor {
        self.bg
    }

}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("Cell");
        if self.ch.is_ascii_graphic() || self.ch == b' ' {
            s.field("ch", &(self.ch as char));
        } else {
            s.field("ch", &format_args!("{:#04x}", self.ch));
        }
        s.field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("flags", &self.flags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size() {
        assert_eq!(std::mem::size_of::<Cell>(), 4);
    }

    #[test]
    fn test_cell_new() {
        let cell = Cell::new(b'A', ThemeColor::Opcode, ThemeColor::BackNormal);
        assert_eq!(cell.ch(), b'A');
        assert_eq!(cell.fg(), ThemeColor::Opcode);
        assert_eq!(cell.bg(), ThemeColor::BackNormal);
        assert!(!cell.is_empty());
        assert!(!cell.is_stale());
    }

    #[test]
    fn test_cell_equality_is_by_value() {
        let a = Cell::new(b'A', ThemeColor::Code, ThemeColor::BackNormal);
        let b = Cell::new(b'A', ThemeColor::Code, ThemeColor::BackNormal);
        let c = Cell::new(b'A', ThemeColor::Text, ThemeColor::BackNormal);
        let d = Cell::new(b'A', ThemeColor::Code, ThemeColor::BackSelection);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_stale_never_equals_empty() {
        assert!(Cell::STALE.is_empty());
        assert!(Cell::STALE.is_stale());
        assert_ne!(Cell::STALE, Cell::EMPTY);
    }

    #[test]
    fn test_cell_default_is_empty() {
        assert_eq!(Cell::default(), Cell::EMPTY);
    }
}
