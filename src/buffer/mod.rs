//! Buffer module: Core data structures for the double-buffer rendering system.
//!
//! This module contains:
//! - [`Cell`]: One glyph position with its palette slots
//! - [`Buffer`]: A grid of cells sized to the viewport
//! - [`CellGrid`]: The front/back buffer pair
//! - [`diff`]: Diffing engine producing per-cell draw instructions

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;
mod grid;

pub use buffer::Buffer;
pub use cell::{Cell, CellFlags};
pub use diff::{DrawInstruction, Frame};
pub use grid::{cells_for_pixels, CellGrid};

/// Width of one glyph cell in pixels.
pub const GLYPH_WIDTH: u32 = 9;
/// Height of one glyph cell in pixels.
pub const GLYPH_HEIGHT: u32 = 16;
