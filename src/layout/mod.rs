//! Layout module: Placing text into the cell grid.
//!
//! Layout runs on every rebuild. There is no retained structure between
//! frames: the back buffer is cleared and the whole text is painted again.

mod rect;
mod text;

pub use rect::Rect;
pub use text::{
    clamp_scroll, extent, layout, Extent, Point, CURSOR_GLYPH, GUTTER_WIDTH, TAB_WIDTH,
    TEXT_MARGIN,
};
