//! Session: One open text buffer and the display state that goes with it.
//!
//! A session owns the text, its lexemes, the double-buffered cell grid and
//! the view state. Every mutation marks the session invalid; [`Session::render`]
//! rebuilds the back buffer, diffs it against the front buffer and commits it.
//! All operations run to completion on the caller's thread.

use std::path::Path;
use std::sync::Arc;
use std::{fs, io};

use tracing::{debug, trace, warn};

use crate::buffer::diff::diff;
use crate::buffer::{cells_for_pixels, CellGrid, Frame};
use crate::error::Result;
use crate::layout::{clamp_scroll, extent, layout, Point};
use crate::syntax::{tokenize, Lexeme};
use crate::theme::Theme;

/// Scroll position and validity of the displayed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Offset applied at the last rebuild, in cells (never positive).
    pub scroll: Point,
    /// Scroll input received since the last rebuild.
    pub pending: Point,
    /// Whether the front buffer reflects the current text and view.
    pub valid: bool,
}

/// An editing and display session over a single text buffer.
#[derive(Debug, Clone)]
pub struct Session {
    text: Vec<u8>,
    lexemes: Vec<Lexeme>,
    grid: CellGrid,
    view: ViewState,
    theme: Arc<Theme>,
}

impl Session {
    /// Create a session over `text`. The grid starts with zero area, so
    /// nothing renders until the first [`Session::on_resize`].
    pub fn load_text(text: impl Into<Vec<u8>>, theme: Arc<Theme>) -> Self {
        let text = text.into();
        let lexemes = tokenize(&text);
        Self {
            text,
            lexemes,
            grid: CellGrid::default(),
            view: ViewState::default(),
            theme,
        }
    }

    /// Create a session over the contents of `path`.
    ///
    /// A file that does not exist gives an empty buffer.
    pub fn open(path: &Path, theme: Arc<Theme>) -> Result<Self> {
        let text = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(target: "session", path = %path.display(), "file_not_found_starting_empty");
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };
        debug!(target: "session", path = %path.display(), bytes = text.len(), "file_opened");
        Ok(Self::load_text(text, theme))
    }

    /// The text buffer.
    #[inline]
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Lexemes of the current text.
    #[inline]
    pub fn lexemes(&self) -> &[Lexeme] {
        &self.lexemes
    }

    /// The cell grid.
    #[inline]
    pub const fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// The view state.
    #[inline]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// The palette used to resolve cell colors.
    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Whether the next [`Session::render`] would be a no-op.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.view.valid
    }

    /// Force the next render to rebuild.
    #[inline]
    pub fn invalidate(&mut self) {
        self.view.valid = false;
    }

    fn retokenize(&mut self) {
        self.lexemes = tokenize(&self.text);
        self.invalidate();
    }

    /// Append a byte to the text.
    ///
    /// Printable bytes, `\r` and `\t` are accepted; other control bytes are
    /// ignored. Returns whether the text changed.
    pub fn on_insert_char(&mut self, byte: u8) -> bool {
        if byte < 0x20 && byte != b'\r' && byte != b'\t' {
            return false;
        }
        self.text.push(byte);
        self.retokenize();
        true
    }

    /// Remove the last byte of the text. Returns whether the text changed.
    pub fn on_delete_last_char(&mut self) -> bool {
        if self.text.pop().is_none() {
            return false;
        }
        self.retokenize();
        true
    }

    /// Queue a scroll by (`dx`, `dy`) cells, applied at the next rebuild.
    pub fn on_scroll(&mut self, dx: i32, dy: i32) {
        self.view.pending += Point::new(dx, dy);
        self.invalidate();
    }

    /// Adapt the grid to a viewport of `pixel_width × pixel_height`.
    ///
    /// Returns whether the grid was reallocated; if so every cell is
    /// repainted by the next render.
    pub fn on_resize(&mut self, pixel_width: u32, pixel_height: u32) -> bool {
        let (columns, rows) = cells_for_pixels(pixel_width, pixel_height);
        if !self.grid.resize(columns, rows) {
            return false;
        }
        debug!(target: "session", columns, rows, "grid_resized");
        self.invalidate();
        true
    }

    /// Fold pending scroll input into the scroll offset, clamped to the text.
    fn fold_scroll(&mut self) {
        let mut scroll = self.view.scroll;
        scroll += self.view.pending;
        self.view.pending = Point::ZERO;
        self.view.scroll = clamp_scroll(scroll, extent(&self.text));
    }

    /// Rebuild the frame if anything changed and describe how to repaint it.
    ///
    /// Returns [`Frame::EMPTY`] when the session is valid or the grid has
    /// zero area; such a frame must not be presented.
    pub fn render(&mut self) -> Frame {
        if self.view.valid || self.grid.is_empty() {
            return Frame::EMPTY;
        }

        self.fold_scroll();

        let back = self.grid.back_mut();
        back.clear();
        let lines = layout(back, &self.text, &self.lexemes, self.view.scroll);

        let (front, back) = self.grid.pair();
        let frame = diff(front, back, &self.theme);
        self.grid.swap();
        self.view.valid = true;

        trace!(
            target: "session",
            lines,
            cells = frame.cells_changed(),
            dirty = ?frame.dirty,
            "rendered"
        );
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{DrawInstruction, GLYPH_HEIGHT, GLYPH_WIDTH};
    use crate::layout::{Rect, CURSOR_GLYPH};
    use crate::syntax::Category;
    use std::io::Write;

    fn session(text: &str) -> Session {
        Session::load_text(text, Arc::new(Theme::dark()))
    }

    /// A session sized to `columns × rows` cells, with its first frame rendered.
    fn rendered(text: &str, columns: u32, rows: u32) -> Session {
        let mut s = session(text);
        s.on_resize(columns * GLYPH_WIDTH, rows * GLYPH_HEIGHT);
        s.render();
        s
    }

    fn glyphs(frame: &Frame) -> Vec<((u32, u32), u8)> {
        frame
            .instructions
            .iter()
            .filter_map(|i| match i {
                DrawInstruction::Glyph { ch, .. } => Some((i.cell(), *ch)),
                DrawInstruction::Fill { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_load_text_tokenizes() {
        let s = session("int x;");
        assert_eq!(s.lexemes()[0].category, Category::Opcode);
        assert!(!s.is_valid());
    }

    #[test]
    fn test_render_without_grid_is_empty() {
        let mut s = session("abc");
        assert_eq!(s.render(), Frame::EMPTY);
        assert!(!s.is_valid());
    }

    #[test]
    fn test_first_render_covers_viewport() {
        let mut s = session("int x;");
        assert!(s.on_resize(800, 600));
        assert_eq!((s.grid().columns(), s.grid().rows()), (89, 38));

        let frame = s.render();
        assert_eq!(frame.cells_changed(), 89 * 38);
        assert_eq!(frame.dirty, Rect::new(0, 0, 89 * 9, 38 * 16));
        assert!(s.is_valid());
    }

    #[test]
    fn test_render_when_valid_is_noop() {
        let mut s = rendered("abc", 20, 4);
        assert!(s.render().is_empty());
        assert!(s.render().is_empty());
    }

    #[test]
    fn test_resize_repaints_everything() {
        let mut s = rendered("abc", 20, 4);
        assert!(s.on_resize(10 * 9, 4 * 16));
        assert!(!s.is_valid());

        let frame = s.render();
        assert_eq!(frame.cells_changed(), 40);
        assert_eq!(frame.dirty, Rect::new(0, 0, 90, 64));
    }

    #[test]
    fn test_resize_same_cells_is_noop() {
        let mut s = rendered("abc", 20, 4);
        // 175 px still rounds up to 20 columns
        assert!(!s.on_resize(175, 64));
        assert!(s.is_valid());
    }

    #[test]
    fn test_resize_shape_change_with_same_area() {
        let mut s = rendered("abc", 20, 4);
        assert!(s.on_resize(40 * 9, 2 * 16));
        assert_eq!(s.grid().columns(), 40);
        assert_eq!(s.grid().rows(), 2);
        assert_eq!(s.render().cells_changed(), 80);
    }

    #[test]
    fn test_resize_to_zero_area() {
        let mut s = rendered("abc", 20, 4);
        assert!(s.on_resize(0, 0));
        assert!(s.grid().is_empty());
        assert_eq!(s.render(), Frame::EMPTY);

        assert!(s.on_resize(9, 16));
        assert_eq!(s.render().cells_changed(), 1);
    }

    #[test]
    fn test_insert_repaints_only_changed_cells() {
        let mut s = rendered("ab", 20, 4);
        assert!(s.on_insert_char(b'c'));
        assert!(!s.is_valid());

        let frame = s.render();
        assert_eq!(glyphs(&frame), vec![((7, 0), b'c'), ((8, 0), CURSOR_GLYPH)]);
        assert_eq!(frame.dirty, Rect::new(63, 0, 81, 16));
    }

    #[test]
    fn test_insert_rejects_control_bytes() {
        let mut s = rendered("ab", 20, 4);
        for byte in [0x00, 0x07, b'\n', 0x1B, 0x1F] {
            assert!(!s.on_insert_char(byte));
        }
        assert!(s.is_valid());
        assert_eq!(s.text(), b"ab");

        assert!(s.on_insert_char(b'\t'));
        assert!(s.on_insert_char(b'\r'));
        assert!(s.on_insert_char(0xFF));
        assert_eq!(s.text(), b"ab\t\r\xFF");
    }

    #[test]
    fn test_insert_reclassifies() {
        let mut s = rendered("in", 20, 4);
        s.on_insert_char(b't');
        assert_eq!(s.lexemes()[0].category, Category::Opcode);

        // Keyword color repaints the whole word
        let frame = s.render();
        let cells: Vec<_> = glyphs(&frame).into_iter().map(|(cell, _)| cell).collect();
        assert_eq!(cells, vec![(5, 0), (6, 0), (7, 0), (8, 0)]);
    }

    #[test]
    fn test_delete_last_char() {
        let mut s = rendered("abc", 20, 4);
        assert!(s.on_delete_last_char());
        assert_eq!(s.text(), b"ab");

        let frame = s.render();
        assert_eq!(frame.cells_changed(), 2);
        assert_eq!(glyphs(&frame), vec![((7, 0), CURSOR_GLYPH)]);
        assert!(matches!(frame.instructions[1], DrawInstruction::Fill { .. }));
    }

    #[test]
    fn test_delete_on_empty_text() {
        let mut s = rendered("", 20, 4);
        assert!(!s.on_delete_last_char());
        assert!(s.is_valid());
    }

    #[test]
    fn test_scroll_is_folded_at_render() {
        let mut s = rendered("a\nb\nc", 20, 4);
        s.on_scroll(0, -1);
        assert_eq!(s.view().pending, Point::new(0, -1));
        assert_eq!(s.view().scroll, Point::ZERO);

        s.render();
        assert_eq!(s.view().pending, Point::ZERO);
        assert_eq!(s.view().scroll, Point::new(0, -1));
        assert_eq!(s.grid().front().get(5, 0).unwrap().ch(), b'b');
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut s = rendered("a\nb\nc", 20, 4);
        s.on_scroll(0, -10);
        s.render();
        assert_eq!(s.view().scroll, Point::new(0, -2));

        s.on_scroll(0, 5);
        s.render();
        assert_eq!(s.view().scroll, Point::ZERO);

        s.on_scroll(-3, 0);
        s.render();
        assert_eq!(s.view().scroll, Point::new(-1, 0));
    }

    #[test]
    fn test_scroll_accumulates_until_render() {
        let mut s = rendered("a\nb\nc\nd", 20, 4);
        s.on_scroll(0, -1);
        s.on_scroll(0, -1);
        s.render();
        assert_eq!(s.view().scroll, Point::new(0, -2));
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let s = Session::open(&dir.path().join("absent.c"), Arc::new(Theme::dark())).unwrap();
        assert!(s.text().is_empty());
        assert!(s.lexemes().is_empty());
    }

    #[test]
    fn test_open_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"#include <stdio.h>\n").unwrap();
        let s = Session::open(file.path(), Arc::new(Theme::dark())).unwrap();
        assert_eq!(s.text(), b"#include <stdio.h>\n");
        assert_eq!(s.lexemes()[0].category, Category::Argument);
    }
}
