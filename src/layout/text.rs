//! Text layout: Paint a classified text buffer into a cell buffer.
//!
//! The main pass walks the text once, painting each lexeme in its category
//! color and every uncovered byte (whitespace) in the Code color. Line breaks
//! and tabs move the pen without occupying a cell; anything that lands
//! outside the buffer is dropped. A cursor glyph follows the text, and a
//! line-number gutter is painted separately in the left margin.

use crate::buffer::{Buffer, Cell};
use crate::syntax::Lexeme;
use crate::theme::ThemeColor;

/// Columns reserved for line numbers.
pub const GUTTER_WIDTH: i32 = 3;
/// Column where line starts are painted.
pub const TEXT_MARGIN: i32 = 5;
/// Tab stops fall on multiples of this many columns.
pub const TAB_WIDTH: i32 = 4;
/// Glyph used for the cursor cell (half block in the bitmap font).
pub const CURSOR_GLYPH: u8 = 0xDD;

/// A signed grid offset in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column offset.
    pub x: i32,
    /// Row offset.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const ZERO: Self = Self::new(0, 0);
}

impl std::ops::AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x = self.x.saturating_add(rhs.x);
        self.y = self.y.saturating_add(rhs.y);
    }
}

/// Size of the laid-out text in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    /// Widest line, tabs expanded.
    pub columns: i32,
    /// Number of lines (line breaks + 1).
    pub lines: i32,
}

/// Measure `text` the way [`layout`] would place it.
pub fn extent(text: &[u8]) -> Extent {
    let mut col = 0i32;
    let mut extent = Extent {
        columns: 0,
        lines: 1,
    };
    for &b in text {
        match b {
            b'\n' | b'\r' => {
                col = 0;
                extent.lines = extent.lines.saturating_add(1);
            }
            b'\t' => col = next_tab_stop(col),
            _ => col = col.saturating_add(1),
        }
        extent.columns = extent.columns.max(col);
    }
    extent
}

/// Clamp a scroll offset so the text cannot be pushed away from the origin
/// and at least its last line (and last column) stays reachable.
pub fn clamp_scroll(scroll: Point, extent: Extent) -> Point {
    Point::new(
        scroll.x.clamp(-extent.columns, 0),
        scroll.y.clamp(-(extent.lines - 1).max(0), 0),
    )
}

#[inline]
const fn next_tab_stop(col: i32) -> i32 {
    (col / TAB_WIDTH + 1) * TAB_WIDTH
}

/// Pen state while painting the main text.
struct Pen<'a> {
    buffer: &'a mut Buffer,
    /// Screen column of a line's first byte.
    line_start: i32,
    /// Column within the current line.
    col: i32,
    /// Screen row.
    row: i32,
}

impl Pen<'_> {
    fn print(&mut self, bytes: &[u8], fg: ThemeColor) {
        for &b in bytes {
            match b {
                b'\n' | b'\r' => {
                    self.col = 0;
                    self.row = self.row.saturating_add(1);
                }
                b'\t' => self.col = next_tab_stop(self.col),
                _ => {
                    let x = self.line_start.saturating_add(self.col);
                    // Never paint over the gutter.
                    if x >= TEXT_MARGIN {
                        self.buffer
                            .put(x, self.row, Cell::new(b, fg, ThemeColor::BackNormal));
                    }
                    self.col = self.col.saturating_add(1);
                }
            }
        }
    }
}

/// Paint `text` into `buffer`, offset by `scroll`.
///
/// `lexemes` must be the tokenizer's output for `text`. The buffer is not
/// cleared first. Returns the number of lines painted (including the line
/// holding the cursor), which is also the number of gutter entries.
pub fn layout(buffer: &mut Buffer, text: &[u8], lexemes: &[Lexeme], scroll: Point) -> i32 {
    let mut pen = Pen {
        buffer,
        line_start: TEXT_MARGIN.saturating_add(scroll.x),
        col: 0,
        row: scroll.y,
    };

    let mut lexemes = lexemes.iter().peekable();
    let mut i = 0;
    while i < text.len() {
        while lexemes.next_if(|lex| lex.offset < i).is_some() {}

        if let Some(lex) = lexemes.next_if(|lex| lex.offset == i) {
            let end = lex.end().min(text.len());
            pen.print(&text[i..end], lex.category.into());
            i = end;
        } else {
            pen.print(&text[i..=i], ThemeColor::Code);
            i += 1;
        }
    }

    pen.print(&[CURSOR_GLYPH], ThemeColor::Cursor);

    let lines = pen.row.saturating_sub(scroll.y).saturating_add(1);
    gutter(pen.buffer, scroll.y, lines);
    lines
}

/// Paint 0-based line numbers, right-justified in the gutter, for `lines`
/// lines starting at screen row `top`.
fn gutter(buffer: &mut Buffer, top: i32, lines: i32) {
    let first = (-top).max(0);
    let last = lines.min(i32::from(buffer.height()).saturating_sub(top));

    for line in first..last {
        let label = line.to_string();
        let digits = &label.as_bytes()[..label.len().min(GUTTER_WIDTH as usize)];
        let x = GUTTER_WIDTH - digits.len() as i32;
        for (k, &d) in digits.iter().enumerate() {
            buffer.put(
                x + k as i32,
                top + line,
                Cell::new(d, ThemeColor::Opcode, ThemeColor::BackNormal),
            );
        }
    }
}
