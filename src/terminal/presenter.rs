//! `TerminalPresenter`: Shows frames on an ANSI terminal, one glyph cell per
//! terminal cell.
//!
//! Each instruction's pixel origin is mapped back to its grid cell. Cursor
//! moves and color changes are only emitted when they differ from the
//! terminal's current state, and the whole frame is written at once.

use std::io::Write;

use crate::buffer::{DrawInstruction, Frame};
use crate::error::Result;
use crate::layout::CURSOR_GLYPH;
use crate::present::Presenter;
use crate::theme::Rgb;

use super::output::OutputBuffer;

/// Terminal character for a glyph byte.
pub fn glyph_char(ch: u8) -> char {
    match ch {
        0x20..=0x7E => char::from(ch),
        CURSOR_GLYPH => '▌',
        _ => '?',
    }
}

/// What the terminal currently has selected, as far as we know.
#[derive(Debug, Default, Clone, Copy)]
struct Pen {
    /// Where the next character will land.
    at: Option<(u32, u32)>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

/// Presents frames by writing ANSI sequences to `W`.
#[derive(Debug)]
pub struct TerminalPresenter<W: Write> {
    out: W,
    buffer: OutputBuffer,
    pen: Pen,
    bytes_written: u64,
}

impl<W: Write> TerminalPresenter<W> {
    /// Create a presenter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            buffer: OutputBuffer::with_capacity(64 * 1024),
            pen: Pen::default(),
            bytes_written: 0,
        }
    }

    /// Forget the cached terminal state and clear the screen, e.g. after
    /// the terminal was resized.
    pub fn reset(&mut self) -> Result<()> {
        self.pen = Pen::default();
        self.buffer.clear();
        self.buffer.reset_attrs();
        self.buffer.clear_screen();
        self.buffer.flush_to(&mut self.out)?;
        Ok(())
    }

    /// Total bytes written by [`Presenter::present`].
    #[inline]
    pub const fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// The underlying writer.
    #[inline]
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    /// Mutable access to the underlying writer.
    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Consume the presenter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn put(&mut self, col: u32, row: u32, c: char, fg: Option<Rgb>, bg: Rgb) {
        if self.pen.at != Some((col, row)) {
            self.buffer.cursor_move(col, row);
        }
        if let Some(fg) = fg {
            if self.pen.fg != Some(fg) {
                self.buffer.set_fg(fg);
                self.pen.fg = Some(fg);
            }
        }
        if self.pen.bg != Some(bg) {
            self.buffer.set_bg(bg);
            self.pen.bg = Some(bg);
        }
        self.buffer.write_char(c);
        self.pen.at = Some((col + 1, row));
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        if frame.is_empty() {
            return Ok(());
        }

        self.buffer.clear();
        self.buffer.cursor_hide();
        for instruction in &frame.instructions {
            let (col, row) = instruction.cell();
            match *instruction {
                DrawInstruction::Glyph { ch, fg, bg, .. } => {
                    self.put(col, row, glyph_char(ch), Some(fg), bg);
                }
                DrawInstruction::Fill { color, .. } => self.put(col, row, ' ', None, color),
            }
        }

        self.buffer.flush_to(&mut self.out)?;
        self.bytes_written += self.buffer.len() as u64;
        Ok(())
    }
}
