//! Presenters: Consumers of rendered frames.
//!
//! A presenter receives each non-empty [`Frame`] and applies its draw
//! instructions to some output surface. Frames with an empty dirty rectangle
//! are skipped without touching the surface.

use crate::buffer::{DrawInstruction, Frame};
use crate::canvas::Canvas;
use crate::error::Result;
use crate::font::BitFont;
use crate::layout::Rect;

/// Applies frames to an output surface.
pub trait Presenter {
    /// Apply `frame`. An empty frame must be a no-op.
    fn present(&mut self, frame: &Frame) -> Result<()>;
}

/// Rasterizes frames into an in-memory [`Canvas`] through a [`BitFont`].
#[derive(Debug)]
pub struct CanvasPresenter {
    canvas: Canvas,
    font: BitFont,
    /// Union of every dirty rectangle presented since the last take.
    presented: Rect,
    frames: u64,
}

impl CanvasPresenter {
    /// Create a presenter over a black `width × height` canvas.
    pub fn new(font: BitFont, width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            font,
            presented: Rect::EMPTY,
            frames: 0,
        }
    }

    /// Resize the canvas. Its content is lost, so the caller must also
    /// resize the session to get a full repaint.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.canvas.resize(width, height)
    }

    /// The canvas.
    #[inline]
    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Number of frames applied.
    #[inline]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// The region touched since the last call, which is then reset. This is
    /// what a windowing host would blit.
    pub fn take_presented(&mut self) -> Rect {
        std::mem::replace(&mut self.presented, Rect::EMPTY)
    }

    /// Consume the presenter, keeping the canvas.
    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }
}

impl Presenter for CanvasPresenter {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        if frame.is_empty() {
            return Ok(());
        }

        for instruction in &frame.instructions {
            match *instruction {
                DrawInstruction::Glyph { ch, fg, bg, x, y } => {
                    self.canvas.put_glyph(&self.font, ch, fg, bg, x, y);
                }
                DrawInstruction::Fill { color, rect } => self.canvas.fill(rect, color),
            }
        }

        self.presented = self.presented.union(&frame.dirty);
        self.frames += 1;
        Ok(())
    }
}
