//! Message types for actor communication.
//!
//! The input actor translates terminal events into [`InputEvent`]s; the
//! engine applies them to the session one at a time.

use crate::session::Session;

/// Events from the input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A character byte was typed.
    Char(u8),
    /// Enter, inserted as `\r`.
    Enter,
    /// Tab.
    Tab,
    /// Delete the last byte.
    Backspace,
    /// Scroll the view by whole cells.
    Scroll {
        /// Columns; positive moves the text right.
        dx: i32,
        /// Rows; positive moves the text down.
        dy: i32,
    },
    /// Terminal was resized.
    Resize {
        /// New width in columns.
        columns: u16,
        /// New height in rows.
        rows: u16,
    },
    /// Leave the editor (Esc or Ctrl-C).
    Quit,
    /// Input thread encountered an error.
    Error(String),
    /// Input thread is shutting down.
    Shutdown,
}

/// What the engine should do after an event was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep going.
    Continue,
    /// The grid was reallocated; the screen must be cleared before the
    /// next frame.
    Resized,
    /// Stop the event loop.
    Quit,
}

/// Apply one event to `session`.
///
/// Terminal cells map 1:1 onto glyph cells, so a terminal of `c × r` cells
/// is reported to the session as `c·9 × r·16` pixels.
pub fn apply(session: &mut Session, event: &InputEvent) -> Control {
    match *event {
        InputEvent::Char(byte) => {
            session.on_insert_char(byte);
        }
        InputEvent::Enter => {
            session.on_insert_char(b'\r');
        }
        InputEvent::Tab => {
            session.on_insert_char(b'\t');
        }
        InputEvent::Backspace => {
            session.on_delete_last_char();
        }
        InputEvent::Scroll { dx, dy } => session.on_scroll(dx, dy),
        InputEvent::Resize { columns, rows } => {
            let (width, height) = pixels_for_cells(columns, rows);
            if session.on_resize(width, height) {
                return Control::Resized;
            }
        }
        InputEvent::Quit | InputEvent::Shutdown => return Control::Quit,
        InputEvent::Error(_) => {}
    }
    Control::Continue
}

/// Pixel size of a `columns × rows` cell area.
#[inline]
pub const fn pixels_for_cells(columns: u16, rows: u16) -> (u32, u32) {
    (
        columns as u32 * crate::buffer::GLYPH_WIDTH,
        rows as u32 * crate::buffer::GLYPH_HEIGHT,
    )
}
