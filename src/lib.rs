//! # xedit
//!
//! A syntax-highlighting text view that repaints only what changed.
//!
//! Text is split into classified lexemes by a single-pass tokenizer, laid
//! out into a grid of glyph cells, and compared against the previous frame.
//! The result is a [`Frame`]: per-cell draw instructions plus the pixel
//! bounding box of everything that changed.
//!
//! ## Core Concepts
//!
//! - **Tokenizer**: byte-oriented, never fails, tables refine identifiers
//! - **Double-buffered cells**: front and back grids swapped by ownership
//! - **Minimal repaint**: one instruction per changed cell, dirty rectangle in pixels
//! - **Presenters**: a bitmap-font canvas and an ANSI terminal
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use xedit::{Session, Theme};
//!
//! let mut session = Session::load_text("int main() { return 0; }", Arc::new(Theme::dark()));
//! session.on_resize(800, 600);
//!
//! let frame = session.render();
//! assert_eq!(frame.dirty.right, 89 * 9);
//!
//! // Nothing changed since the last render
//! assert!(session.render().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod canvas;
pub mod config;
pub mod error;
pub mod font;
pub mod layout;
pub mod present;
pub mod session;
pub mod syntax;
pub mod terminal;
pub mod theme;

// Re-exports for convenience
pub use actor::{Engine, EngineConfig, InputEvent};
pub use buffer::{Buffer, Cell, CellGrid, DrawInstruction, Frame};
pub use canvas::Canvas;
pub use config::Config;
pub use error::{Error, Result};
pub use font::BitFont;
pub use layout::{Point, Rect};
pub use present::{CanvasPresenter, Presenter};
pub use session::{Session, ViewState};
pub use syntax::{tokenize, Category, Lexeme};
pub use terminal::TerminalPresenter;
pub use theme::{Rgb, Theme, ThemeColor};
