//! Terminal module: Presenting frames on an ANSI terminal.

mod output;
mod presenter;

pub use output::OutputBuffer;
pub use presenter::{glyph_char, TerminalPresenter};
