//! Syntax module: Byte-oriented lexical classification.
//!
//! - [`Lexeme`]: a classified run of bytes
//! - [`tables`]: keyword, macro, directive and type-name sets
//! - [`tokenize`]: single-pass scanner producing the lexeme sequence

mod lexeme;
pub mod tables;
mod tokenizer;

pub use lexeme::{Category, Lexeme};
pub use tables::classify;
pub use tokenizer::tokenize;
