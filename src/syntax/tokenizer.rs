//! Tokenizer: Single-pass scanner that splits a text buffer into lexemes.
//!
//! The scanner walks the buffer once, byte by byte, with one byte of
//! lookbehind (to close block comments) and one byte of lookahead (to open
//! comments). Closing a block comment also skips the byte that follows it.
//! It never fails: an unterminated quote or block comment simply runs to the
//! end of the text.
//!
//! After the scan, every lexeme still in the generic [`Category::Code`]
//! category is refined against the classifier tables.

use super::lexeme::{Category, Lexeme};
use super::tables::classify;

/// Scanner state between bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Outside any quote or comment.
    Normal,
    /// Inside `// ...`, until CR or LF.
    LineComment,
    /// Inside `/* ... */`.
    BlockComment,
    /// Inside a quoted literal terminated by the given byte.
    Quoted(u8),
}

/// Accumulates closed lexemes plus at most one open one.
#[derive(Debug, Default)]
struct Scanner {
    lexemes: Vec<Lexeme>,
    /// Category and start offset of the lexeme under construction.
    open: Option<(Category, usize)>,
}

impl Scanner {
    /// Open a lexeme at `pos` unless one is already open, in which case the
    /// open lexeme simply continues.
    #[inline]
    fn begin(&mut self, pos: usize, category: Category) {
        if self.open.is_none() {
            self.open = Some((category, pos));
        }
    }

    /// Close the open lexeme (if any) so that it ends just before `pos`.
    #[inline]
    fn end(&mut self, pos: usize) {
        if let Some((category, offset)) = self.open {
            if pos > offset {
                self.lexemes.push(Lexeme::new(category, offset, pos - offset));
                self.open = None;
            }
        }
    }

    /// Emit a one-byte lexeme at `pos`, closing whatever was open first.
    #[inline]
    fn single(&mut self, pos: usize, category: Category) {
        self.end(pos);
        self.begin(pos, category);
        self.end(pos + 1);
    }
}

/// Identifier bytes: ASCII letters, underscore and `#`.
#[inline]
const fn is_ident(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'#'
}

/// Split `text` into an ordered, non-overlapping sequence of lexemes.
///
/// Bytes that belong to no lexeme (whitespace, line breaks) are simply not
/// covered. The returned offsets are strictly increasing and every lexeme
/// lies within `0..text.len()`.
pub fn tokenize(text: &[u8]) -> Vec<Lexeme> {
    let mut scanner = Scanner::default();
    let mut state = State::Normal;
    let mut last = 0u8;
    let mut i = 0;

    while i < text.len() {
        let c = text[i];

        // An escaped byte never opens or closes anything.
        if c == b'\\' {
            last = c;
            i += 2;
            continue;
        }

        match state {
            State::Quoted(quote) => {
                if c == quote {
                    scanner.end(i + 1);
                    state = State::Normal;
                }
            }
            State::LineComment => {
                if c == b'\r' || c == b'\n' {
                    scanner.end(i);
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if c == b'/' && last == b'*' {
                    scanner.end(i + 1);
                    state = State::Normal;
                    // The byte after `*/` is consumed along with the close
                    last = c;
                    i += 2;
                    continue;
                }
            }
            State::Normal => match (c, text.get(i + 1)) {
                (b'/', Some(&(next @ (b'/' | b'*')))) => {
                    scanner.end(i);
                    scanner.begin(i, Category::Comment);
                    state = if next == b'/' {
                        State::LineComment
                    } else {
                        State::BlockComment
                    };
                }
                (b'\'' | b'"', _) => {
                    scanner.end(i);
                    scanner.begin(i, Category::Text);
                    state = State::Quoted(c);
                }
                (b' ' | b'\t' | b'\r' | b'\n', _) => scanner.end(i),
                (b'0'..=b'9', _) => scanner.begin(i, Category::Number),
                (c, _) if is_ident(c) => scanner.begin(i, Category::Code),
                _ => scanner.single(i, Category::Code),
            },
        }

        last = c;
        i += 1;
    }

    scanner.end(text.len());

    let mut lexemes = scanner.lexemes;
    for lexeme in &mut lexemes {
        if lexeme.category == Category::Code {
            lexeme.category = classify(lexeme.bytes(text));
        }
    }

    tracing::debug!(target: "syntax", count = lexemes.len(), bytes = text.len(), "tokenized");
    lexemes
}
