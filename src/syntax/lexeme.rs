//! Lexeme: A classified run of bytes in the text buffer.

use std::ops::Range;

/// Syntactic category of a lexeme.
///
/// The discriminants match the first eight palette slots of
/// [`ThemeColor`](crate::theme::ThemeColor), so a category can index the
/// theme directly.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// Identifiers and punctuation with no more specific meaning.
    #[default]
    Code = 0,
    /// String or character literal, quotes included.
    Text = 1,
    /// Known type name.
    Type = 2,
    /// Known macro or constant.
    Define = 3,
    /// Numeric literal.
    Number = 4,
    /// Language keyword.
    Opcode = 5,
    /// Line or block comment, delimiters included.
    Comment = 6,
    /// Preprocessor directive.
    Argument = 7,
}

impl Category {
    /// All categories in palette order.
    pub const ALL: [Self; 8] = [
        Self::Code,
        Self::Text,
        Self::Type,
        Self::Define,
        Self::Number,
        Self::Opcode,
        Self::Comment,
        Self::Argument,
    ];
}

/// A classified, non-empty byte range of the text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lexeme {
    /// Category of this lexeme.
    pub category: Category,
    /// Byte offset of the first byte.
    pub offset: usize,
    /// Length in bytes (always at least 1).
    pub length: usize,
}

impl Lexeme {
    /// Create a new lexeme.
    #[inline]
    pub const fn new(category: Category, offset: usize, length: usize) -> Self {
        Self {
            category,
            offset,
            length,
        }
    }

    /// Byte offset one past the last byte.
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Byte range covered by this lexeme.
    #[inline]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Extract the lexeme's bytes from the text it was scanned from.
    #[inline]
    pub fn bytes<'a>(&self, text: &'a [u8]) -> &'a [u8] {
        &text[self.range()]
    }
}
