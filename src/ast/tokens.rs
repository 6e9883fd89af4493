use crate::scanner::{Char, collect};

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Characters that failed to form a valid lexeme
    Undefined,

    /// String literal, quotes included
    ///
    /// # Examples
    /// ```text
    /// "key"
    /// 'key with spaces'
    /// ```
    String,

    /// Unsigned run of decimal digits
    ///
    /// # Examples
    /// ```text
    /// 0
    /// 42
    /// ```
    Integer,

    /// Identity filter (`.`)
    Dot,

    /// Span separator (`:`)
    Colon,

    /// Selector opening bracket (`[`)
    ArrayOpen,

    /// Selector closing bracket (`]`)
    ArrayClose,

    /// Run of spaces and tabs
    Whitespace,
}

/// A lexeme located in the scanned query buffer.
///
/// Tokens never copy their text. `start..end` is a half-open range into the
/// shared buffer; [`Token::lexeme`] materializes it on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub buffer: &'a [Char],
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, buffer: &'a [Char], start: usize, end: usize) -> Self {
        Token {
            kind,
            buffer,
            start,
            end,
        }
    }

    /// Text covered by the token. Ranges past the buffer end are clamped.
    pub fn lexeme(&self) -> String {
        let end = self.end.min(self.buffer.len());
        if self.start > end {
            return String::new();
        }
        collect(&self.buffer[self.start..end])
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
