//! Diagnostics shared by every stage of the query pipeline.
//!
//! Errors keep their classification (a plain, matchable kind) separate from
//! their presentation. A [`Snippet`] carries the query text and the offending
//! offset; [`Snippet::render`] lays a caret under the exact column.

use thiserror::Error;

use crate::{
    codec::CodecError, interpreter::EvalError, lexer::LexErrors, parser::ParseError,
    scanner::{Char, ScanError, collect},
};

/// The query text an error occurred in, plus the offset to point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    text: String,
    offset: usize,
}

impl Snippet {
    pub fn new(buffer: &[Char], offset: usize) -> Self {
        Snippet {
            text: collect(buffer),
            offset,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Renders `line` under the query text with a caret at the offset.
    ///
    /// ```text
    /// ["foo
    /// ^
    /// Lexer error: unterminated string literal
    /// ```
    ///
    /// Only the query line holding the offset is shown. The caret indent
    /// copies tabs from that line so it stays aligned. An empty query renders
    /// the bare line.
    pub fn render(&self, line: &str) -> String {
        if self.text.is_empty() {
            return line.to_string();
        }
        let chars: Vec<char> = self.text.chars().collect();
        let offset = self.offset.min(chars.len());
        let start = chars[..offset]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
        let end = chars[offset..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(chars.len(), |i| offset + i);

        let mut out = String::with_capacity(2 * (end - start) + line.len() + 2);
        out.extend(chars[start..end].iter().filter(|&&c| c != '\r'));
        out.push('\n');
        out.extend(
            chars[start..offset]
                .iter()
                .filter(|&&c| c != '\r')
                .map(|&c| if c == '\t' { '\t' } else { ' ' }),
        );
        out.push('^');
        out.push('\n');
        out.push_str(line);
        out
    }
}

/// Any failure raised while compiling or running a query.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Lex(#[from] LexErrors),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl Error {
    /// Renders the error with caret pointers where the error has a position.
    pub fn render(&self) -> String {
        match self {
            Error::Lex(e) => e.render(),
            Error::Parse(e) => e.render(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;

    #[test]
    fn test_caret_under_offset() {
        let snippet = Snippet::new(&scan("[\"a\"]]"), 5);
        assert_eq!(snippet.render("msg"), "[\"a\"]]\n     ^\nmsg");
    }

    #[test]
    fn test_caret_copies_tabs() {
        let snippet = Snippet::new(&scan(".\t[1 2]"), 5);
        assert_eq!(snippet.render("msg"), ".\t[1 2]\n \t   ^\nmsg");
    }

    #[test]
    fn test_only_offending_line_is_shown() {
        let snippet = Snippet::new(&scan(".\n[x]"), 3);
        assert_eq!(snippet.render("msg"), "[x]\n ^\nmsg");

        let snippet = Snippet::new(&scan("[0]\r\n[x"), 7);
        assert_eq!(snippet.render("msg"), "[x\n  ^\nmsg");

        let snippet = Snippet::new(&scan(".\n"), 1);
        assert_eq!(snippet.render("msg"), ".\n ^\nmsg");
    }
}
