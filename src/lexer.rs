use std::fmt;

use thiserror::Error;

use crate::{
    ast::{Token, TokenKind},
    error::Snippet,
    scanner::Char,
};

/// Classification of a lexer failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// The lexer was handed no scanned input at all
    #[error("provided scanner is nil")]
    NilScanner,

    #[error("unsupported key character")]
    UnsupportedKeyChar,

    /// Newline or end of input before the closing quote
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("disallowed character")]
    DisallowedChar,
}

/// A lexer failure anchored at the offending character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error: {kind}")]
pub struct LexError {
    kind: LexErrorKind,
    snippet: Snippet,
}

impl LexError {
    fn new(kind: LexErrorKind, buffer: &[Char], offset: usize) -> Self {
        LexError {
            kind,
            snippet: Snippet::new(buffer, offset),
        }
    }

    pub fn kind(&self) -> LexErrorKind {
        self.kind
    }

    pub fn offset(&self) -> usize {
        self.snippet.offset()
    }

    pub fn snippet(&self) -> &Snippet {
        &self.snippet
    }

    /// The error message under the query with a caret at the offset.
    pub fn render(&self) -> String {
        self.snippet.render(&self.to_string())
    }
}

/// Every error accumulated over one bulk scan, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexErrors(pub Vec<LexError>);

impl LexErrors {
    pub fn iter(&self) -> impl Iterator<Item = &LexError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn kinds(&self) -> Vec<LexErrorKind> {
        self.0.iter().map(LexError::kind).collect()
    }

    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(LexError::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for LexErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

impl std::error::Error for LexErrors {}

fn key_char_kind(ch: char) -> Option<TokenKind> {
    match ch {
        '.' => Some(TokenKind::Dot),
        ':' => Some(TokenKind::Colon),
        '[' => Some(TokenKind::ArrayOpen),
        ']' => Some(TokenKind::ArrayClose),
        _ => None,
    }
}

fn is_key_char(ch: char) -> bool {
    matches!(ch, '.' | ':' | '[' | ']')
}

fn is_quote(ch: char) -> bool {
    ch == '"' || ch == '\''
}

fn is_newline(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

fn is_whitespace(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Turns scanned characters into tq lexemes.
///
/// Errors do not stop the lexer. Each failing step records a [`LexError`],
/// yields an [`TokenKind::Undefined`] token over the offending characters
/// and moves past them, so one pass reports every problem in the query.
pub struct Lexer<'a> {
    buffer: &'a [Char],
    position: usize,
    current: Token<'a>,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(buffer: &'a [Char]) -> Self {
        Lexer {
            buffer,
            position: 0,
            current: Token::new(TokenKind::Undefined, buffer, 0, 0),
            errors: Vec::new(),
        }
    }

    /// Builds a lexer over the output of a scan stage that may not have run.
    pub fn with_source(buffer: Option<&'a [Char]>) -> Result<Self, LexError> {
        match buffer {
            Some(buffer) => Ok(Lexer::new(buffer)),
            None => Err(LexError::new(LexErrorKind::NilScanner, &[], 0)),
        }
    }

    /// The most recently scanned token.
    pub fn token(&self) -> Token<'a> {
        self.current
    }

    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn errored(&self) -> bool {
        !self.errors.is_empty()
    }

    fn current_char(&self) -> Option<char> {
        self.buffer.get(self.position).map(|c| c.ch)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn set_token(&mut self, kind: TokenKind, start: usize, end: usize) -> Token<'a> {
        self.current = Token::new(kind, self.buffer, start, end);
        self.current
    }

    fn push_err(&mut self, kind: LexErrorKind, offset: usize) {
        self.errors.push(LexError::new(kind, self.buffer, offset));
    }

    /// Scans the next token, or returns `None` once the input is exhausted.
    pub fn scan(&mut self) -> Option<Token<'a>> {
        let ch = self.current_char()?;
        let token = match ch {
            c if is_key_char(c) => self.scan_key_char(c),
            c if is_quote(c) => self.scan_string(c),
            c if c.is_ascii_digit() => self.scan_while(TokenKind::Integer, |c| c.is_ascii_digit()),
            c if is_whitespace(c) => self.scan_while(TokenKind::Whitespace, is_whitespace),
            _ => {
                let start = self.position;
                self.push_err(LexErrorKind::DisallowedChar, start);
                self.advance();
                self.set_token(TokenKind::Undefined, start, self.position)
            }
        };
        Some(token)
    }

    /// Scans the whole buffer.
    ///
    /// Succeeds only if no error was accumulated along the way. Whitespace
    /// tokens are dropped from the output when `ignore_whitespace` is set.
    pub fn scan_all(mut self, ignore_whitespace: bool) -> Result<Vec<Token<'a>>, LexErrors> {
        let mut tokens = Vec::new();
        while let Some(token) = self.scan() {
            if ignore_whitespace && token.kind == TokenKind::Whitespace {
                continue;
            }
            tokens.push(token);
        }
        if self.errored() {
            return Err(LexErrors(self.errors));
        }
        Ok(tokens)
    }

    fn scan_key_char(&mut self, ch: char) -> Token<'a> {
        let start = self.position;
        self.advance();
        match key_char_kind(ch) {
            Some(kind) => self.set_token(kind, start, self.position),
            None => {
                self.push_err(LexErrorKind::UnsupportedKeyChar, start);
                self.set_token(TokenKind::Undefined, start, self.position)
            }
        }
    }

    fn scan_string(&mut self, quote: char) -> Token<'a> {
        let start = self.position;
        self.advance(); // opening quote

        loop {
            match self.current_char() {
                None => {
                    self.push_err(LexErrorKind::UnterminatedString, start);
                    return self.set_token(TokenKind::Undefined, start, self.position);
                }
                Some(c) if is_newline(c) => {
                    self.push_err(LexErrorKind::UnterminatedString, start);
                    self.advance();
                    if c == '\r' && self.current_char() == Some('\n') {
                        self.advance();
                    }
                    return self.set_token(TokenKind::Undefined, start, self.position);
                }
                Some(c) if c == quote => {
                    self.advance();
                    return self.set_token(TokenKind::String, start, self.position);
                }
                Some(_) => self.advance(),
            }
        }
    }

    fn scan_while(&mut self, kind: TokenKind, accept: impl Fn(char) -> bool) -> Token<'a> {
        let start = self.position;
        self.advance();
        while self.current_char().is_some_and(&accept) {
            self.advance();
        }
        self.set_token(kind, start, self.position)
    }
}

#[test]
fn test_key_chars() {
    let chars = crate::scanner::scan(".:[]");
    let mut lexer = Lexer::new(&chars);
    assert_eq!(lexer.scan().map(|t| t.kind), Some(TokenKind::Dot));
    assert_eq!(lexer.scan().map(|t| t.kind), Some(TokenKind::Colon));
    assert_eq!(lexer.scan().map(|t| t.kind), Some(TokenKind::ArrayOpen));
    assert_eq!(lexer.scan().map(|t| t.kind), Some(TokenKind::ArrayClose));
    assert_eq!(lexer.scan(), None);
    assert!(!lexer.errored());
}

#[test]
fn test_token_tracks_last_scan() {
    let chars = crate::scanner::scan("[12]");
    let mut lexer = Lexer::new(&chars);
    lexer.scan();
    lexer.scan();
    let token = lexer.token();
    assert_eq!(token.kind, TokenKind::Integer);
    assert_eq!((token.start, token.end), (1, 3));
    assert_eq!(token.lexeme(), "12");
}
