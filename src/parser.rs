use thiserror::Error;

use crate::{
    ast::{Filter, IntegerLit, Query, Root, Selector, Span, StringLit, Token, TokenKind},
    error::Snippet,
    lexer::{LexErrors, Lexer},
    scanner::Char,
};

/// Lexeme reported for errors raised at end of input.
pub const EOL: &str = "EOL";

/// Classification of a parser failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected '.' or '[' to parse query element")]
    QueryElement,

    #[error("expected ']' to terminate selector")]
    SelectorUnterminated,

    #[error("reached the end of the buffer")]
    BufferExhausted,
}

/// A parser failure anchored at the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parser error: {kind} but got '{lexeme}'")]
pub struct ParseError {
    kind: ParseErrorKind,
    lexeme: String,
    snippet: Snippet,
    at_end: bool,
}

impl ParseError {
    fn at_token(kind: ParseErrorKind, token: &Token<'_>) -> Self {
        ParseError {
            kind,
            lexeme: token.lexeme(),
            snippet: Snippet::new(token.buffer, token.start),
            at_end: false,
        }
    }

    fn at_end(kind: ParseErrorKind, buffer: &[Char]) -> Self {
        ParseError {
            kind,
            lexeme: EOL.to_string(),
            snippet: Snippet::new(buffer, buffer.len()),
            at_end: true,
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Reports whether the error is of `kind`.
    ///
    /// Errors raised because the tokens ran out also match
    /// [`ParseErrorKind::BufferExhausted`].
    pub fn is(&self, kind: ParseErrorKind) -> bool {
        self.kind == kind || (self.at_end && kind == ParseErrorKind::BufferExhausted)
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn offset(&self) -> usize {
        self.snippet.offset()
    }

    pub fn snippet(&self) -> &Snippet {
        &self.snippet
    }

    pub fn render(&self) -> String {
        self.snippet.render(&self.to_string())
    }
}

/// Recursive-descent parser with one token of lookahead.
///
/// Parsing is fail-fast: the first error ends it.
pub struct Parser<'a> {
    buffer: &'a [Char],
    tokens: Vec<Token<'a>>,
    current: usize,
}

impl<'a> Parser<'a> {
    /// Runs the lexer to completion, whitespace dropped.
    pub fn new(lexer: Lexer<'a>) -> Result<Self, LexErrors> {
        let buffer = lexer.token().buffer;
        let tokens = lexer.scan_all(true)?;
        Ok(Parser::from_tokens(buffer, tokens))
    }

    /// Builds a parser over already-scanned tokens of `buffer`.
    pub fn from_tokens(buffer: &'a [Char], tokens: Vec<Token<'a>>) -> Self {
        Parser {
            buffer,
            tokens,
            current: 0,
        }
    }

    /// Parses the whole token stream into a tree.
    pub fn parse(&mut self) -> Result<Root, ParseError> {
        match self.parse_partial() {
            (root, None) => Ok(root),
            (_, Some(err)) => Err(err),
        }
    }

    /// Parses as far as possible.
    ///
    /// On failure the returned root holds the filters completed before the
    /// error. It is a diagnostic aid, not a usable query.
    pub fn parse_partial(&mut self) -> (Root, Option<ParseError>) {
        let (query, err) = self.query();
        (Root { query }, err)
    }

    fn query(&mut self) -> (Query, Option<ParseError>) {
        let mut query = Query::default();
        while !self.is_at_end() {
            match self.filter() {
                Ok(filter) => query.filters.push(filter),
                Err(err) => return (query, Some(err)),
            }
        }
        (query, None)
    }

    fn filter(&mut self) -> Result<Filter, ParseError> {
        if self.match_kind(TokenKind::Dot) {
            Ok(Filter::Identity)
        } else if self.match_kind(TokenKind::ArrayOpen) {
            Ok(Filter::Selector(self.selector()?))
        } else {
            Err(self.error_at_peek(ParseErrorKind::QueryElement))
        }
    }

    fn selector(&mut self) -> Result<Selector, ParseError> {
        let selector = if self.check(TokenKind::ArrayClose) {
            Selector::Iterator
        } else if self.match_kind(TokenKind::String) {
            Selector::String(StringLit::new(self.previous_lexeme()))
        } else if self.match_kind(TokenKind::Colon) {
            Selector::Span(self.span(None))
        } else if self.match_kind(TokenKind::Integer) {
            let integer = IntegerLit::new(self.previous_lexeme());
            if self.match_kind(TokenKind::Colon) {
                Selector::Span(self.span(Some(integer)))
            } else {
                Selector::Integer(integer)
            }
        } else {
            return Err(self.error_at_peek(ParseErrorKind::SelectorUnterminated));
        };

        self.consume(TokenKind::ArrayClose, ParseErrorKind::SelectorUnterminated)?;
        Ok(selector)
    }

    fn span(&mut self, left: Option<IntegerLit>) -> Span {
        let right = if self.match_kind(TokenKind::Integer) {
            Some(IntegerLit::new(self.previous_lexeme()))
        } else {
            None
        };
        Span { left, right }
    }

    fn consume(&mut self, kind: TokenKind, err: ParseErrorKind) -> Result<Token<'a>, ParseError> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(self.error_at_peek(err))
    }

    fn error_at_peek(&self, kind: ParseErrorKind) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::at_token(kind, token),
            None => ParseError::at_end(kind, self.buffer),
        }
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn advance(&mut self) -> Token<'a> {
        let token = self.tokens[self.current];
        self.current += 1;
        token
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.current)
    }

    fn previous_lexeme(&self) -> String {
        self.current
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(Token::lexeme)
            .unwrap_or_default()
    }
}
