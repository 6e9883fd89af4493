use std::{fmt, num::ParseIntError};

/// One stage of a query pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Identity filter (`.`)
    ///
    /// Passes its input through unchanged.
    Identity,

    /// Bracketed selector (`[...]`)
    ///
    /// # Examples
    /// ```text
    /// ["key"]
    /// [0]
    /// [1:3]
    /// []
    /// ```
    Selector(Selector),
}

/// Operand of a bracketed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Expand every element of a table or array (`[]`)
    Iterator,

    /// Table key lookup (`["key"]`)
    String(StringLit),

    /// Array index (`[0]`)
    Integer(IntegerLit),

    /// Array slice (`[1:3]`, `[:2]`, `[1:]`, `[:]`)
    Span(Span),
}

/// Slice bounds. Either side may be left open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    pub left: Option<IntegerLit>,
    pub right: Option<IntegerLit>,
}

/// String literal as written in the query, surrounding quotes included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLit {
    raw: String,
}

impl StringLit {
    pub fn new(raw: impl Into<String>) -> Self {
        StringLit { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The literal with one layer of matching quotes stripped.
    ///
    /// ```
    /// use tq_lang::ast::StringLit;
    ///
    /// assert_eq!(StringLit::new("\"key\"").trim(), "key");
    /// assert_eq!(StringLit::new("'it\"s'").trim(), "it\"s");
    /// assert_eq!(StringLit::new("bare").trim(), "bare");
    /// ```
    pub fn trim(&self) -> &str {
        let raw = self.raw.as_str();
        for quote in ['"', '\''] {
            if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
                return &raw[1..raw.len() - 1];
            }
        }
        raw
    }
}

/// Integer literal as written in the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLit {
    raw: String,
}

impl IntegerLit {
    pub fn new(raw: impl Into<String>) -> Self {
        IntegerLit { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> Result<usize, ParseIntError> {
        self.raw.parse()
    }

    /// The numeric value, saturating at `usize::MAX` for literals too long to
    /// fit. The lexer only admits digit runs, so overflow is the only way
    /// [`IntegerLit::value`] can fail on parsed input.
    pub fn saturating_value(&self) -> usize {
        self.value().unwrap_or(usize::MAX)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Identity => write!(f, "identity"),
            Filter::Selector(s) => write!(f, "{}", s),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Iterator => write!(f, "iterator"),
            Selector::String(s) => write!(f, "{}", s),
            Selector::Integer(i) => write!(f, "{}", i),
            Selector::Span(s) => write!(f, "{}", s),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let left = self.left.as_ref().map_or("", IntegerLit::raw);
        let right = self.right.as_ref().map_or("", IntegerLit::raw);
        write!(f, "span [{}:{}]", left, right)
    }
}

impl fmt::Display for StringLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "string {:?}", self.trim())
    }
}

impl fmt::Display for IntegerLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "integer {}", self.raw)
    }
}
