pub mod ast;
pub mod codec;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod scanner;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{Filter, Query, Root, Selector, Token, TokenKind};
pub use codec::{CodecConfig, CodecError, Format};
pub use engine::{Tq, compile_query, compile_query_bytes, validate_query};
pub use error::{Error, Snippet};
pub use interpreter::{EvalError, Pipeline, compile};
pub use lexer::{LexError, LexErrorKind, LexErrors, Lexer};
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use value::{Value, ValueKind};
