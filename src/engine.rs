//! End-to-end query execution.
//!
//! Wires the stages together: scanner, lexer, parser, interpreter, and the
//! document codec on either side.

use tracing::debug;

use crate::{
    codec::{self, CodecConfig},
    error::Error,
    interpreter::{self, Pipeline},
    lexer::Lexer,
    parser::Parser,
    scanner::{self, Char},
    value::Value,
};

/// Compiles query text into a runnable [`Pipeline`].
///
/// ```
/// use tq_lang::compile_query;
///
/// let pipeline = compile_query(r#"["servers"][0]"#).unwrap();
/// assert_eq!(pipeline.step_names(), vec!["string \"servers\"", "integer 0"]);
/// ```
pub fn compile_query(query: &str) -> Result<Pipeline, Error> {
    compile_chars(&scanner::scan(query))
}

/// Compiles a query received as raw bytes. Invalid UTF-8 is rejected
/// before lexing.
pub fn compile_query_bytes(query: &[u8]) -> Result<Pipeline, Error> {
    compile_chars(&scanner::scan_bytes(query)?)
}

fn compile_chars(chars: &[Char]) -> Result<Pipeline, Error> {
    let mut parser = Parser::new(Lexer::new(chars))?;
    let root = parser.parse()?;
    debug!(query = %root.query.to_query_string(), filters = root.query.filters.len(), "parsed query");
    Ok(interpreter::compile(&root))
}

/// Checks that query text parses, without running it.
pub fn validate_query(query: &str) -> Result<(), Error> {
    compile_query(query).map(|_| ())
}

/// Runs queries against documents in a configured format.
#[derive(Debug, Clone, Default)]
pub struct Tq {
    config: CodecConfig,
}

impl Tq {
    pub fn new(config: CodecConfig) -> Self {
        Tq { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decodes `input`, runs `query` against it and returns the results.
    pub fn query(&self, input: &str, query: &str) -> Result<Vec<Value>, Error> {
        let pipeline = compile_query(query)?;
        let document = codec::decode(input, self.config.input)?;
        Ok(pipeline.run(vec![document])?)
    }

    /// Like [`Tq::query`], with each result encoded and the encodings
    /// separated by newlines.
    ///
    /// ```
    /// use tq_lang::Tq;
    ///
    /// let tq = Tq::default();
    /// let out = tq.run("ports = [80, 443]", r#"["ports"][]"#).unwrap();
    /// assert_eq!(out, "80\n443");
    /// ```
    pub fn run(&self, input: &str, query: &str) -> Result<String, Error> {
        let results = self.query(input, query)?;
        Ok(codec::render_results(&results, &self.config)?)
    }

    /// Checks that `input` decodes in the configured input format.
    pub fn validate_document(&self, input: &str) -> Result<(), Error> {
        codec::decode(input, self.config.input)?;
        Ok(())
    }
}
