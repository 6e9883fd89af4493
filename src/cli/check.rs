//! Execute tq queries against document input

use super::CliError;
use crate::{CodecConfig, Tq, validate_query};

/// Options shared by the query-running commands
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The tq query to execute
    pub query: String,
    /// Document text
    pub input: Option<String>,
    /// Input/output formats and pretty printing
    pub codec: CodecConfig,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query executed successfully; encoded results, newline separated
    Success(String),
}

/// Validate a query and, unless `syntax_only` is set, run it.
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.syntax_only {
        validate_query(&options.query)?;
        return Ok(CheckResult::SyntaxValid);
    }
    execute_run(options).map(CheckResult::Success)
}

/// Run a query against the input document and encode the results.
pub fn execute_run(options: &CheckOptions) -> Result<String, CliError> {
    let input = options.input.as_deref().ok_or(CliError::NoInput)?;
    let tq = Tq::new(options.codec);
    Ok(tq.run(input, &options.query)?)
}

/// Check that the input decodes in the configured input format.
pub fn execute_validate(input: Option<&str>, codec: CodecConfig) -> Result<(), CliError> {
    let input = input.ok_or(CliError::NoInput)?;
    Tq::new(codec).validate_document(input)?;
    Ok(())
}
