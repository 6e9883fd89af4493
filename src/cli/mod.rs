//! CLI support for tq
//!
//! Provides programmatic access to the `tq` subcommands so they can be
//! embedded in other tools.

mod check;
mod logging;

pub use check::{CheckOptions, CheckResult, execute_check, execute_run, execute_validate};
pub use logging::{LogConfig, init_logging};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Query(#[from] crate::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input, --file or pipe a document to stdin.")]
    NoInput,
}

impl CliError {
    /// Message for the terminal, with caret pointers for query errors.
    pub fn render(&self) -> String {
        match self {
            CliError::Query(e) => e.render(),
            other => other.to_string(),
        }
    }
}
