//! # tq Query Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the syntax tree of the tq query
//! language, a small jq-like selector language for pulling values out of
//! TOML documents.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Filters and selector operands
//! - **[query]** - The root node and the query it owns
//!
//! ## Quick Start
//!
//! ```text
//! ["servers"][]["ip"]
//! ```
//!
//! This query takes the `servers` array and returns the `ip` of each entry.
//!
//! ## Grammar
//!
//! ```text
//! Root     := Query
//! Query    := Filter*
//! Filter   := '.' | '[' Selector ']'
//! Selector := ε | String | ':' Integer? | Integer (':' Integer?)?
//! ```
//!
//! ## Filters
//!
//! - **Identity** `.` - Returns its input unchanged
//! - **Key** `["name"]` - Looks a key up in tables; missing keys drop out
//! - **Index** `[2]` - Takes one array element; out of range drops out
//! - **Span** `[1:3]` - Takes a sub-array; bounds are clamped
//! - **Iterator** `[]` - Expands every element of a table or array
//!
//! The tree is immutable once parsed. Ownership runs strictly from [`Root`]
//! down to the literals.
pub mod expressions;
pub mod query;
pub mod tokens;

pub use expressions::{Filter, IntegerLit, Selector, Span, StringLit};
pub use query::{Query, Root};
pub use tokens::{Token, TokenKind};
