//! Document decoding and result encoding.
//!
//! The query core only sees [`Value`] trees. This module converts them from
//! and to TOML (through the `toml` crate) and JSON (through `serde_json`).
//!
//! # Examples
//!
//! ```
//! use tq_lang::codec::{decode, encode, CodecConfig, Format};
//!
//! let doc = decode("answer = 42", Format::Toml).unwrap();
//! assert_eq!(encode(&doc, &CodecConfig::default()).unwrap(), "answer = 42\n");
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::value::Value;

/// Errors raised while decoding input or encoding results.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("TOML error: failed to unmarshal TOML input: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("TOML error: failed to marshal TOML output: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input holds a value the document model cannot represent
    #[error("unrepresentable value: {0}")]
    Unrepresentable(String),

    #[error("unknown format: '{0}' (expected 'toml' or 'json')")]
    UnknownFormat(String),
}

/// Document text format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Toml,
    Json,
}

impl FromStr for Format {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(Format::Toml),
            "json" => Ok(Format::Json),
            other => Err(CodecError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Toml => write!(f, "toml"),
            Format::Json => write!(f, "json"),
        }
    }
}

/// How documents are read and results are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecConfig {
    pub input: Format,
    pub output: Format,
    /// Pretty-print tables and JSON output
    pub pretty: bool,
    /// Write TOML tables as inline `{ key = value }` tables instead of
    /// documents
    pub tables_inline: bool,
}

/// Decodes a document. TOML documents always decode to a table.
pub fn decode(input: &str, format: Format) -> Result<Value, CodecError> {
    match format {
        Format::Toml => {
            let table: toml::Table = toml::from_str(input)?;
            Ok(Value::from(toml::Value::Table(table)))
        }
        Format::Json => {
            let json: serde_json::Value = serde_json::from_str(input)?;
            Value::try_from(json)
        }
    }
}

/// Encodes a single value.
///
/// In TOML, tables are written as documents and every other value as an
/// inline TOML value. An empty table encodes to an empty string unless
/// `tables_inline` is set, in which case every value is written inline.
pub fn encode(value: &Value, config: &CodecConfig) -> Result<String, CodecError> {
    match config.output {
        Format::Toml => match toml::Value::from(value.clone()) {
            table @ toml::Value::Table(_) if config.tables_inline => Ok(table.to_string()),
            toml::Value::Table(table) if config.pretty => Ok(toml::to_string_pretty(&table)?),
            toml::Value::Table(table) => Ok(toml::to_string(&table)?),
            other => Ok(other.to_string()),
        },
        Format::Json => {
            let json = serde_json::Value::from(value.clone());
            if config.pretty {
                Ok(serde_json::to_string_pretty(&json)?)
            } else {
                Ok(serde_json::to_string(&json)?)
            }
        }
    }
}

/// Encodes each result on its own and joins them with a newline.
///
/// Table documents keep their own trailing newline, so consecutive documents
/// are separated by a blank line. Results that encode to nothing are skipped.
/// The final trailing newline is left to the caller.
pub fn render_results(values: &[Value], config: &CodecConfig) -> Result<String, CodecError> {
    let mut parts = Vec::with_capacity(values.len());
    for value in values {
        let encoded = encode(value, config)?;
        if encoded.is_empty() {
            continue;
        }
        parts.push(encoded);
    }
    let mut out = parts.join("\n");
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

impl From<toml::Value> for Value {
    fn from(v: toml::Value) -> Self {
        match v {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Integer(i),
            toml::Value::Float(f) => Value::Float(f),
            toml::Value::Boolean(b) => Value::Boolean(b),
            toml::Value::Datetime(d) => Value::Datetime(d),
            toml::Value::Array(arr) => Value::Array(arr.into_iter().map(Value::from).collect()),
            toml::Value::Table(table) => {
                Value::Table(table.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for toml::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) => toml::Value::String(s),
            Value::Integer(i) => toml::Value::Integer(i),
            Value::Float(f) => toml::Value::Float(f),
            Value::Boolean(b) => toml::Value::Boolean(b),
            Value::Datetime(d) => toml::Value::Datetime(d),
            Value::Array(arr) => {
                toml::Value::Array(arr.into_iter().map(toml::Value::from).collect())
            }
            Value::Table(table) => toml::Value::Table(
                table
                    .into_iter()
                    .map(|(k, v)| (k, toml::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = CodecError;

    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        Ok(match v {
            serde_json::Value::Null => {
                return Err(CodecError::Unrepresentable("null".to_string()));
            }
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => match n.as_f64() {
                    Some(f) => Value::Float(f),
                    None => return Err(CodecError::Unrepresentable(n.to_string())),
                },
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => Value::Array(
                arr.into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(obj) => Value::Table(
                obj.into_iter()
                    .map(|(k, v)| Value::try_from(v).map(|v| (k, v)))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) => serde_json::Value::String(s),
            Value::Integer(i) => serde_json::Value::Number(i.into()),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Boolean(b) => serde_json::Value::Bool(b),
            Value::Datetime(d) => serde_json::Value::String(d.to_string()),
            Value::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Table(table) => serde_json::Value::Object(
                table
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}
