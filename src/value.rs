use std::{collections::HashMap, fmt};

use toml::value::Datetime;

/// Shape of a runtime value as seen by the query filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Table,
    Array,
    Scalar,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Table => write!(f, "table"),
            ValueKind::Array => write!(f, "array"),
            ValueKind::Scalar => write!(f, "scalar"),
        }
    }
}

/// A decoded document value.
///
/// Filters only care whether a value is a table, an array or a leaf; the
/// scalar variants keep enough detail to encode the value back unchanged.
///
/// # Examples
///
/// ```
/// use tq_lang::{Value, ValueKind};
/// use std::collections::HashMap;
///
/// let array = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
/// assert_eq!(array.kind(), ValueKind::Array);
///
/// let mut table = HashMap::new();
/// table.insert("key".to_string(), Value::String("value".to_string()));
/// assert_eq!(Value::Table(table).kind(), ValueKind::Table);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 string
    String(String),

    /// Integer number
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// Boolean (true/false)
    Boolean(bool),

    /// Offset or local date-time, date or time
    Datetime(Datetime),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// Mapping from string keys to values. Iteration order is unspecified.
    Table(HashMap<String, Value>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Table(_) => ValueKind::Table,
            Value::Array(_) => ValueKind::Array,
            _ => ValueKind::Scalar,
        }
    }

    /// Concrete type name, finer than [`Value::kind`].
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Datetime(_) => "datetime",
            Value::Array(_) => "array",
            Value::Table(_) => "table",
        }
    }
}

/// Renders the value as an inline TOML value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", toml::Value::from(self.clone()))
    }
}
