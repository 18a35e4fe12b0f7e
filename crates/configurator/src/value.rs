//! Raw value classification and typed extraction.

use serde_json::Value;
use std::fmt;

/// Closed set of runtime tags a stored value can carry.
///
/// Integers and floats are distinct tags: a stored `5` never classifies as
/// `Float` and a stored `5.0` never classifies as `Integer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
    List,
    Section,
    Null,
}

impl ValueKind {
    /// Classify a raw tree value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueKind::String,
            Value::Number(number) if number.is_f64() => ValueKind::Float,
            Value::Number(_) => ValueKind::Integer,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Array(_) => ValueKind::List,
            Value::Object(_) => ValueKind::Section,
            Value::Null => ValueKind::Null,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::List => "list",
            ValueKind::Section => "section",
            ValueKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// Types that can be read out of the tree under an exact tag match.
///
/// `from_value` returns `None` whenever the value's tag is not the one
/// named by `expected`; no numeric or stringly coercion happens here.
pub trait FromValue: Sized {
    /// The tag this type matches.
    fn expected() -> ValueKind;

    /// Extract the typed value when the tag matches.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    fn expected() -> ValueKind {
        ValueKind::String
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromValue for i64 {
    fn expected() -> ValueKind {
        ValueKind::Integer
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) if !number.is_f64() => number.as_i64(),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn expected() -> ValueKind {
        ValueKind::Float
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) if number.is_f64() => number.as_f64(),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn expected() -> ValueKind {
        ValueKind::Boolean
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}
