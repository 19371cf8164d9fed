use std::fmt;

use chrono::NaiveDateTime;
use num_traits::ToPrimitive;
use serde::{Serialize, Serializer};

/// Result of coercing one raw cell.
///
/// Every consumer has to handle all cases: a missing value, one typed value
/// per supported type, or the raw text that could not be cast.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    Null,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    DateTime(NaiveDateTime),
    /// Original raw text, untouched
    Uncastable(String),
}

impl CoercedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CoercedValue::Null)
    }

    pub fn is_uncastable(&self) -> bool {
        matches!(self, CoercedValue::Uncastable(_))
    }

    pub fn is_typed(&self) -> bool {
        !self.is_null() && !self.is_uncastable()
    }

    /// Numeric view of `Integer` and `Float`, `None` for everything else.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CoercedValue::Integer(i) => i.to_f64(),
            CoercedValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CoercedValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            CoercedValue::Null => "null",
            CoercedValue::Integer(_) => "int",
            CoercedValue::Float(_) => "float",
            CoercedValue::Boolean(_) => "bool",
            CoercedValue::Text(_) => "str",
            CoercedValue::DateTime(_) => "datetime",
            CoercedValue::Uncastable(_) => "uncastable",
        }
    }
}

impl fmt::Display for CoercedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercedValue::Null => write!(f, "null"),
            CoercedValue::Integer(i) => write!(f, "{}", i),
            CoercedValue::Float(v) => write!(f, "{}", v),
            CoercedValue::Boolean(b) => write!(f, "{}", b),
            CoercedValue::Text(s) => write!(f, "{}", s),
            CoercedValue::DateTime(dt) => write!(f, "{}", dt),
            CoercedValue::Uncastable(raw) => write!(f, "{}", raw),
        }
    }
}

/// Serialized as the plain JSON scalar: null, number, boolean or string.
impl Serialize for CoercedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CoercedValue::Null => serializer.serialize_none(),
            CoercedValue::Integer(i) => serializer.serialize_i64(*i),
            CoercedValue::Float(v) => serializer.serialize_f64(*v),
            CoercedValue::Boolean(b) => serializer.serialize_bool(*b),
            CoercedValue::Text(s) | CoercedValue::Uncastable(s) => serializer.serialize_str(s),
            CoercedValue::DateTime(dt) => serializer.collect_str(dt),
        }
    }
}

impl From<&str> for CoercedValue {
    fn from(value: &str) -> Self {
        CoercedValue::Text(value.to_string())
    }
}

impl From<String> for CoercedValue {
    fn from(value: String) -> Self {
        CoercedValue::Text(value)
    }
}

impl From<i64> for CoercedValue {
    fn from(value: i64) -> Self {
        CoercedValue::Integer(value)
    }
}

impl From<f64> for CoercedValue {
    fn from(value: f64) -> Self {
        CoercedValue::Float(value)
    }
}

impl From<bool> for CoercedValue {
    fn from(value: bool) -> Self {
        CoercedValue::Boolean(value)
    }
}
