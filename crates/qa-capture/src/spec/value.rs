use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Primitive payload shared by answers and extension values.
///
/// Serialized externally tagged, e.g. `{"integer": 11}` or `{"string": "a-name"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    String(String),
}

impl Primitive {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Primitive::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Primitive::String(value) => Some(value),
            _ => None,
        }
    }

    /// Numeric view of integer and decimal values.
    pub fn as_numeric(&self) -> Option<Numeric> {
        match self {
            Primitive::Integer(value) => Some(Numeric::Integer(*value)),
            Primitive::Decimal(value) => Some(Numeric::Decimal(*value)),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Boolean(value) => write!(f, "{value}"),
            Primitive::Integer(value) => write!(f, "{value}"),
            Primitive::Decimal(value) => write!(f, "{value}"),
            Primitive::String(value) => f.write_str(value),
        }
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Boolean(value)
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Primitive::Integer(value)
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Primitive::Decimal(value)
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::String(value.to_string())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::String(value)
    }
}

/// Number in its native representation. Values of different kinds are never
/// compared against each other by the validators.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Numeric {
    Integer(i64),
    Decimal(f64),
}

impl Numeric {
    pub fn same_kind(&self, other: &Numeric) -> bool {
        matches!(
            (self, other),
            (Numeric::Integer(_), Numeric::Integer(_)) | (Numeric::Decimal(_), Numeric::Decimal(_))
        )
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Integer(value) => write!(f, "{value}"),
            Numeric::Decimal(value) => write!(f, "{value}"),
        }
    }
}
