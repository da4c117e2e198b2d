use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Value
///
/// Scalar values accepted by restrictions. A value carries its own runtime
/// kind; whether it is legal for a given field is decided against the
/// field's declared [`solrq_schema::FieldType`] while the query is built.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Time(DateTime<Utc>),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Bool(_) => ValueKind::Bool,
            Self::Time(_) => ValueKind::Time,
        }
    }
}

///
/// ValueKind
///
/// Runtime tag used in type-mismatch diagnostics.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ValueKind {
    #[display("text")]
    Text,
    #[display("integer")]
    Int,
    #[display("float")]
    Float,
    #[display("boolean")]
    Bool,
    #[display("time")]
    Time,
}

///
/// FieldValue
///
/// Conversion from native Rust values at restriction call sites, so callers
/// write `eq("title", "bar")` rather than wrapping values by hand.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FieldValue for &str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FieldValue for i64 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl FieldValue for i32 {
    fn to_value(&self) -> Value {
        Value::Int(i64::from(*self))
    }
}

impl FieldValue for u32 {
    fn to_value(&self) -> Value {
        Value::Int(i64::from(*self))
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FieldValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::Time(*self)
    }
}
