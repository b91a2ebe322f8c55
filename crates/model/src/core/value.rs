use crate::core::{data_type::DataType, utils::parse_timestamp};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Timestamp(NaiveDateTime),
    Null,
}

/// A raw cell that does not fit the type of its column.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("cannot parse '{value}' as {data_type}")]
pub struct ValueError {
    pub value: String,
    pub data_type: DataType,
}

impl Value {
    /// Parses a raw CSV cell as `data_type`. Empty cells are NULL for every type.
    ///
    /// Input is accepted wherever PostgreSQL would assign it to a column of
    /// that type: fractional numbers round into `BIGINT`, and booleans take
    /// every spelling the server understands.
    pub fn parse(raw: &str, data_type: DataType) -> Result<Value, ValueError> {
        if raw.is_empty() {
            return Ok(Value::Null);
        }

        let parsed = match data_type {
            DataType::Long => parse_long(raw).map(Value::Int),
            DataType::Double => raw.trim().parse::<f64>().ok().map(Value::Float),
            DataType::Boolean => parse_boolean_literal(raw).map(Value::Boolean),
            DataType::Timestamp => parse_timestamp(raw).map(Value::Timestamp),
            DataType::String | DataType::Null => Some(Value::String(raw.to_string())),
        };

        parsed.ok_or_else(|| ValueError {
            value: raw.to_string(),
            data_type,
        })
    }
}

/// Integers as-is; other finite numbers rounded half away from zero.
fn parse_long(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }

    let rounded = raw.parse::<f64>().ok()?.round();
    // i64::MAX as f64 is 2^63, the first value out of range
    if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
        Some(rounded as i64)
    } else {
        None
    }
}

fn parse_boolean_literal(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "t" | "true" | "y" | "yes" | "on" | "1" => Some(true),
        "f" | "false" | "n" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::Null => write!(f, "NULL"),
        }
    }
}
