//! Core type definitions for schema representation.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Accepted date layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

/// Declared data type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers.
    Numeric,
    /// Discrete labels with an optional declared level order.
    Categorical,
    /// Two-valued outcome stored as 0/1 (also yes/no, true/false).
    Binary,
    /// Calendar date without time.
    Date,
    /// Free text carried through untouched.
    String,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Numeric)
    }

    /// Returns true if values of this type are summarised as levels.
    pub fn is_discrete(&self) -> bool {
        matches!(self, ColumnType::Categorical | ColumnType::Binary)
    }

    /// Parse a non-missing raw value into a typed [`Value`].
    ///
    /// Returns `None` when the text does not conform to the type.
    pub fn parse(&self, raw: &str) -> Option<Value> {
        let trimmed = raw.trim();
        match self {
            ColumnType::Integer => trimmed.parse::<i64>().ok().map(Value::Integer),
            ColumnType::Numeric => trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Value::Numeric),
            ColumnType::Binary => parse_flag(trimmed).map(Value::Flag),
            ColumnType::Date => DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
                .map(Value::Date),
            ColumnType::Categorical | ColumnType::String => Some(Value::Text(trimmed.to_string())),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
            ColumnType::Binary => "binary",
            ColumnType::Date => "date",
            ColumnType::String => "string",
        };
        f.write_str(name)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "yes" | "y" | "true" => Some(true),
        "0" | "no" | "n" | "false" => Some(false),
        _ => None,
    }
}

/// Level label for a positive binary value.
pub const POSITIVE_LEVEL: &str = "Yes";
/// Level label for a negative binary value.
pub const NEGATIVE_LEVEL: &str = "No";

/// A single typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Integer(i64),
    Numeric(f64),
    Flag(bool),
    Date(NaiveDate),
    Text(String),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view of the value, for integer and numeric cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// Level label of the value, for categorical and binary cells.
    pub fn as_level(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            Value::Flag(true) => Some(POSITIVE_LEVEL),
            Value::Flag(false) => Some(NEGATIVE_LEVEL),
            _ => None,
        }
    }
}
