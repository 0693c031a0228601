//! Coercion rules for the store's loosely-typed cells.
//!
//! This is a defensive ETL boundary: the application does not control the
//! upstream schema, so malformed input degrades to zero/empty instead of
//! failing. Every function here is total and deterministic.

use serde::{Deserialize, Serialize};

/// One cell as returned by the data store.
///
/// Postgres `numeric` columns round-trip through the query API as JSON
/// strings, while integer columns come back as numbers and absent data as
/// null. The untagged representation accepts all three.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Null,
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Null
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// Coerce a raw cell to a finite number.
///
/// Null maps to 0, finite numbers pass through, non-finite numbers map to 0,
/// and text is parsed as a locale-free float (0 when unparseable or
/// non-finite). Never panics, never returns NaN or an infinity.
pub fn to_number(value: &RawValue) -> f64 {
    match value {
        RawValue::Null => 0.0,
        RawValue::Number(n) => {
            if n.is_finite() {
                *n
            } else {
                0.0
            }
        }
        RawValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => parsed,
            _ => 0.0,
        },
    }
}

/// Coerce a raw cell to an integer by rounding the numeric coercion.
pub fn to_integer(value: &RawValue) -> i32 {
    to_number(value).round() as i32
}

/// Coerce an optional text cell to a trimmed string, defaulting to empty.
pub fn to_text(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or("").to_string()
}
