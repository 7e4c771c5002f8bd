//! Validation error types

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Validation error for request payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One of the listed fields is absent, null or empty.
    ///
    /// Carries the full set of required fields so the message reads the
    /// same whichever one was left out.
    Missing { required: &'static [&'static str] },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { required } => write!(f, "{} required", required.join(" and ")),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Treat empty strings the same as absent values.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Accept any JSON value for a free-form text field.
///
/// Falsy values (`null`, `false`, `0`, `""`, `[]`, `{}`) read as absent.
/// Other scalars are stored as their text, containers as compact JSON.
pub fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_owned()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => non_empty(Some(s)),
        Value::Array(a) if a.is_empty() => None,
        Value::Object(o) if o.is_empty() => None,
        other => Some(other.to_string()),
    };
    Ok(text)
}
