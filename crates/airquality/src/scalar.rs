//! Loosely typed JSON scalars.
//!
//! The upstream feed is not strict about types: an index may arrive as `42`
//! or `"42"`, an hour as `5` or `"05"`. Fields that carry such values are
//! stored as [`Scalar`] and parsed explicitly where a number is needed.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Scalar {
    /// Converts a JSON value; null, arrays and objects are not scalars.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Scalar::Number),
            Value::String(s) => Some(Scalar::Text(s.clone())),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// The finite numeric value, if there is one.
    ///
    /// Text parses when it trims to a finite decimal number. Booleans never
    /// parse.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(v) => Some(*v).filter(|v| v.is_finite()),
            Scalar::Text(s) => foundation::parse_finite(s),
            Scalar::Bool(_) => None,
        }
    }

    /// Display text, printing integral numbers without a fractional part.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Number(v) => number_text(*v),
            Scalar::Text(s) => s.clone(),
            Scalar::Bool(b) => b.to_string(),
        }
    }

    /// False for empty text, zero, NaN and `false`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Number(v) => *v != 0.0 && !v.is_nan(),
            Scalar::Text(s) => !s.is_empty(),
            Scalar::Bool(b) => *b,
        }
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Number(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Number(v as f64)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

pub(crate) fn number_text(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        let text = if v > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if v.fract() == 0.0 && v.abs() < 1e21 {
        format!("{:.0}", v + 0.0)
    } else {
        v.to_string()
    }
}

/// Deserializes any JSON value, keeping it only when it is a scalar.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<Option<Scalar>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Scalar::from_json))
}

/// Like [`lenient`], but keeps only truthy scalars, as text.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient(deserializer)?
        .filter(Scalar::is_truthy)
        .map(|s| s.to_text()))
}
