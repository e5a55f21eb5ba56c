//! Cell values and their classification.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single cell value.
///
/// A `Float` holding NaN is treated as missing everywhere a null would be.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

/// Runtime classification of a value, used for type tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    Text,
    Other,
}

impl ValueKind {
    /// Name used in serialized reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Other => "other",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hashable identity of a value for distinct counting and row comparison.
///
/// Integral floats collapse onto the integer key so `1` and `1.0` compare
/// equal, and every NaN shares the null key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum DistinctKey<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    Text(&'a str),
    Timestamp(NaiveDateTime),
}

/// Bounds of the f64 range that converts to i64 without saturating.
const I64_FLOAT_MIN: f64 = -9_223_372_036_854_775_808.0;
const I64_FLOAT_MAX: f64 = 9_223_372_036_854_775_808.0;

impl Value {
    /// Returns true for `Null` and for NaN floats.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Classify this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Float(f) if f.is_nan() => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Int(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Timestamp(_) => ValueKind::Other,
        }
    }

    /// Numeric view of integer and float values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Text view of text values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if the value compares equal to zero: integer 0, float
    /// ±0.0, or `false`.
    pub fn equals_zero(&self) -> bool {
        match self {
            Value::Int(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::Bool(b) => !b,
            _ => false,
        }
    }

    pub(crate) fn distinct_key(&self) -> DistinctKey<'_> {
        match self {
            Value::Null => DistinctKey::Null,
            Value::Bool(b) => DistinctKey::Bool(*b),
            Value::Int(i) => DistinctKey::Int(*i),
            Value::Float(f) => {
                if f.is_nan() {
                    DistinctKey::Null
                } else if f.fract() == 0.0 && *f >= I64_FLOAT_MIN && *f < I64_FLOAT_MAX {
                    // also folds -0.0 onto 0
                    DistinctKey::Int(*f as i64)
                } else {
                    DistinctKey::Float(f.to_bits())
                }
            }
            Value::Text(s) => DistinctKey::Text(s),
            Value::Timestamp(t) => DistinctKey::Timestamp(*t),
        }
    }

    /// Render the value the way dataset previews show it.
    pub fn display(&self) -> String {
        match self {
            Value::Null => "NaN".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) if f.is_nan() => "NaN".to_string(),
            Value::Float(f) => {
                if f.fract() == 0.0 && f.is_finite() {
                    format!("{:.1}", f)
                } else {
                    f.to_string()
                }
            }
            Value::Text(s) => s.clone(),
            Value::Timestamp(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_is_null() {
        let nan = Value::Float(f64::NAN);
        assert!(nan.is_null());
        assert_eq!(nan.kind(), ValueKind::Null);
        assert_eq!(nan.distinct_key(), Value::Null.distinct_key());
    }

    #[test]
    fn test_integral_float_matches_int() {
        assert_eq!(Value::Float(1.0).distinct_key(), Value::Int(1).distinct_key());
        assert_eq!(Value::Float(-0.0).distinct_key(), Value::Int(0).distinct_key());
        assert_ne!(Value::Float(1.5).distinct_key(), Value::Int(1).distinct_key());
        assert_ne!(Value::Bool(true).distinct_key(), Value::Int(1).distinct_key());
    }

    #[test]
    fn test_equals_zero() {
        assert!(Value::Int(0).equals_zero());
        assert!(Value::Float(-0.0).equals_zero());
        assert!(Value::Bool(false).equals_zero());
        assert!(!Value::Bool(true).equals_zero());
        assert!(!Value::from("0").equals_zero());
        assert!(!Value::Null.equals_zero());
        assert!(!Value::Float(f64::NAN).equals_zero());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::Text("a".to_string()));
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ValueKind::Float).unwrap();
        assert_eq!(json, "\"float\"");
    }
}
