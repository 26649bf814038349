//! Runtime type classification for untrusted JSON values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Type name reported for a field that is not present at all.
pub const UNDEFINED_TYPE_NAME: &str = "undefined";

/// Runtime type of a JSON value, as reported in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// JSON `null`.
    Null,
    /// JSON `true` or `false`.
    Boolean,
    /// Any JSON number.
    Number,
    /// JSON string.
    String,
    /// JSON array.
    Array,
    /// JSON object.
    Object,
}

impl JsonType {
    /// Classify a JSON value.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Lowercase type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Type name of an optional field, `"undefined"` when absent.
#[must_use]
pub fn type_name_of(value: Option<&Value>) -> &'static str {
    value.map_or(UNDEFINED_TYPE_NAME, |value| JsonType::of(value).as_str())
}

/// Loose truthiness: `null`, `false`, `0`, and `""` are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Truthiness of an optional field; absence is falsy.
#[must_use]
pub fn is_present_and_truthy(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}

/// Loose container check that accepts arrays as well as objects.
///
/// Used where sequences are deliberately tolerated in place of mappings.
#[must_use]
pub const fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}
