//! Tagged value type for lineage payloads.
//!
//! Vendor feeds put almost anything into a lineage record: plain strings,
//! numbers, JSON nulls, lists of `{source: value}` mappings, and occasionally
//! deeper structures. [`Value`] closes that over three variants so that every
//! consumer handles each shape explicitly.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Text literal used by upstream feeds to mean "no value".
pub const NULL_SENTINEL: &str = "NULL";

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Returns true for JSON null, empty text, and the `NULL` sentinel.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => {
                let trimmed = text.trim();
                trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NULL_SENTINEL)
            }
            Self::Bool(_) | Self::Number(_) => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str(NULL_SENTINEL),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// A lineage payload value: a scalar, an ordered sequence, or an ordered mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    Scalar(Scalar),
    Sequence(Vec<Value>),
    Mapping(IndexMap<String, Value>),
}

impl Value {
    pub const NULL: Value = Value::Scalar(Scalar::Null);

    pub fn text(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(value.into()))
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// True for null scalars (see [`Scalar::is_null`]); containers are never null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(scalar) if scalar.is_null())
    }

    /// Returns the mapping only if it holds at least one entry.
    pub fn non_empty_mapping(&self) -> Option<&IndexMap<String, Value>> {
        self.as_mapping().filter(|map| !map.is_empty())
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::NULL
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Scalar(Scalar::Null),
            serde_json::Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => Self::Scalar(Scalar::Number(n)),
            serde_json::Value::String(s) => Self::Scalar(Scalar::Text(s)),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Scalar(Scalar::Null) => Self::Null,
            Value::Scalar(Scalar::Bool(b)) => Self::Bool(b),
            Value::Scalar(Scalar::Number(n)) => Self::Number(n),
            Value::Scalar(Scalar::Text(s)) => Self::String(s),
            Value::Sequence(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Mapping(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

/// One `{sourceName: value}` entry of an attribute's source data.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceValue {
    pub source: String,
    pub value: Value,
}

impl SourceValue {
    /// Extracts the entry from a single-key mapping.
    ///
    /// Returns `None` for anything else, including mappings with several keys.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_mapping()?;
        if map.len() != 1 {
            return None;
        }
        let (source, value) = map.first()?;
        Some(Self {
            source: source.clone(),
            value: value.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_and_blank_text_are_null() {
        assert!(Value::text("NULL").is_null());
        assert!(Value::text("null").is_null());
        assert!(Value::text("  ").is_null());
        assert!(Value::NULL.is_null());
        assert!(!Value::text("0").is_null());
        assert!(!Value::Sequence(vec![]).is_null());
    }

    #[test]
    fn mapping_order_survives_json() {
        let json = serde_json::json!({"b": 1, "a": [true, null]});
        let value = Value::from(json.clone());
        let keys: Vec<&str> = value
            .as_mapping()
            .expect("mapping")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(serde_json::Value::from(value), json);
    }

    #[test]
    fn source_value_requires_single_key() {
        let entry = Value::from(serde_json::json!({"Vendor A": "1.0"}));
        let parsed = SourceValue::from_value(&entry).expect("entry");
        assert_eq!(parsed.source, "Vendor A");
        assert_eq!(parsed.value, Value::text("1.0"));

        let wide = Value::from(serde_json::json!({"A": 1, "B": 2}));
        assert!(SourceValue::from_value(&wide).is_none());
        assert!(SourceValue::from_value(&Value::text("raw")).is_none());
    }
}
