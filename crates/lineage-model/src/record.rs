//! The lineage decision record.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value::Value;

/// Attribute name keying every lineage mapping.
pub type AttributeName = String;

/// Per-attribute mapping (source data, priority config, or result).
pub type AttributeMap = IndexMap<AttributeName, Value>;

/// How a single attribute value was chosen among competing sources.
///
/// `config`, `source_data` and `result` keep whatever the producer supplied,
/// so a missing or malformed side can still be reported to the user instead
/// of failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineageRecord {
    /// Decision type label (e.g., "merge by attribute").
    #[serde(rename = "type", default)]
    pub decision_type: String,
    /// Free-text description of the selection rule.
    #[serde(default)]
    pub logic: String,
    /// Priority configuration: one mapping, or a sequence of mappings.
    #[serde(default)]
    pub config: Value,
    /// Per-attribute sequences of `{source: value}` entries.
    #[serde(rename = "sourceData", default)]
    pub source_data: Value,
    /// Per-attribute selection.
    #[serde(default)]
    pub result: Value,
}

impl LineageRecord {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Source data, if it is a non-empty mapping.
    pub fn source_data(&self) -> Option<&AttributeMap> {
        self.source_data.non_empty_mapping()
    }

    /// Result, if it is a non-empty mapping.
    pub fn result(&self) -> Option<&AttributeMap> {
        self.result.non_empty_mapping()
    }

    /// Priority configuration mappings in declaration order.
    ///
    /// A single mapping yields one entry. A sequence yields each non-empty
    /// mapping it contains. Anything else, or nothing usable, yields `None`.
    pub fn configs(&self) -> Option<Vec<&AttributeMap>> {
        let configs: Vec<&AttributeMap> = match &self.config {
            Value::Mapping(_) => self.config.non_empty_mapping().into_iter().collect(),
            Value::Sequence(items) => items.iter().filter_map(Value::non_empty_mapping).collect(),
            Value::Scalar(_) => Vec::new(),
        };
        if configs.is_empty() {
            None
        } else {
            Some(configs)
        }
    }

    /// The record as pretty-printed JSON, preserving key order.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sides_are_reported_as_none() {
        let record = LineageRecord::from_json_str(r#"{"type": "t", "logic": "l"}"#)
            .expect("parse record");
        assert!(record.source_data().is_none());
        assert!(record.result().is_none());
        assert!(record.configs().is_none());
    }

    #[test]
    fn non_mapping_sides_are_reported_as_none() {
        let record = LineageRecord::from_json_str(
            r#"{"type": "t", "logic": "l", "sourceData": [1, 2], "result": "Calc", "config": {}}"#,
        )
        .expect("parse record");
        assert!(record.source_data().is_none());
        assert!(record.result().is_none());
        assert!(record.configs().is_none());
    }

    #[test]
    fn config_sequence_keeps_order() {
        let record = LineageRecord::from_json_str(
            r#"{"config": [{"X": ["S1"]}, {}, {"X": ["S2"]}]}"#,
        )
        .expect("parse record");
        let configs = record.configs().expect("configs");
        assert_eq!(configs.len(), 2);
        assert_eq!(
            configs[1]["X"],
            Value::Sequence(vec![Value::text("S2")])
        );
    }
}
