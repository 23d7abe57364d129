//! Merge-table construction.
//!
//! Combines priority configuration, source data, and result into one table
//! keyed by attribute name. The join is a full outer join: an attribute that
//! appears in only one input still gets a row, with blank cells elsewhere.

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use lineage_model::{AttributeMap, Value};

use crate::flatten::flatten_for_display;

/// Column label for the configuration category.
pub const CONFIGURATION_COLUMN: &str = "Merge configuration";
/// Column label for the source-data category.
pub const SOURCE_DATA_COLUMN: &str = "Source data";
/// Column label for the result category.
pub const RESULT_COLUMN: &str = "Result";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("invalid input: {0} is empty")]
    InvalidInput(&'static str),
}

/// A display cell: flattened strings, or blank when the key is missing on that side.
pub type Cell = Option<Vec<String>>;

/// One row of the merge table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeRow {
    pub attribute: String,
    pub configuration: Cell,
    pub source_data: Cell,
    pub result: Cell,
}

impl MergeRow {
    fn new(attribute: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            configuration: None,
            source_data: None,
            result: None,
        }
    }
}

/// The unified, display-ready merge table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeTable {
    /// Label of the key column.
    pub key_label: String,
    /// Whether the configuration column is part of the table.
    pub has_configuration: bool,
    pub rows: Vec<MergeRow>,
}

impl MergeTable {
    /// Column labels in display order.
    pub fn column_labels(&self) -> Vec<&str> {
        let mut labels = vec![self.key_label.as_str()];
        if self.has_configuration {
            labels.push(CONFIGURATION_COLUMN);
        }
        labels.push(SOURCE_DATA_COLUMN);
        labels.push(RESULT_COLUMN);
        labels
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows for the given attribute, in table order.
    pub fn rows_for<'a>(&'a self, attribute: &'a str) -> impl Iterator<Item = &'a MergeRow> + 'a {
        self.rows.iter().filter(move |row| row.attribute == attribute)
    }
}

/// Build the merge table.
///
/// `config` mappings are concatenated in order without deduplication, so an
/// attribute present in two mappings yields two rows. Row order is first
/// appearance: configuration rows, then source-data keys not yet seen, then
/// result keys not yet seen.
///
/// # Errors
///
/// Returns [`MergeError::InvalidInput`] when `source_data` or `result` is empty.
pub fn build_merge_table(
    source_data: &AttributeMap,
    result: &AttributeMap,
    key_label: &str,
    config: Option<&[&AttributeMap]>,
) -> Result<MergeTable, MergeError> {
    if source_data.is_empty() {
        return Err(MergeError::InvalidInput("source data"));
    }
    if result.is_empty() {
        return Err(MergeError::InvalidInput("result"));
    }

    let config = config.filter(|configs| !configs.is_empty());
    let mut rows: Vec<MergeRow> = Vec::new();
    if let Some(configs) = config {
        for mapping in configs {
            for (attribute, value) in mapping.iter() {
                let mut row = MergeRow::new(attribute);
                row.configuration = Some(flatten_for_display(value));
                rows.push(row);
            }
        }
    }

    outer_join(&mut rows, source_data, |row| &mut row.source_data);
    outer_join(&mut rows, result, |row| &mut row.result);

    tracing::debug!(
        rows = rows.len(),
        with_configuration = config.is_some(),
        "built merge table"
    );

    Ok(MergeTable {
        key_label: key_label.to_string(),
        has_configuration: config.is_some(),
        rows,
    })
}

/// Join one category into the existing rows.
///
/// Every existing row with a matching key receives the cell; keys with no
/// existing row are appended in the category's order.
fn outer_join(
    rows: &mut Vec<MergeRow>,
    category: &IndexMap<String, Value>,
    cell: impl Fn(&mut MergeRow) -> &mut Cell,
) {
    let mut matched = vec![false; category.len()];
    for row in rows.iter_mut() {
        if let Some((index, _, value)) = category.get_full(row.attribute.as_str()) {
            *cell(row) = Some(flatten_for_display(value));
            matched[index] = true;
        }
    }
    for ((attribute, value), seen) in category.iter().zip(matched) {
        if seen {
            continue;
        }
        let mut row = MergeRow::new(attribute);
        *cell(&mut row) = Some(flatten_for_display(value));
        rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(json: serde_json::Value) -> AttributeMap {
        match Value::from(json) {
            Value::Mapping(map) => map,
            other => panic!("expected mapping, got {other:?}"),
        }
    }

    fn strings(items: &[&str]) -> Cell {
        Some(items.iter().map(|item| (*item).to_string()).collect())
    }

    #[test]
    fn single_attribute_without_config() {
        let source = map(serde_json::json!({"utmX": [{"Vendor A": "100"}, {"Vendor B": "NULL"}]}));
        let result = map(serde_json::json!({"utmX": "Vendor A"}));
        let table = build_merge_table(&source, &result, "Data source", None).expect("table");

        assert!(!table.has_configuration);
        assert_eq!(table.column_labels(), vec!["Data source", "Source data", "Result"]);
        assert_eq!(
            table.rows,
            vec![MergeRow {
                attribute: "utmX".to_string(),
                configuration: None,
                source_data: strings(&["Vendor A: 100", "Vendor B: NULL"]),
                result: strings(&["Vendor A"]),
            }]
        );
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let empty = AttributeMap::new();
        let result = map(serde_json::json!({"X": "A"}));
        assert_eq!(
            build_merge_table(&empty, &result, "k", None),
            Err(MergeError::InvalidInput("source data"))
        );
        assert_eq!(
            build_merge_table(&result, &empty, "k", None),
            Err(MergeError::InvalidInput("result"))
        );
    }

    #[test]
    fn config_only_attribute_has_blank_cells() {
        let config = map(serde_json::json!({"Z": ["S1"], "X": ["S1", "S2"]}));
        let source = map(serde_json::json!({"X": [{"S1": "1"}]}));
        let result = map(serde_json::json!({"X": "S1"}));
        let table =
            build_merge_table(&source, &result, "Attribute name", Some(&[&config][..])).expect("table");

        assert_eq!(table.len(), 2);
        let z = &table.rows[0];
        assert_eq!(z.attribute, "Z");
        assert_eq!(z.configuration, strings(&["S1"]));
        assert_eq!(z.source_data, None);
        assert_eq!(z.result, None);
    }

    #[test]
    fn multiple_configs_are_concatenated() {
        let first = map(serde_json::json!({"X": ["S1"]}));
        let second = map(serde_json::json!({"X": ["S2"]}));
        let source = map(serde_json::json!({"X": [{"S1": "1"}]}));
        let result = map(serde_json::json!({"X": "S1"}));
        let table = build_merge_table(&source, &result, "Attribute name", Some(&[&first, &second][..]))
            .expect("table");

        let rows: Vec<&MergeRow> = table.rows_for("X").collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].configuration, strings(&["S1"]));
        assert_eq!(rows[1].configuration, strings(&["S2"]));
        assert!(rows.iter().all(|row| row.source_data == strings(&["S1: 1"])));
        assert!(rows.iter().all(|row| row.result == strings(&["S1"])));
    }

    #[test]
    fn empty_config_slice_is_treated_as_absent() {
        let source = map(serde_json::json!({"X": [{"S1": "1"}]}));
        let result = map(serde_json::json!({"X": "S1"}));
        let table = build_merge_table(&source, &result, "Data source", Some(&[][..])).expect("table");
        assert!(!table.has_configuration);
    }
}
