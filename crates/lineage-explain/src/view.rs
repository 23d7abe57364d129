//! Display model of a lineage decision.

use std::fmt;

use serde::Serialize;

use lineage_merge::{MergeTable, build_merge_table};
use lineage_model::LineageRecord;

/// Key column label when a priority configuration is shown.
pub const KEY_LABEL_WITH_CONFIG: &str = "Attribute name";
/// Key column label without configuration.
pub const KEY_LABEL_WITHOUT_CONFIG: &str = "Data source";

/// Non-fatal problems with the record, shown instead of the merge table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewWarning {
    NoSourceData,
    NoResult,
}

impl ViewWarning {
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoSourceData => "No source data available",
            Self::NoResult => "No merge result available",
        }
    }
}

impl fmt::Display for ViewWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Everything one render pass shows about a lineage decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineageView {
    pub decision_type: String,
    pub logic: String,
    /// Present only when both source data and result are non-empty mappings.
    pub table: Option<MergeTable>,
    pub warnings: Vec<ViewWarning>,
}

impl LineageView {
    pub fn from_record(record: &LineageRecord) -> Self {
        let mut view = Self {
            decision_type: record.decision_type.clone(),
            logic: record.logic.clone(),
            table: None,
            warnings: Vec::new(),
        };

        let (Some(source_data), Some(result)) = (record.source_data(), record.result()) else {
            if record.source_data().is_none() {
                view.warnings.push(ViewWarning::NoSourceData);
            }
            if record.result().is_none() {
                view.warnings.push(ViewWarning::NoResult);
            }
            tracing::debug!(warnings = view.warnings.len(), "lineage record incomplete");
            return view;
        };

        let configs = record.configs();
        let key_label = if configs.is_some() {
            KEY_LABEL_WITH_CONFIG
        } else {
            KEY_LABEL_WITHOUT_CONFIG
        };
        match build_merge_table(source_data, result, key_label, configs.as_deref()) {
            Ok(table) => view.table = Some(table),
            Err(error) => tracing::warn!(%error, "merge table not built"),
        }
        view
    }

    /// Heading shown above the merge table.
    pub fn table_title(&self) -> Option<&'static str> {
        self.table.as_ref().map(|table| {
            if table.has_configuration {
                "Merge config, source data and result:"
            } else {
                "Source data and result:"
            }
        })
    }
}
