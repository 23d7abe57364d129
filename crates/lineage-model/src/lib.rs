pub mod error;
pub mod record;
pub mod value;

pub use error::{ModelError, Result};
pub use record::{AttributeMap, AttributeName, LineageRecord};
pub use value::{NULL_SENTINEL, Scalar, SourceValue, Value};

const SAMPLE_RECORD_JSON: &str = include_str!("../data/sample_lineage.json");

/// The built-in "merge by attribute" decision over six coordinate attributes.
///
/// Stands in for a record delivered by an upstream lineage-tracking system.
pub fn sample_record() -> Result<LineageRecord> {
    LineageRecord::from_json_str(SAMPLE_RECORD_JSON)
}
