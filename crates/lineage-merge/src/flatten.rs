//! Display normalization for lineage values.
//!
//! Every table cell is a list of display strings. [`flatten_for_display`]
//! produces that list; [`render_inline`] renders any value as one string and
//! is applied recursively, so a mapping is rendered the same way whether it
//! sits at the top level or inside a sequence.

use lineage_model::Value;

/// Normalize a value into the display strings of a single cell.
///
/// - scalar: one element holding its text form
/// - sequence: one element per item, each rendered inline
/// - mapping: one element holding the inline rendering of the whole mapping
pub fn flatten_for_display(value: &Value) -> Vec<String> {
    match value {
        Value::Scalar(scalar) => vec![scalar.to_string()],
        Value::Sequence(items) => items.iter().map(render_inline).collect(),
        Value::Mapping(_) => vec![render_inline(value)],
    }
}

/// Render a value as a single display string.
///
/// Mappings become `"key: value"` pairs joined with `", "`; sequences become
/// `[a, b]`.
pub fn render_inline(value: &Value) -> String {
    match value {
        Value::Scalar(scalar) => scalar.to_string(),
        Value::Sequence(items) => {
            let parts: Vec<String> = items.iter().map(render_inline).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Mapping(map) => map
            .iter()
            .map(|(key, value)| format!("{key}: {}", render_inline(value)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}
