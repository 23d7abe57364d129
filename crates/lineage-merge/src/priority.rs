//! Priority-rule resolution.
//!
//! Recomputes the winning source per attribute: among the configured sources,
//! in order, the first one whose value is present and not null wins. When
//! every configured source is null (or absent) the attribute resolves to no
//! source. The recomputation can then be compared against the recorded
//! result to spot selections that do not follow the rule.

use indexmap::IndexMap;
use serde::Serialize;

use lineage_model::{AttributeMap, SourceValue, Value};

/// Outcome of the priority rule for one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub attribute: String,
    /// Winning source, or `None` when every candidate is null.
    pub source: Option<String>,
    /// Display text of the winning value.
    pub value: Option<String>,
}

/// Agreement between a resolution and the recorded result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultCheck {
    Agrees,
    Disagrees {
        expected: Option<String>,
        recorded: String,
    },
    /// The record has no text result for this attribute.
    NotRecorded,
}

impl ResultCheck {
    pub fn is_disagreement(&self) -> bool {
        matches!(self, Self::Disagrees { .. })
    }
}

/// Resolve every configured attribute.
///
/// Later configuration mappings override earlier ones for the same attribute.
/// Attributes are reported in first-appearance order across the mappings.
pub fn resolve_by_priority(configs: &[&AttributeMap], source_data: &AttributeMap) -> Vec<Resolution> {
    let mut priorities: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for config in configs {
        for (attribute, order) in config.iter() {
            priorities.insert(attribute.as_str(), source_order(order));
        }
    }

    priorities
        .into_iter()
        .map(|(attribute, order)| {
            let candidates = source_data
                .get(attribute)
                .map(candidate_values)
                .unwrap_or_default();
            let winner = order.iter().find_map(|source| {
                candidates
                    .iter()
                    .find(|candidate| candidate.source == *source && !candidate.value.is_null())
            });
            match winner {
                Some(candidate) => Resolution {
                    attribute: attribute.to_string(),
                    source: Some(candidate.source.clone()),
                    value: Some(crate::flatten::render_inline(&candidate.value)),
                },
                None => {
                    tracing::debug!(attribute, "no non-null source for attribute");
                    Resolution {
                        attribute: attribute.to_string(),
                        source: None,
                        value: None,
                    }
                }
            }
        })
        .collect()
}

/// Compare resolutions with the recorded result.
///
/// A recorded null (JSON null or the `NULL` sentinel) agrees with a
/// resolution to no source.
pub fn check_result(resolutions: &[Resolution], result: &AttributeMap) -> Vec<(String, ResultCheck)> {
    resolutions
        .iter()
        .map(|resolution| {
            let check = match result.get(resolution.attribute.as_str()) {
                Some(recorded) if recorded.is_null() => {
                    if resolution.source.is_none() {
                        ResultCheck::Agrees
                    } else {
                        ResultCheck::Disagrees {
                            expected: resolution.source.clone(),
                            recorded: lineage_model::NULL_SENTINEL.to_string(),
                        }
                    }
                }
                Some(recorded) => match recorded.as_text() {
                    Some(text) if resolution.source.as_deref() == Some(text) => ResultCheck::Agrees,
                    Some(text) => ResultCheck::Disagrees {
                        expected: resolution.source.clone(),
                        recorded: text.to_string(),
                    },
                    None => ResultCheck::NotRecorded,
                },
                None => ResultCheck::NotRecorded,
            };
            (resolution.attribute.clone(), check)
        })
        .collect()
}

fn source_order(order: &Value) -> Vec<&str> {
    match order {
        Value::Sequence(items) => items.iter().filter_map(Value::as_text).collect(),
        Value::Scalar(_) => order.as_text().into_iter().collect(),
        Value::Mapping(_) => Vec::new(),
    }
}

fn candidate_values(entries: &Value) -> Vec<SourceValue> {
    match entries {
        Value::Sequence(items) => items.iter().filter_map(SourceValue::from_value).collect(),
        Value::Mapping(map) => map
            .iter()
            .map(|(source, value)| SourceValue {
                source: source.clone(),
                value: value.clone(),
            })
            .collect(),
        Value::Scalar(_) => Vec::new(),
    }
}
