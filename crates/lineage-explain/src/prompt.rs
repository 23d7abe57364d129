//! Prompt construction for the two explanation actions.

use std::fmt;

use lineage_model::LineageRecord;

use crate::client::ChatMessage;

/// Line separating the serialized payload from the instruction.
pub const PROMPT_SEPARATOR: &str = "----------------";

/// A user-triggered request about the lineage decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExplainAction {
    /// Look for inconsistencies in the raw source data.
    EvaluateInconsistency,
    /// Explain why the result was chosen.
    ExplainResult,
}

impl ExplainAction {
    pub const ALL: [ExplainAction; 2] = [Self::EvaluateInconsistency, Self::ExplainResult];

    /// Answer budget, sized for the payload each action sends.
    #[must_use]
    pub const fn max_tokens(self) -> u32 {
        match self {
            Self::EvaluateInconsistency => 2048,
            Self::ExplainResult => 4096,
        }
    }

    #[must_use]
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::EvaluateInconsistency => {
                "please find and show me all potential inconsistencies. Do not show the source data again, only conclusions"
            }
            Self::ExplainResult => {
                "please explain the decision. Do not show the source data again, only the explanation"
            }
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EvaluateInconsistency => "Evaluate the source data for inconsistency",
            Self::ExplainResult => "Explain the result",
        }
    }

    /// Title of the panel holding the answer.
    #[must_use]
    pub const fn panel_title(self) -> &'static str {
        match self {
            Self::EvaluateInconsistency => "See evaluation results",
            Self::ExplainResult => "See the explanation",
        }
    }

    /// The part of the record this action sends, as pretty-printed JSON.
    pub fn payload(self, record: &LineageRecord) -> String {
        match self {
            Self::EvaluateInconsistency => {
                serde_json::to_string_pretty(&record.source_data).unwrap_or_default()
            }
            Self::ExplainResult => record.to_pretty_json(),
        }
    }
}

impl fmt::Display for ExplainAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Build the single user message for `action`.
pub fn build_messages(action: ExplainAction, record: &LineageRecord) -> Vec<ChatMessage> {
    let content = format!(
        "{}\n{PROMPT_SEPARATOR}\n{}",
        action.payload(record),
        action.instruction()
    );
    vec![ChatMessage::user(content)]
}

#[cfg(test)]
mod tests {
    use lineage_model::Value;

    use super::*;
    use crate::client::Role;

    fn record() -> LineageRecord {
        LineageRecord {
            decision_type: "merge by attribute".to_string(),
            logic: "first non-null wins".to_string(),
            config: Value::NULL,
            source_data: Value::from(serde_json::json!({"utmX": [{"Vendor A": "100"}]})),
            result: Value::from(serde_json::json!({"utmX": "Vendor A"})),
        }
    }

    #[test]
    fn evaluation_sends_only_source_data() {
        let messages = build_messages(ExplainAction::EvaluateInconsistency, &record());
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        insta::assert_snapshot!(messages[0].content, @r#"
        {
          "utmX": [
            {
              "Vendor A": "100"
            }
          ]
        }
        ----------------
        please find and show me all potential inconsistencies. Do not show the source data again, only conclusions
        "#);
    }

    #[test]
    fn explanation_sends_whole_record() {
        let messages = build_messages(ExplainAction::ExplainResult, &record());
        let content = &messages[0].content;
        assert!(content.starts_with("{\n  \"type\": \"merge by attribute\""));
        assert!(content.contains("\"logic\": \"first non-null wins\""));
        assert!(content.ends_with(&format!(
            "{PROMPT_SEPARATOR}\n{}",
            ExplainAction::ExplainResult.instruction()
        )));
    }

    #[test]
    fn token_budgets() {
        assert_eq!(ExplainAction::EvaluateInconsistency.max_tokens(), 2048);
        assert_eq!(ExplainAction::ExplainResult.max_tokens(), 4096);
    }
}
