//! Per-session state.
//!
//! A [`Session`] owns the lineage record being inspected and the state of each
//! explanation action. It is created once per session and handed explicitly
//! to every render and action call.

use lineage_model::LineageRecord;

use crate::error::ExplainError;
use crate::prompt::ExplainAction;

/// Lifecycle of one explanation action.
///
/// `Idle -> Pending -> Ready | Failed | Cancelled`. Triggering the action again
/// from any settled state starts a new request; answers are never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActionState {
    /// Not triggered yet.
    #[default]
    Idle,
    /// Request in flight.
    Pending,
    /// The model answered.
    Ready(String),
    /// The request failed.
    Failed {
        /// Short display text.
        message: String,
        /// The full error.
        detail: String,
    },
    /// The request was abandoned before it completed.
    Cancelled,
}

impl ActionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The answer text, when ready.
    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Ready(text) => Some(text),
            _ => None,
        }
    }
}

/// One user session over a single lineage record.
#[derive(Debug, Clone)]
pub struct Session {
    record: LineageRecord,
    evaluation: ActionState,
    explanation: ActionState,
}

impl Session {
    pub fn new(record: LineageRecord) -> Self {
        Self {
            record,
            evaluation: ActionState::Idle,
            explanation: ActionState::Idle,
        }
    }

    pub fn record(&self) -> &LineageRecord {
        &self.record
    }

    pub fn state(&self, action: ExplainAction) -> &ActionState {
        match action {
            ExplainAction::EvaluateInconsistency => &self.evaluation,
            ExplainAction::ExplainResult => &self.explanation,
        }
    }

    fn state_mut(&mut self, action: ExplainAction) -> &mut ActionState {
        match action {
            ExplainAction::EvaluateInconsistency => &mut self.evaluation,
            ExplainAction::ExplainResult => &mut self.explanation,
        }
    }

    /// Mark `action` as in flight.
    pub fn begin(&mut self, action: ExplainAction) {
        tracing::debug!(action = %action, "action pending");
        *self.state_mut(action) = ActionState::Pending;
    }

    /// Record the outcome of `action`.
    pub fn settle(&mut self, action: ExplainAction, outcome: Result<String, ExplainError>) {
        let state = match outcome {
            Ok(text) => ActionState::Ready(text),
            Err(ExplainError::Cancelled) => {
                tracing::info!(action = %action, "action cancelled");
                ActionState::Cancelled
            }
            Err(error) => {
                tracing::warn!(action = %action, %error, "action failed");
                ActionState::Failed {
                    message: error.user_message().to_string(),
                    detail: error.to_string(),
                }
            }
        };
        *self.state_mut(action) = state;
    }
}
