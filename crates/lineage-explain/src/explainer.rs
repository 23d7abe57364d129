//! Runs explanation actions against an inference client.

use std::future::Future;

use crate::client::InferenceClient;
use crate::error::{ClientError, ExplainError};
use crate::prompt::{ExplainAction, build_messages};
use crate::session::{ActionState, Session};

/// Issues explanation requests for a session.
#[derive(Debug, Clone)]
pub struct Explainer<C> {
    client: C,
    endpoint: String,
}

impl<C: InferenceClient> Explainer<C> {
    pub fn new(client: C, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Whether the configured endpoint serves a supported chat task.
    ///
    /// Informational only; actions are issued regardless of the answer.
    pub async fn endpoint_supported(&self) -> Result<bool, ClientError> {
        self.client.is_endpoint_supported(&self.endpoint).await
    }

    /// Run `action` for `session`, storing the outcome in the session.
    ///
    /// The request is abandoned when `cancel` completes first; dropping the
    /// request future aborts the HTTP call. Returns the settled state.
    pub async fn perform<F>(
        &self,
        session: &mut Session,
        action: ExplainAction,
        cancel: F,
    ) -> ActionState
    where
        F: Future<Output = ()>,
    {
        if self.endpoint.trim().is_empty() {
            session.settle(action, Err(ExplainError::EmptyEndpoint));
            return session.state(action).clone();
        }

        let messages = build_messages(action, session.record());
        session.begin(action);
        tracing::info!(
            action = %action,
            endpoint = %self.endpoint,
            max_tokens = action.max_tokens(),
            prompt_chars = messages.iter().map(|m| m.content.len()).sum::<usize>(),
            "requesting explanation"
        );

        let outcome = tokio::select! {
            response = self.client.query_model(&self.endpoint, &messages, action.max_tokens()) => {
                response.map(|response| response.content).map_err(ExplainError::from)
            }
            () = cancel => Err(ExplainError::Cancelled),
        };
        session.settle(action, outcome);
        session.state(action).clone()
    }
}
