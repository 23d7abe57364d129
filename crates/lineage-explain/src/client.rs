//! Inference client contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat message sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Text returned by the model, shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResponse {
    pub content: String,
}

/// A hosted language-model endpoint.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Send `messages` to `endpoint`, allowing at most `max_tokens` in the answer.
    async fn query_model(
        &self,
        endpoint: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<ModelResponse, ClientError>;

    /// Whether `endpoint` serves a chat task this application can talk to.
    async fn is_endpoint_supported(&self, endpoint: &str) -> Result<bool, ClientError>;
}
