//! Model-serving HTTP client.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::client::{ChatMessage, InferenceClient, ModelResponse};
use crate::config::ServingConfig;
use crate::error::ClientError;

/// User agent string for serving requests.
const USER_AGENT_VALUE: &str = concat!("explain-lineage/", env!("CARGO_PKG_VERSION"));

/// Endpoint task types that accept chat messages.
pub const SUPPORTED_TASKS: &[&str] = &["agent/v1/chat", "agent/v2/chat", "llm/v1/chat"];

#[derive(Serialize)]
struct InvocationRequest<'a> {
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

/// Client for a model-serving workspace.
#[derive(Debug, Clone)]
pub struct ServingClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ServingClient {
    /// Creates a client for the configured workspace.
    pub fn new(config: &ServingConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    fn invocations_url(&self, endpoint: &str) -> String {
        format!("{}/serving-endpoints/{}/invocations", self.base_url, endpoint)
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/api/2.0/serving-endpoints/{}", self.base_url, endpoint)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Checks the status and parses the JSON body.
    async fn handle_response(&self, response: reqwest::Response) -> Result<JsonValue, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                body,
            });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl InferenceClient for ServingClient {
    async fn query_model(
        &self,
        endpoint: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<ModelResponse, ClientError> {
        let url = self.invocations_url(endpoint);
        tracing::debug!(%url, messages = messages.len(), max_tokens, "querying serving endpoint");

        let request = self.client.post(&url).json(&InvocationRequest {
            messages,
            max_tokens,
        });
        let response = self.authorize(request).send().await?;
        let body = self.handle_response(response).await?;
        let content = extract_content(&body).ok_or_else(|| {
            ClientError::UnexpectedResponse("no message content in response".to_string())
        })?;

        tracing::debug!(chars = content.len(), "serving endpoint answered");
        Ok(ModelResponse { content })
    }

    async fn is_endpoint_supported(&self, endpoint: &str) -> Result<bool, ClientError> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!(%url, "fetching serving endpoint metadata");

        let response = self.authorize(self.client.get(&url)).send().await?;
        let body = self.handle_response(response).await?;
        let task = body.get("task").and_then(JsonValue::as_str);
        tracing::info!(endpoint, task = task.unwrap_or("-"), "serving endpoint task");
        Ok(task.is_some_and(|task| SUPPORTED_TASKS.contains(&task)))
    }
}

/// Extract the answer text from an invocation response.
///
/// Accepts the chat-completions shape (`choices[0].message.content`, either a
/// string or a list of text parts) and the agent shape (last entry of
/// `messages`).
pub fn extract_content(body: &JsonValue) -> Option<String> {
    let from_choices = body
        .get("choices")
        .and_then(JsonValue::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(content_text);
    if from_choices.is_some() {
        return from_choices;
    }
    body.get("messages")
        .and_then(JsonValue::as_array)
        .and_then(|messages| messages.last())
        .and_then(|message| message.get("content"))
        .and_then(content_text)
}

fn content_text(content: &JsonValue) -> Option<String> {
    match content {
        JsonValue::String(text) => Some(text.clone()),
        JsonValue::Array(parts) => {
            let texts: Vec<&str> = parts
                .iter()
                .filter_map(|part| part.get("text").and_then(JsonValue::as_str))
                .collect();
            if texts.is_empty() {
                None
            } else {
                Some(texts.join(""))
            }
        }
        _ => None,
    }
}
