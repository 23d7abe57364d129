//! Error types for endpoint configuration and explanation requests.

use thiserror::Error;

/// Startup configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// No serving endpoint name was configured.
    #[error(
        "unable to determine the serving endpoint to use. Set the SERVING_ENDPOINT environment \
         variable (or pass --endpoint) to the name of a model serving endpoint you can query. \
         When deploying as a workspace app, add a serving endpoint resource with CAN_QUERY permission."
    )]
    MissingEndpoint,

    /// No workspace host was configured.
    #[error(
        "unable to determine the serving workspace. Set the DATABRICKS_HOST environment variable \
         (or pass --host) to the workspace URL."
    )]
    MissingHost,
}

/// Errors reported by the inference client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// The serving endpoint answered with a non-success status.
    #[error("serving endpoint error ({status}): {body}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The response did not contain any message content.
    #[error("unexpected response from serving endpoint: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::UnexpectedResponse(err.to_string())
    }
}

/// Errors from a user-triggered explanation action.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExplainError {
    /// The configured endpoint name is blank.
    #[error("no serving endpoint configured")]
    EmptyEndpoint,

    /// The inference client failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The request was abandoned before it completed.
    #[error("request cancelled")]
    Cancelled,
}

impl ExplainError {
    /// Returns a short message suitable for display next to the action.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::EmptyEndpoint => "No serving endpoint is configured for this app.",
            Self::Client(ClientError::Network(_)) => {
                "Could not reach the serving endpoint. Please check your connection."
            }
            Self::Client(ClientError::Server { .. }) => "The serving endpoint returned an error.",
            Self::Client(ClientError::UnexpectedResponse(_)) => {
                "The serving endpoint returned a response without any content."
            }
            Self::Cancelled => "The request was cancelled.",
        }
    }
}
