//! Serving endpoint configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming the serving endpoint.
pub const ENDPOINT_ENV: &str = "SERVING_ENDPOINT";
/// Environment variable holding the workspace URL.
pub const HOST_ENV: &str = "DATABRICKS_HOST";
/// Environment variable holding the access token.
pub const TOKEN_ENV: &str = "DATABRICKS_TOKEN";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Raw, possibly incomplete serving settings as collected from flags or the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServingSettings {
    /// Serving endpoint name.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Workspace URL; a bare host name gets an `https://` scheme.
    #[serde(default)]
    pub host: Option<String>,

    /// Bearer token.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Validated serving configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServingConfig {
    pub endpoint: String,
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ServingSettings {
    /// Collect settings through a key lookup (normally the process environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint: lookup(ENDPOINT_ENV),
            host: lookup(HOST_ENV),
            token: lookup(TOKEN_ENV),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Collect settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEndpoint`] when the endpoint is absent or blank,
    /// and [`ConfigError::MissingHost`] when the host is absent or blank.
    pub fn resolve(&self) -> Result<ServingConfig, ConfigError> {
        let endpoint = non_blank(self.endpoint.as_deref()).ok_or(ConfigError::MissingEndpoint)?;
        let host = non_blank(self.host.as_deref()).ok_or(ConfigError::MissingHost)?;
        Ok(ServingConfig {
            endpoint: endpoint.to_string(),
            base_url: normalize_host(host),
            token: non_blank(self.token.as_deref()).map(str::to_string),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn normalize_host(host: &str) -> String {
    let trimmed = host.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
