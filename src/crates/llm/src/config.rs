//! Configuration for remote LLM providers.

use crate::error::{LlmError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for remote LLM providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteLlmConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Base URL for the API, e.g. "https://api.anthropic.com".
    pub base_url: String,

    /// Model name/identifier.
    pub model: String,

    /// Request timeout duration.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl RemoteLlmConfig {
    /// Create a new remote LLM configuration.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            timeout: default_timeout(),
        }
    }

    /// Create configuration from environment variable.
    pub fn from_env(
        env_var: &str,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let api_key = std::env::var(env_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                LlmError::ApiKeyNotFound(format!("Environment variable: {}", env_var))
            })?;

        Ok(Self::new(api_key, base_url, model))
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_config_builder() {
        let config = RemoteLlmConfig::new(
            "test-key",
            "https://api.anthropic.com",
            "claude-sonnet-4-20250514",
        )
        .with_timeout(Duration::from_secs(120));

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "https://api.anthropic.com");
        assert_eq!(config.model, "claude-sonnet-4-20250514");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_from_env_missing_key() {
        let result = RemoteLlmConfig::from_env(
            "LLM_TEST_MISSING_KEY_98765",
            "https://api.anthropic.com",
            "model",
        );
        assert!(matches!(result, Err(LlmError::ApiKeyNotFound(_))));
    }

    #[test]
    fn test_from_env_blank_key_is_missing() {
        std::env::set_var("LLM_TEST_BLANK_KEY", "  ");
        let result = RemoteLlmConfig::from_env("LLM_TEST_BLANK_KEY", "https://x", "model");
        assert!(matches!(result, Err(LlmError::ApiKeyNotFound(_))));
        std::env::remove_var("LLM_TEST_BLANK_KEY");
    }
}
