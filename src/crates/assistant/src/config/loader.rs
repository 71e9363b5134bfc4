//! Configuration loader
//!
//! Loads configuration from:
//! 1. Default values
//! 2. User-level config: ~/.assistant/assistant.toml
//! 3. An explicit file given on the command line
//!
//! Later configs override earlier ones, then `ASSISTANT_*` environment
//! variables override both.

use crate::config::schema::AssistantConfig;
use crate::error::{AssistantError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tooling::config::ConfigBuilder;
use tracing::{debug, info};

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "ASSISTANT_";

/// Configuration loader for user and explicit config files
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    user_config_path: Option<PathBuf>,
    explicit_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            user_config_path: Self::default_user_config_path(),
            explicit_path: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Default user-level config path (~/.assistant/assistant.toml)
    fn default_user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".assistant").join("assistant.toml"))
    }

    pub fn with_user_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_config_path = Some(path.into());
        self
    }

    /// Load this file last; it must exist
    pub fn with_explicit_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn user_config_path(&self) -> Option<&Path> {
        self.user_config_path.as_deref()
    }

    /// Load configuration with later sources taking precedence
    pub async fn load(&self) -> Result<AssistantConfig> {
        let mut config = AssistantConfig::default();
        debug!("Loading configuration with defaults");

        if let Some(path) = &self.user_config_path {
            if path.exists() {
                config.merge(Self::load_from_path(path).await?);
                debug!(path = %path.display(), "Loaded user-level config");
            } else {
                debug!(path = %path.display(), "User-level config not found, using defaults");
            }
        }

        if let Some(path) = &self.explicit_path {
            if !path.exists() {
                return Err(AssistantError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            config.merge(Self::load_from_path(path).await?);
            debug!(path = %path.display(), "Loaded explicit config");
        }

        let config = config.finalize(&self.env_prefix)?;
        info!(model = %config.llm.model, "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from a specific path
    async fn load_from_path(path: &Path) -> Result<AssistantConfig> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AssistantError::Config(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content).map_err(|e| {
            AssistantError::Config(format!(
                "Failed to parse config {}: {}",
                path.display(),
                e
            ))
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
