//! Configuration schema for the assistant

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tooling::config::{expand_home, get_env_nonempty, get_env_parse, ConfigBuilder};
use tooling::ToolingError;

/// Main assistant configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AssistantConfig {
    /// Remote model configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Device action configuration
    #[serde(default)]
    pub device: DeviceConfig,

    /// Conversation loop configuration
    #[serde(default)]
    pub conversation: ConversationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote model configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    /// Model name
    pub model: String,

    /// Maximum tokens to generate per response
    pub max_tokens: u32,

    /// API base URL
    pub api_base: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1024,
            api_base: "https://api.anthropic.com".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Device action configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeviceConfig {
    /// Bound on each Termux:API command, in seconds
    pub command_timeout_secs: u64,

    /// Notes directory; a leading `~` means the home directory
    pub notes_dir: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: 30,
            notes_dir: "~/notes".to_string(),
        }
    }
}

/// Conversation loop configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConversationConfig {
    /// Tool rounds allowed before a turn is abandoned
    pub max_tool_rounds: usize,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self { max_tool_rounds: 10 }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AssistantConfig {
    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: AssistantConfig) {
        // Whole sections are replaced; serde fills defaults for missing fields
        self.llm = other.llm;
        self.device = other.device;
        self.conversation = other.conversation;
        self.logging = other.logging;
    }

    /// Resolved notes directory
    pub fn notes_dir(&self) -> PathBuf {
        expand_home(&self.device.notes_dir, dirs::home_dir().as_deref())
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.device.command_timeout_secs)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout_secs)
    }
}

impl ConfigBuilder for AssistantConfig {
    fn validate(&self) -> tooling::Result<()> {
        if self.llm.model.trim().is_empty() {
            return Err(ToolingError::General("llm.model must not be empty".into()));
        }
        if self.llm.max_tokens == 0 {
            return Err(ToolingError::General("llm.max_tokens must be non-zero".into()));
        }
        if self.llm.timeout_secs == 0 {
            return Err(ToolingError::General("llm.timeout_secs must be non-zero".into()));
        }
        if self.device.command_timeout_secs == 0 {
            return Err(ToolingError::General(
                "device.command_timeout_secs must be non-zero".into(),
            ));
        }
        if self.conversation.max_tool_rounds == 0 {
            return Err(ToolingError::General(
                "conversation.max_tool_rounds must be non-zero".into(),
            ));
        }
        Ok(())
    }

    fn apply_env(&mut self, prefix: &str) -> tooling::Result<()> {
        if let Some(model) = get_env_nonempty(&format!("{}MODEL", prefix))? {
            self.llm.model = model;
        }
        if let Some(notes_dir) = get_env_nonempty(&format!("{}NOTES_DIR", prefix))? {
            self.device.notes_dir = notes_dir;
        }
        if let Some(rounds) = get_env_parse(&format!("{}MAX_TOOL_ROUNDS", prefix))? {
            self.conversation.max_tool_rounds = rounds;
        }
        if let Some(secs) = get_env_parse(&format!("{}COMMAND_TIMEOUT_SECS", prefix))? {
            self.device.command_timeout_secs = secs;
        }
        if let Some(level) = get_env_nonempty(&format!("{}LOG_LEVEL", prefix))? {
            self.logging.level = level;
        }
        Ok(())
    }
}
