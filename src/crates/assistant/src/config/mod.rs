//! Configuration management
//!
//! TOML files layered over compiled-in defaults, with environment overrides.

mod loader;
mod schema;

pub use loader::{ConfigLoader, ENV_PREFIX};
pub use schema::{AssistantConfig, ConversationConfig, DeviceConfig, LlmConfig, LoggingConfig};
