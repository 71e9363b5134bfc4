//! LLM provider implementations for the pocket assistant.
//!
//! This crate provides the provider-agnostic chat types used by the
//! assistant's orchestration loop, the [`ChatModel`] trait, and a concrete
//! implementation for Anthropic's Messages API with tool calling.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use llm::remote::ClaudeClient;
//! use llm::{ChatModel, ChatRequest, Message, RemoteLlmConfig, ToolDefinition};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteLlmConfig::from_env(
//!         "ANTHROPIC_API_KEY",
//!         "https://api.anthropic.com",
//!         "claude-sonnet-4-20250514",
//!     )?;
//!     let client = ClaudeClient::new(config)?;
//!
//!     let request = ChatRequest::new(vec![Message::user_text("How full is my battery?")])
//!         .with_tools(vec![ToolDefinition::new(
//!             "get_battery_status",
//!             "Get the current battery level and charging status",
//!         )]);
//!
//!     let response = client.chat(request).await?;
//!     for call in response.tool_calls() {
//!         println!("Model wants {} with {}", call.name, call.arguments);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod config;
pub mod error;
pub mod message;
pub mod tools;
pub mod traits;

#[cfg(feature = "remote")]
pub mod remote;

// Re-export commonly used types
pub use chat::{ChatConfig, ChatRequest, ChatResponse, StopReason, UsageMetadata};
pub use config::RemoteLlmConfig;
pub use error::{LlmError, Result};
pub use message::{ContentBlock, Message, Role};
pub use tools::{ToolCall, ToolDefinition};
pub use traits::ChatModel;
