//! Chat request and response types.

use serde::{Deserialize, Serialize};

use crate::message::{ContentBlock, Message};
use crate::tools::{ToolCall, ToolDefinition};

/// Request sent to a chat model.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// System instructions, sent apart from the conversation.
    pub system: Option<String>,

    /// Full conversation so far. The service is stateless.
    pub messages: Vec<Message>,

    /// Generation settings and tool catalog.
    pub config: ChatConfig,
}

impl ChatRequest {
    /// Create a new request from conversation messages.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            system: None,
            messages,
            config: ChatConfig::default(),
        }
    }

    /// Set the system instructions.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = Some(max_tokens);
        self
    }

    /// Offer tools the model may call.
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.config.tools = tools;
        self
    }
}

/// Generation settings for a request.
#[derive(Debug, Clone, Default)]
pub struct ChatConfig {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub tools: Vec<ToolDefinition>,
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    ToolUse,
    MaxTokens,
    StopSequence,
    #[serde(other)]
    Unknown,
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsageMetadata {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl UsageMetadata {
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Response from a chat model.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Provider-assigned response id.
    pub id: String,

    /// Model that produced the response.
    pub model: String,

    /// Raw content blocks, in the order produced.
    pub content: Vec<ContentBlock>,

    /// Stop condition.
    pub stop_reason: StopReason,

    /// Token usage, when reported.
    pub usage: Option<UsageMetadata>,
}

impl ChatResponse {
    /// Build a response from content blocks with the given stop reason.
    pub fn new(content: Vec<ContentBlock>, stop_reason: StopReason) -> Self {
        Self {
            id: String::new(),
            model: String::new(),
            content,
            stop_reason,
            usage: None,
        }
    }

    /// Whether the model is waiting for tool results.
    pub fn requests_tools(&self) -> bool {
        self.stop_reason == StopReason::ToolUse
    }

    /// Tool calls in the order they appear in the content.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(ContentBlock::as_tool_call)
            .collect()
    }

    /// Concatenated text content.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(ContentBlock::as_text)
            .collect::<Vec<_>>()
            .join("")
    }
}
