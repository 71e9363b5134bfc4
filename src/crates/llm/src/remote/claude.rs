//! Anthropic Claude client implementation.
//!
//! Speaks the Messages API with tool use: the tool catalog travels with
//! every request, `tool_use` blocks come back in the response content, and
//! `tool_result` blocks are sent on the next user turn.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::remote::ClaudeClient;
//! use llm::{ChatModel, ChatRequest, Message, RemoteLlmConfig};
//!
//! let config = RemoteLlmConfig::from_env(
//!     "ANTHROPIC_API_KEY",
//!     "https://api.anthropic.com",
//!     "claude-sonnet-4-20250514",
//! )?;
//! let client = ClaudeClient::new(config)?;
//!
//! let request = ChatRequest::new(vec![Message::user_text("Hello!")]);
//! let response = client.chat(request).await?;
//! ```

use crate::chat::{ChatRequest, ChatResponse, StopReason, UsageMetadata};
use crate::config::RemoteLlmConfig;
use crate::error::{LlmError, Result};
use crate::message::{ContentBlock, Message};
use crate::tools::ToolDefinition;
use crate::traits::ChatModel;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Used when a request does not set `max_tokens`; the API requires one.
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Anthropic Claude API client.
#[derive(Clone)]
pub struct ClaudeClient {
    config: RemoteLlmConfig,
    client: Client,
}

impl std::fmt::Debug for ClaudeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish()
    }
}

impl ClaudeClient {
    /// Create a new Claude client with the given configuration.
    pub fn new(config: RemoteLlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn build_request<'a>(&'a self, request: &'a ChatRequest) -> ClaudeRequest<'a> {
        ClaudeRequest {
            model: &self.config.model,
            max_tokens: request.config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            system: request.system.as_deref(),
            tools: request.config.tools.iter().map(ClaudeTool::from).collect(),
            messages: &request.messages,
            temperature: request.config.temperature,
        }
    }

    fn convert_response(&self, claude_resp: ClaudeResponse) -> ChatResponse {
        let content = claude_resp
            .content
            .into_iter()
            .filter_map(ClaudeContent::into_block)
            .collect();

        ChatResponse {
            id: claude_resp.id,
            model: claude_resp.model,
            content,
            stop_reason: claude_resp.stop_reason.unwrap_or(StopReason::Unknown),
            usage: Some(UsageMetadata::new(
                claude_resp.usage.input_tokens,
                claude_resp.usage.output_tokens,
            )),
        }
    }
}

#[async_trait]
impl ChatModel for ClaudeClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));
        let body = self.build_request(&request);

        debug!(
            model = %self.config.model,
            messages = request.messages.len(),
            tools = request.config.tools.len(),
            "Sending Claude request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                401 => LlmError::AuthenticationError(error_text),
                429 => LlmError::RateLimitExceeded(error_text),
                _ => LlmError::ProviderError(format!("Claude API error {}: {}", status, error_text)),
            });
        }

        let claude_resp: ClaudeResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(self.convert_response(claude_resp))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// Claude API types
#[derive(Debug, Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ClaudeTool<'a>>,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ClaudeTool<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: &'a JsonValue,
}

impl<'a> From<&'a ToolDefinition> for ClaudeTool<'a> {
    fn from(tool: &'a ToolDefinition) -> Self {
        Self {
            name: &tool.name,
            description: &tool.description,
            input_schema: &tool.input_schema,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    id: String,
    content: Vec<ClaudeContent>,
    model: String,
    stop_reason: Option<StopReason>,
    usage: ClaudeUsage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClaudeContent {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: JsonValue,
    },
    #[serde(other)]
    Unsupported,
}

impl ClaudeContent {
    fn into_block(self) -> Option<ContentBlock> {
        match self {
            Self::Text { text } => Some(ContentBlock::Text { text }),
            Self::ToolUse { id, name, input } => Some(ContentBlock::ToolUse { id, name, input }),
            Self::Unsupported => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ClaudeUsage {
    input_tokens: u32,
    output_tokens: u32,
}
