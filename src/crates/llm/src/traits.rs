//! The provider-agnostic chat model trait.

use async_trait::async_trait;

use crate::chat::{ChatRequest, ChatResponse};
use crate::error::Result;

/// Core trait for chat-based language models.
///
/// Implementations convert the request into their provider's wire format,
/// make the call, and convert the reply back. Models that support tool
/// calling return `tool_use` content blocks and stop with
/// [`StopReason::ToolUse`](crate::StopReason::ToolUse).
///
/// Implementations must be `Send + Sync`; share them as `Arc<dyn ChatModel>`.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a complete response for the request.
    ///
    /// # Errors
    ///
    /// Network, authentication, rate limiting, and decoding failures.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Identifier of the model served by this client.
    fn model_name(&self) -> &str;
}
