//! Conversation messages in content-block form.
//!
//! A message is a role plus an ordered list of content blocks. Plain text,
//! tool invocation requests, and tool results all travel as blocks, which is
//! the shape the Anthropic Messages API accepts and returns.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::tools::ToolCall;

/// Speaker of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One block of message content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Natural-language text.
    Text { text: String },

    /// A request from the model to invoke a tool.
    ToolUse {
        id: String,
        name: String,
        input: JsonValue,
    },

    /// The outcome of a tool invocation, correlated by `tool_use_id`.
    ToolResult { tool_use_id: String, content: String },
}

impl ContentBlock {
    /// Create a text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a tool result block.
    pub fn tool_result(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
        }
    }

    /// Text of this block, if it is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Tool call carried by this block, if it is a tool-use block.
    pub fn as_tool_call(&self) -> Option<ToolCall> {
        match self {
            Self::ToolUse { id, name, input } => Some(ToolCall::new(id, name, input.clone())),
            _ => None,
        }
    }
}

/// A single message exchanged with the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    /// A user message holding a single text block.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::text(text)],
        }
    }

    /// An assistant message made of the given blocks, verbatim.
    pub fn assistant_blocks(content: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::Assistant,
            content,
        }
    }

    /// A user message carrying tool results.
    ///
    /// Results go back to the model on the user side of the conversation.
    pub fn tool_results(results: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content: results,
        }
    }

    /// Concatenated text of all text blocks, in order.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(ContentBlock::as_text)
            .collect::<Vec<_>>()
            .join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_use_block_wire_format() {
        let block = ContentBlock::ToolUse {
            id: "toolu_01".to_string(),
            name: "get_battery_status".to_string(),
            input: json!({}),
        };

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "tool_use");
        assert_eq!(value["id"], "toolu_01");
        assert_eq!(value["name"], "get_battery_status");
    }

    #[test]
    fn test_tool_result_block_wire_format() {
        let block = ContentBlock::tool_result("toolu_01", "Battery is at 42% and not charging");
        let value = serde_json::to_value(&block).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "tool_result",
                "tool_use_id": "toolu_01",
                "content": "Battery is at 42% and not charging"
            })
        );
    }

    #[test]
    fn test_message_text_concatenates_text_blocks() {
        let message = Message::assistant_blocks(vec![
            ContentBlock::text("Sure, "),
            ContentBlock::ToolUse {
                id: "a".to_string(),
                name: "list_notes".to_string(),
                input: json!({}),
            },
            ContentBlock::text("done."),
        ]);

        assert_eq!(message.text(), "Sure, done.");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let message = Message::user_text("hi");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "user");
        assert_eq!(value["content"][0]["text"], "hi");
    }
}
