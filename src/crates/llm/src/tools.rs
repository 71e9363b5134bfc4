//! Tool calling abstractions for function-calling models.
//!
//! # Function Calling Flow
//!
//! 1. **Define tools**: Create `ToolDefinition`s with name, description, input schema
//! 2. **Bind to request**: Add tools via `ChatRequest::with_tools()`
//! 3. **Model requests tool**: Response stops with `StopReason::ToolUse`
//! 4. **Execute tool**: Application runs each `ToolCall`
//! 5. **Return results**: Send `tool_result` blocks in the next user message
//! 6. **Model responds**: Final answer based on tool outputs

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Definition of a tool that the model can call.
///
/// The `input_schema` is a JSON Schema object, typically:
/// - `type`: "object"
/// - `properties`: map of argument names to schemas
/// - `required`: list of required argument names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name, matched against `ToolCall::name`.
    pub name: String,

    /// What the tool does; the model uses this to decide when to call it.
    pub description: String,

    /// JSON Schema describing the tool's arguments.
    pub input_schema: JsonValue,
}

impl ToolDefinition {
    /// Create a tool definition that takes no arguments.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    /// Set the argument schema.
    pub fn with_input_schema(mut self, input_schema: JsonValue) -> Self {
        self.input_schema = input_schema;
        self
    }

    /// Names listed in the schema's `required` array.
    pub fn required_arguments(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(JsonValue::as_array)
            .map(|names| names.iter().filter_map(JsonValue::as_str).collect())
            .unwrap_or_default()
    }
}

/// A request from the model to call a specific tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Invocation id, echoed back in the matching tool result.
    pub id: String,

    /// Name of the tool to call.
    pub name: String,

    /// Arguments as a JSON object.
    pub arguments: JsonValue,
}

impl ToolCall {
    /// Create a new tool call.
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: JsonValue) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_definition_without_arguments_has_empty_object_schema() {
        let tool = ToolDefinition::new("list_notes", "List all saved note files");
        assert_eq!(tool.input_schema["type"], "object");
        assert!(tool.required_arguments().is_empty());
    }

    #[test]
    fn test_required_arguments() {
        let tool = ToolDefinition::new("send_sms", "Send an SMS").with_input_schema(json!({
            "type": "object",
            "properties": {
                "phone_number": {"type": "string"},
                "message": {"type": "string"}
            },
            "required": ["phone_number", "message"]
        }));

        assert_eq!(tool.required_arguments(), vec!["phone_number", "message"]);
    }
}
