//! Tool catalog sent to the model with every request

use llm::ToolDefinition;
use serde_json::json;

/// Declarations of all eleven device actions
pub fn action_catalog() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new("send_sms", "Send an SMS text message to a phone number")
            .with_input_schema(json!({
                "type": "object",
                "properties": {
                    "phone_number": {
                        "type": "string",
                        "description": "Phone number with country code (e.g., +1234567890)"
                    },
                    "message": {
                        "type": "string",
                        "description": "The message content to send"
                    }
                },
                "required": ["phone_number", "message"]
            })),
        ToolDefinition::new("read_sms", "Read recent SMS messages from the phone")
            .with_input_schema(json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Number of messages to read (default: 5)",
                        "default": 5
                    },
                    "from_number": {
                        "type": "string",
                        "description": "Filter messages from a specific phone number (optional)"
                    }
                }
            })),
        ToolDefinition::new("write_note", "Save a note to a file for later reference")
            .with_input_schema(json!({
                "type": "object",
                "properties": {
                    "content": {
                        "type": "string",
                        "description": "The note content to save"
                    },
                    "filename": {
                        "type": "string",
                        "description": "Optional filename (without extension). If not provided, uses timestamp."
                    },
                    "append": {
                        "type": "boolean",
                        "description": "If true, append to existing file instead of overwriting",
                        "default": false
                    }
                },
                "required": ["content"]
            })),
        ToolDefinition::new("read_notes", "Read saved notes from storage").with_input_schema(
            json!({
                "type": "object",
                "properties": {
                    "filename": {
                        "type": "string",
                        "description": "Specific note filename to read (optional, reads recent if not specified)"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Number of recent notes to read if no filename specified",
                        "default": 5
                    }
                }
            }),
        ),
        ToolDefinition::new("list_notes", "List all saved note files"),
        ToolDefinition::new("delete_note", "Delete a specific note file").with_input_schema(
            json!({
                "type": "object",
                "properties": {
                    "filename": {
                        "type": "string",
                        "description": "The filename of the note to delete"
                    }
                },
                "required": ["filename"]
            }),
        ),
        ToolDefinition::new("get_clipboard", "Get the current contents of the clipboard"),
        ToolDefinition::new("set_clipboard", "Set text to the clipboard").with_input_schema(
            json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "Text to copy to clipboard"
                    }
                },
                "required": ["text"]
            }),
        ),
        ToolDefinition::new(
            "get_battery_status",
            "Get the current battery level and charging status",
        ),
        ToolDefinition::new("show_notification", "Display a notification on the phone")
            .with_input_schema(json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Notification title"
                    },
                    "content": {
                        "type": "string",
                        "description": "Notification content/body"
                    }
                },
                "required": ["title", "content"]
            })),
        ToolDefinition::new("get_contacts", "Search contacts by name").with_input_schema(json!({
            "type": "object",
            "properties": {
                "search": {
                    "type": "string",
                    "description": "Name to search for in contacts"
                }
            },
            "required": ["search"]
        })),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceAction;

    #[test]
    fn test_catalog_matches_decodable_actions() {
        let names: Vec<_> = action_catalog().iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, DeviceAction::NAMES);
    }

    #[test]
    fn test_required_arguments() {
        let catalog = action_catalog();
        let required = |name: &str| {
            catalog
                .iter()
                .find(|t| t.name == name)
                .map(|t| t.required_arguments().into_iter().map(String::from).collect::<Vec<_>>())
                .unwrap()
        };

        assert_eq!(required("send_sms"), vec!["phone_number", "message"]);
        assert_eq!(required("show_notification"), vec!["title", "content"]);
        assert!(required("read_sms").is_empty());
        assert!(required("list_notes").is_empty());
    }

    #[test]
    fn test_every_schema_is_an_object() {
        for tool in action_catalog() {
            assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
        }
    }
}
