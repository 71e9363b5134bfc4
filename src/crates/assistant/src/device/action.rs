//! Device actions requested by the model
//!
//! A tool call arrives as a name plus a JSON argument object. Both are decoded
//! together into one [`DeviceAction`] variant, so each handler receives typed,
//! already-defaulted arguments.

use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use thiserror::Error;

const DEFAULT_LIMIT: usize = 5;

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// One invocable device operation with its arguments
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum DeviceAction {
    SendSms {
        phone_number: String,
        message: String,
    },
    ReadSms {
        #[serde(default = "default_limit")]
        limit: usize,
        #[serde(default)]
        from_number: Option<String>,
    },
    WriteNote {
        content: String,
        #[serde(default)]
        filename: Option<String>,
        #[serde(default)]
        append: bool,
    },
    ReadNotes {
        #[serde(default)]
        filename: Option<String>,
        #[serde(default = "default_limit")]
        limit: usize,
    },
    ListNotes {},
    DeleteNote {
        filename: String,
    },
    GetClipboard {},
    SetClipboard {
        text: String,
    },
    GetBatteryStatus {},
    ShowNotification {
        title: String,
        content: String,
    },
    GetContacts {
        search: String,
    },
}

/// Why a tool call could not be turned into a [`DeviceAction`]
///
/// The display text is what the model receives as the tool result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionDecodeError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {name}: {detail}")]
    InvalidArguments { name: String, detail: String },
}

impl DeviceAction {
    /// Every action name, in catalog order
    pub const NAMES: [&'static str; 11] = [
        "send_sms",
        "read_sms",
        "write_note",
        "read_notes",
        "list_notes",
        "delete_note",
        "get_clipboard",
        "set_clipboard",
        "get_battery_status",
        "show_notification",
        "get_contacts",
    ];

    /// Decode a tool call
    ///
    /// A `null` argument value is treated as an empty object.
    pub fn decode(name: &str, arguments: &JsonValue) -> Result<Self, ActionDecodeError> {
        if !Self::NAMES.contains(&name) {
            return Err(ActionDecodeError::UnknownTool(name.to_string()));
        }

        let arguments = match arguments {
            JsonValue::Null => json!({}),
            other => other.clone(),
        };

        serde_json::from_value(json!({ "name": name, "arguments": arguments })).map_err(|e| {
            ActionDecodeError::InvalidArguments {
                name: name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SendSms { .. } => "send_sms",
            Self::ReadSms { .. } => "read_sms",
            Self::WriteNote { .. } => "write_note",
            Self::ReadNotes { .. } => "read_notes",
            Self::ListNotes {} => "list_notes",
            Self::DeleteNote { .. } => "delete_note",
            Self::GetClipboard {} => "get_clipboard",
            Self::SetClipboard { .. } => "set_clipboard",
            Self::GetBatteryStatus {} => "get_battery_status",
            Self::ShowNotification { .. } => "show_notification",
            Self::GetContacts { .. } => "get_contacts",
        }
    }
}
