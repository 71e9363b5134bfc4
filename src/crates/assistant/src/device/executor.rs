//! Device action executor
//!
//! Maps each [`DeviceAction`] to exactly one external command or one note
//! store operation and renders the outcome as text for the model. Nothing
//! here returns an error: failures become result text too, tagged
//! [`ActionStatus::Failed`] so callers can log them.

use crate::device::action::DeviceAction;
use crate::device::clock::Clock;
use crate::device::notes::NoteStore;
use crate::device::runner::CommandRunner;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, warn};

/// Most contacts returned by one search
const MAX_CONTACT_MATCHES: usize = 5;

const SMS_SEPARATOR: &str = "\n\n---\n\n";

/// Whether an action did what was asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Succeeded,
    Failed,
}

/// Result of one action: a status for us, text for the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub status: ActionStatus,
    pub text: String,
}

impl ActionOutcome {
    pub fn succeeded(text: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Succeeded,
            text: text.into(),
        }
    }

    pub fn failed(text: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Failed,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Succeeded
    }
}

/// Executes tool calls by name
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, name: &str, arguments: &JsonValue) -> ActionOutcome;
}

#[derive(Debug, Deserialize)]
struct SmsRecord {
    number: Option<String>,
    body: Option<String>,
    received: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContactRecord {
    name: Option<String>,
    number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BatteryStatus {
    percentage: Option<JsonValue>,
    plugged: Option<String>,
}

/// [`ToolExecutor`] for the phone: Termux:API commands plus the note store
pub struct DeviceExecutor {
    runner: Arc<dyn CommandRunner>,
    notes: NoteStore,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for DeviceExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceExecutor")
            .field("notes", &self.notes.root())
            .finish()
    }
}

impl DeviceExecutor {
    pub fn new(runner: Arc<dyn CommandRunner>, notes: NoteStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            runner,
            notes,
            clock,
        }
    }

    /// Run an already decoded action
    pub async fn perform(&self, action: DeviceAction) -> ActionOutcome {
        let name = action.name();
        let outcome = match action {
            DeviceAction::SendSms {
                phone_number,
                message,
            } => self.send_sms(&phone_number, &message).await,
            DeviceAction::ReadSms { limit, from_number } => {
                self.read_sms(limit, from_number.as_deref()).await
            }
            DeviceAction::WriteNote {
                content,
                filename,
                append,
            } => self.write_note(&content, filename, append).await,
            DeviceAction::ReadNotes { filename, limit } => {
                self.read_notes(filename.as_deref(), limit).await
            }
            DeviceAction::ListNotes {} => self.list_notes().await,
            DeviceAction::DeleteNote { filename } => self.delete_note(&filename).await,
            DeviceAction::GetClipboard {} => self.get_clipboard().await,
            DeviceAction::SetClipboard { text } => self.set_clipboard(&text).await,
            DeviceAction::GetBatteryStatus {} => self.get_battery_status().await,
            DeviceAction::ShowNotification { title, content } => {
                self.show_notification(&title, &content).await
            }
            DeviceAction::GetContacts { search } => self.get_contacts(&search).await,
        };

        if !outcome.is_success() {
            warn!(action = name, result = %outcome.text, "Action failed");
        }
        outcome
    }

    async fn send_sms(&self, phone_number: &str, message: &str) -> ActionOutcome {
        let output = self
            .runner
            .run("termux-sms-send", &["-n", phone_number, message])
            .await;

        if output.success() {
            ActionOutcome::succeeded(format!("SMS sent successfully to {}", phone_number))
        } else {
            ActionOutcome::failed(format!("Failed to send SMS: {}", output.stderr))
        }
    }

    async fn read_sms(&self, limit: usize, from_number: Option<&str>) -> ActionOutcome {
        let limit = limit.to_string();
        let output = self.runner.run("termux-sms-list", &["-l", limit.as_str()]).await;
        if !output.success() {
            return ActionOutcome::failed(format!("Error reading SMS: {}", output.stderr));
        }

        let messages: Vec<SmsRecord> = match serde_json::from_str(&output.stdout) {
            Ok(messages) => messages,
            Err(e) => {
                debug!(error = %e, "Unparseable SMS listing");
                return ActionOutcome::failed(format!("Error parsing SMS data: {}", output.stdout));
            }
        };

        let blocks: Vec<String> = messages
            .into_iter()
            .filter(|m| match from_number {
                Some(filter) if !filter.is_empty() => {
                    m.number.as_deref().unwrap_or_default().contains(filter)
                }
                _ => true,
            })
            .map(|m| {
                format!(
                    "From {} ({}):\n{}",
                    m.number.as_deref().unwrap_or("Unknown"),
                    m.received.as_deref().unwrap_or_default(),
                    m.body.as_deref().unwrap_or_default()
                )
            })
            .collect();

        if blocks.is_empty() {
            ActionOutcome::succeeded("No messages found")
        } else {
            ActionOutcome::succeeded(blocks.join(SMS_SEPARATOR))
        }
    }

    async fn write_note(
        &self,
        content: &str,
        filename: Option<String>,
        append: bool,
    ) -> ActionOutcome {
        let name = filename
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.clock.note_stamp());

        match self.notes.write(&name, content, append).await {
            Ok(file_name) => ActionOutcome::succeeded(format!("Note saved to {}", file_name)),
            Err(e) => ActionOutcome::failed(format!("Error saving note: {}", e)),
        }
    }

    async fn read_notes(&self, filename: Option<&str>, limit: usize) -> ActionOutcome {
        if let Some(name) = filename.filter(|name| !name.trim().is_empty()) {
            return match self.notes.read(name).await {
                Ok(Some((file_name, content))) => {
                    ActionOutcome::succeeded(format!("=== {} ===\n{}", file_name, content))
                }
                Ok(None) => ActionOutcome::failed(format!(
                    "Note '{}' not found",
                    NoteStore::normalize(name)
                )),
                Err(e) => ActionOutcome::failed(format!("Error reading note: {}", e)),
            };
        }

        match self.notes.recent(limit).await {
            Ok(notes) if notes.is_empty() => ActionOutcome::succeeded("No notes found"),
            Ok(notes) => ActionOutcome::succeeded(
                notes
                    .iter()
                    .map(|(file_name, content)| format!("=== {} ===\n{}", file_name, content))
                    .collect::<Vec<_>>()
                    .join("\n\n"),
            ),
            Err(e) => ActionOutcome::failed(format!("Error reading notes: {}", e)),
        }
    }

    async fn list_notes(&self) -> ActionOutcome {
        match self.notes.list().await {
            Ok(names) if names.is_empty() => ActionOutcome::succeeded("No notes saved yet"),
            Ok(names) => {
                let lines: Vec<String> = names.iter().map(|name| format!("- {}", name)).collect();
                ActionOutcome::succeeded(format!("Saved notes:\n{}", lines.join("\n")))
            }
            Err(e) => ActionOutcome::failed(format!("Error listing notes: {}", e)),
        }
    }

    async fn delete_note(&self, filename: &str) -> ActionOutcome {
        let file_name = NoteStore::normalize(filename);
        match self.notes.delete(&file_name).await {
            Ok(true) => ActionOutcome::succeeded(format!("Note '{}' deleted", file_name)),
            Ok(false) => ActionOutcome::failed(format!("Note '{}' not found", file_name)),
            Err(e) => ActionOutcome::failed(format!("Error deleting note: {}", e)),
        }
    }

    async fn get_clipboard(&self) -> ActionOutcome {
        let output = self.runner.run("termux-clipboard-get", &[]).await;
        if !output.success() {
            return ActionOutcome::failed(format!("Error reading clipboard: {}", output.stderr));
        }

        if output.stdout.is_empty() {
            ActionOutcome::succeeded("Clipboard is empty")
        } else {
            ActionOutcome::succeeded(format!("Clipboard contents: {}", output.stdout))
        }
    }

    async fn set_clipboard(&self, text: &str) -> ActionOutcome {
        let output = self.runner.run("termux-clipboard-set", &[text]).await;
        if output.success() {
            ActionOutcome::succeeded("Text copied to clipboard")
        } else {
            ActionOutcome::failed(format!("Error setting clipboard: {}", output.stderr))
        }
    }

    async fn get_battery_status(&self) -> ActionOutcome {
        let output = self.runner.run("termux-battery-status", &[]).await;
        if !output.success() {
            return ActionOutcome::failed(format!(
                "Error getting battery status: {}",
                output.stderr
            ));
        }

        let status: BatteryStatus = match serde_json::from_str(&output.stdout) {
            Ok(status) => status,
            Err(_) => {
                return ActionOutcome::failed(format!(
                    "Error parsing battery status: {}",
                    output.stdout
                ))
            }
        };

        let percentage = match status.percentage {
            None | Some(JsonValue::Null) => "unknown".to_string(),
            Some(JsonValue::String(text)) => text,
            Some(other) => other.to_string(),
        };
        let charging = match status.plugged.as_deref() {
            Some("UNPLUGGED") => "not charging",
            _ => "charging",
        };

        ActionOutcome::succeeded(format!("Battery is at {}% and {}", percentage, charging))
    }

    async fn show_notification(&self, title: &str, content: &str) -> ActionOutcome {
        let output = self
            .runner
            .run(
                "termux-notification",
                &["--title", title, "--content", content],
            )
            .await;

        if output.success() {
            ActionOutcome::succeeded("Notification displayed")
        } else {
            ActionOutcome::failed(format!("Error showing notification: {}", output.stderr))
        }
    }

    async fn get_contacts(&self, search: &str) -> ActionOutcome {
        let output = self.runner.run("termux-contact-list", &[]).await;
        if !output.success() {
            return ActionOutcome::failed(format!("Error reading contacts: {}", output.stderr));
        }

        let contacts: Vec<ContactRecord> = match serde_json::from_str(&output.stdout) {
            Ok(contacts) => contacts,
            Err(_) => {
                return ActionOutcome::failed(format!("Error parsing contacts: {}", output.stdout))
            }
        };

        let needle = search.to_lowercase();
        let lines: Vec<String> = contacts
            .iter()
            .filter(|c| {
                c.name
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&needle)
            })
            .take(MAX_CONTACT_MATCHES)
            .map(|c| {
                format!(
                    "{}: {}",
                    c.name.as_deref().unwrap_or("Unknown"),
                    c.number.as_deref().unwrap_or("No number")
                )
            })
            .collect();

        if lines.is_empty() {
            ActionOutcome::succeeded(format!("No contacts found matching '{}'", search))
        } else {
            ActionOutcome::succeeded(format!("Contacts found:\n{}", lines.join("\n")))
        }
    }
}

#[async_trait]
impl ToolExecutor for DeviceExecutor {
    async fn execute(&self, name: &str, arguments: &JsonValue) -> ActionOutcome {
        let action = match DeviceAction::decode(name, arguments) {
            Ok(action) => action,
            Err(e) => {
                warn!(tool = name, error = %e, "Rejected tool call");
                return ActionOutcome::failed(e.to_string());
            }
        };

        self.perform(action).await
    }
}
