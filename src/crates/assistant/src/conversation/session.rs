//! Conversation session
//!
//! The remote model is stateless, so the session carries the whole
//! conversation and is resent on every request. Turns are only ever
//! appended.

use crate::error::{AssistantError, Result};
use llm::{ContentBlock, Message};
use std::collections::HashSet;

/// Result of one tool invocation, correlated by invocation id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub tool_use_id: String,
    pub content: String,
}

impl ToolResult {
    pub fn new(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
        }
    }
}

/// One entry in the session
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// Text typed or spoken by the user
    User(String),

    /// Model output exactly as returned, tool-use blocks included
    Assistant(Vec<ContentBlock>),

    /// Results for every tool-use block of the preceding assistant turn
    ToolResults(Vec<ToolResult>),
}

impl Turn {
    /// Wire form of this turn
    pub fn to_message(&self) -> Message {
        match self {
            Self::User(text) => Message::user_text(text.clone()),
            Self::Assistant(blocks) => Message::assistant_blocks(blocks.clone()),
            Self::ToolResults(results) => Message::tool_results(
                results
                    .iter()
                    .map(|r| ContentBlock::tool_result(&r.tool_use_id, &r.content))
                    .collect(),
            ),
        }
    }
}

/// Ordered, append-only conversation log for one interactive run
#[derive(Debug, Clone, Default)]
pub struct Session {
    turns: Vec<Turn>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::User(text.into()));
    }

    pub fn push_assistant(&mut self, content: Vec<ContentBlock>) {
        self.turns.push(Turn::Assistant(content));
    }

    /// Append tool results
    ///
    /// The previous turn must be an assistant turn, and the result ids must
    /// be exactly the invocation ids it requested.
    pub fn push_tool_results(&mut self, results: Vec<ToolResult>) -> Result<()> {
        let requested: HashSet<&str> = match self.turns.last() {
            Some(Turn::Assistant(blocks)) => blocks
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::ToolUse { id, .. } => Some(id.as_str()),
                    _ => None,
                })
                .collect(),
            _ => {
                return Err(AssistantError::Session(
                    "tool results must follow an assistant turn".to_string(),
                ))
            }
        };

        let answered: HashSet<&str> = results.iter().map(|r| r.tool_use_id.as_str()).collect();
        if requested.is_empty() || answered != requested || answered.len() != results.len() {
            return Err(AssistantError::Session(format!(
                "tool results {:?} do not match requested invocations {:?}",
                sorted(&answered),
                sorted(&requested)
            )));
        }

        self.turns.push(Turn::ToolResults(results));
        Ok(())
    }

    /// The whole session in wire form
    pub fn messages(&self) -> Vec<Message> {
        self.turns.iter().map(Turn::to_message).collect()
    }
}

fn sorted<'a>(ids: &HashSet<&'a str>) -> Vec<&'a str> {
    let mut ids: Vec<&str> = ids.iter().copied().collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm::Role;
    use serde_json::json;

    fn tool_use(id: &str, name: &str) -> ContentBlock {
        ContentBlock::ToolUse {
            id: id.to_string(),
            name: name.to_string(),
            input: json!({}),
        }
    }

    #[test]
    fn test_messages_mirror_turns() {
        let mut session = Session::new();
        session.push_user("what's my battery");
        session.push_assistant(vec![tool_use("t1", "get_battery_status")]);
        session
            .push_tool_results(vec![ToolResult::new("t1", "Battery is at 42% and not charging")])
            .unwrap();
        session.push_assistant(vec![ContentBlock::text("You're at 42 percent.")]);

        let messages = session.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[2].role, Role::User);
        assert_eq!(
            messages[2].content[0],
            ContentBlock::tool_result("t1", "Battery is at 42% and not charging")
        );
        assert_eq!(messages[3].text(), "You're at 42 percent.");
    }

    #[test]
    fn test_results_for_several_invocations() {
        let mut session = Session::new();
        session.push_user("check everything");
        session.push_assistant(vec![
            ContentBlock::text("Checking."),
            tool_use("a", "get_battery_status"),
            tool_use("b", "get_clipboard"),
        ]);

        session
            .push_tool_results(vec![
                ToolResult::new("a", "Battery is at 90% and charging"),
                ToolResult::new("b", "Clipboard is empty"),
            ])
            .unwrap();
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn test_results_without_assistant_turn_rejected() {
        let mut session = Session::new();
        session.push_user("hello");

        let err = session
            .push_tool_results(vec![ToolResult::new("t1", "x")])
            .unwrap_err();
        assert!(matches!(err, AssistantError::Session(_)));
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_mismatched_ids_rejected() {
        let mut session = Session::new();
        session.push_user("hello");
        session.push_assistant(vec![tool_use("t1", "list_notes")]);

        assert!(session
            .push_tool_results(vec![ToolResult::new("t2", "x")])
            .is_err());
        assert!(session.push_tool_results(vec![]).is_err());
        assert!(session
            .push_tool_results(vec![ToolResult::new("t1", "x"), ToolResult::new("t1", "y")])
            .is_err());
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_results_after_plain_text_answer_rejected() {
        let mut session = Session::new();
        session.push_user("hello");
        session.push_assistant(vec![ContentBlock::text("Hi!")]);

        assert!(session
            .push_tool_results(vec![ToolResult::new("t1", "x")])
            .is_err());
    }
}
