//! Tool-calling orchestration loop
//!
//! One user utterance drives a small state machine: ask the model, run any
//! tools it requests in the order requested, feed the results back, and stop
//! once it answers in plain text.
//!
//! ```text
//!   user input ──> AwaitingModel ──(tool_use)──> ExecutingTools
//!                       ^                             │
//!                       └──────── tool results ───────┘
//!                       │
//!                  (end_turn) ──> Finished(text)
//! ```
//!
//! A model that keeps requesting tools is cut off after `max_tool_rounds`
//! rounds with [`AssistantError::ToolLoopExceeded`].

use crate::conversation::prompt::SYSTEM_PROMPT;
use crate::conversation::session::{Session, ToolResult};
use crate::device::{action_catalog, ToolExecutor};
use crate::error::{AssistantError, Result};
use llm::{ChatModel, ChatRequest, ChatResponse, ToolDefinition};
use std::sync::Arc;
use tooling::logging::{preview, sanitize_for_logging, timed};
use tracing::{debug, info};

/// Default cap on tool rounds for one user turn
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 10;

/// Default response length limit
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Characters of each tool result shown in the debug trace
const RESULT_PREVIEW_CHARS: usize = 100;

/// Where the loop is within one user turn
#[derive(Debug)]
pub enum LoopState {
    /// Session is ready to be sent to the model
    AwaitingModel,
    /// The model asked for tools; run them next
    ExecutingTools(ChatResponse),
    /// The model answered in text
    Finished(String),
}

/// Drives conversations between the user, the model, and the device
pub struct Orchestrator {
    model: Arc<dyn ChatModel>,
    executor: Arc<dyn ToolExecutor>,
    system_prompt: String,
    catalog: Vec<ToolDefinition>,
    max_tokens: u32,
    max_tool_rounds: usize,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("model", &self.model.model_name())
            .field("tools", &format!("{} tools", self.catalog.len()))
            .field("max_tokens", &self.max_tokens)
            .field("max_tool_rounds", &self.max_tool_rounds)
            .finish()
    }
}

impl Orchestrator {
    /// Create an orchestrator with the default prompt and device catalog
    pub fn new(model: Arc<dyn ChatModel>, executor: Arc<dyn ToolExecutor>) -> Self {
        Self {
            model,
            executor,
            system_prompt: SYSTEM_PROMPT.to_string(),
            catalog: action_catalog(),
            max_tokens: DEFAULT_MAX_TOKENS,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_catalog(mut self, catalog: Vec<ToolDefinition>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    pub fn max_tool_rounds(&self) -> usize {
        self.max_tool_rounds
    }

    fn request(&self, session: &Session) -> ChatRequest {
        ChatRequest::new(session.messages())
            .with_system(self.system_prompt.clone())
            .with_max_tokens(self.max_tokens)
            .with_tools(self.catalog.clone())
    }

    /// Answer one user utterance
    ///
    /// Appends the user turn, every assistant/tool-result pair, and the final
    /// assistant turn to `session`.
    pub async fn respond(&self, session: &mut Session, input: &str) -> Result<String> {
        session.push_user(input);

        let mut state = LoopState::AwaitingModel;
        let mut rounds = 0;

        loop {
            state = match state {
                LoopState::AwaitingModel => {
                    let response =
                        timed("model.chat", self.model.chat(self.request(session))).await?;
                    debug!(
                        stop_reason = ?response.stop_reason,
                        blocks = response.content.len(),
                        "Model responded"
                    );

                    if response.requests_tools() {
                        LoopState::ExecutingTools(response)
                    } else {
                        let text = response.text();
                        session.push_assistant(response.content);
                        LoopState::Finished(text)
                    }
                }
                LoopState::ExecutingTools(response) => {
                    if rounds >= self.max_tool_rounds {
                        return Err(AssistantError::ToolLoopExceeded { rounds });
                    }
                    rounds += 1;

                    let results = self.execute_tools(&response).await;
                    session.push_assistant(response.content);
                    session.push_tool_results(results)?;
                    LoopState::AwaitingModel
                }
                LoopState::Finished(text) => {
                    info!(tool_rounds = rounds, turns = session.len(), "Turn complete");
                    return Ok(text);
                }
            };
        }
    }

    /// Run each requested tool in order; never fails
    async fn execute_tools(&self, response: &ChatResponse) -> Vec<ToolResult> {
        let mut results = Vec::new();

        for call in response.tool_calls() {
            debug!(
                tool = %call.name,
                id = %call.id,
                arguments = %sanitize_for_logging(&call.arguments.to_string()),
                "Executing tool"
            );

            let outcome = self.executor.execute(&call.name, &call.arguments).await;

            debug!(
                tool = %call.name,
                status = ?outcome.status,
                result = %preview(&outcome.text, RESULT_PREVIEW_CHARS),
                "Tool finished"
            );
            results.push(ToolResult::new(call.id, outcome.text));
        }

        results
    }
}
