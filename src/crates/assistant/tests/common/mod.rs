//! Common test utilities and setup

#![allow(dead_code)]

use assistant::device::{CommandOutput, CommandRunner, DeviceExecutor, FixedClock, NoteStore};
use assistant::interaction::{Channel, Heard, Mode};
use async_trait::async_trait;
use chrono::NaiveDate;
use llm::{ChatModel, ChatRequest, ChatResponse, ContentBlock, LlmError, StopReason};
use serde_json::Value as JsonValue;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Chat model that replays canned responses and records every request
pub struct ScriptedModel {
    responses: Mutex<VecDeque<ChatResponse>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModel {
    pub fn new(responses: Vec<ChatResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn chat(&self, request: ChatRequest) -> llm::Result<ChatResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::ProviderError("script exhausted".to_string()))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Command runner with one canned output per program
#[derive(Default)]
pub struct ScriptedRunner {
    outputs: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, program: &str, stdout: &str) -> Self {
        self.outputs
            .insert(program.to_string(), CommandOutput::ok(stdout));
        self
    }

    pub fn with_failure(mut self, program: &str, status: i32, stderr: &str) -> Self {
        self.outputs.insert(
            program.to_string(),
            CommandOutput {
                status,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    /// Every call as `[program, args...]`
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call[0].clone()).collect()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str]) -> CommandOutput {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().map(|arg| arg.to_string()));
        self.calls.lock().unwrap().push(call);

        self.outputs
            .get(program)
            .cloned()
            .unwrap_or_else(|| CommandOutput::ok(""))
    }
}

/// Fixed instant used for default note names: 2024-03-01 09:15:00
pub fn fixed_clock() -> Arc<FixedClock> {
    let at = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(9, 15, 0)
        .unwrap();
    Arc::new(FixedClock(at))
}

/// Note name the fixed clock produces
pub const FIXED_NOTE: &str = "20240301_091500.txt";

/// Executor over a scripted runner and a fresh notes directory
pub fn setup_executor(runner: Arc<ScriptedRunner>) -> (TempDir, Arc<DeviceExecutor>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let executor = DeviceExecutor::new(runner, NoteStore::new(temp_dir.path()), fixed_clock());
    (temp_dir, Arc::new(executor))
}

pub fn tool_use(id: &str, name: &str, input: JsonValue) -> ContentBlock {
    ContentBlock::ToolUse {
        id: id.to_string(),
        name: name.to_string(),
        input,
    }
}

/// Response asking for the given tool calls
pub fn tool_response(blocks: Vec<ContentBlock>) -> ChatResponse {
    ChatResponse::new(blocks, StopReason::ToolUse)
}

/// Final plain-text response
pub fn text_response(text: &str) -> ChatResponse {
    ChatResponse::new(vec![ContentBlock::text(text)], StopReason::EndTurn)
}

/// Tool result blocks the model received in a request's last message
pub fn last_tool_results(request: &ChatRequest) -> Vec<(String, String)> {
    request
        .messages
        .last()
        .map(|message| {
            message
                .content
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::ToolResult {
                        tool_use_id,
                        content,
                    } => Some((tool_use_id.clone(), content.clone())),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Channel fed from a script; everything it outputs lands in a shared transcript
pub struct ScriptedChannel {
    mode: Mode,
    inputs: VecDeque<Heard>,
    transcript: Arc<Mutex<Vec<String>>>,
}

impl ScriptedChannel {
    pub fn new(mode: Mode, inputs: Vec<Heard>, transcript: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            mode,
            inputs: inputs.into(),
            transcript,
        }
    }

    fn record(&self, entry: String) {
        self.transcript.lock().unwrap().push(entry);
    }
}

/// Shorthand for a recognized utterance
pub fn said(text: &str) -> Heard {
    Heard::Utterance(text.to_string())
}

#[async_trait]
impl Channel for ScriptedChannel {
    async fn open(&mut self) -> io::Result<()> {
        self.record(format!("open:{}", self.mode));
        Ok(())
    }

    async fn listen(&mut self) -> io::Result<Heard> {
        Ok(self.inputs.pop_front().unwrap_or(Heard::Closed))
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.record(format!("say:{}", text));
        Ok(())
    }

    async fn notice(&mut self, text: &str) -> io::Result<()> {
        self.record(format!("notice:{}", text));
        Ok(())
    }

    async fn close(&mut self) -> io::Result<()> {
        self.record(format!("close:{}", self.mode));
        Ok(())
    }

    async fn interrupted(&mut self) -> io::Result<()> {
        self.record(format!("interrupted:{}", self.mode));
        Ok(())
    }
}
