//! Conversation state and the tool-calling loop

pub mod orchestrator;
pub mod prompt;
pub mod session;

pub use orchestrator::{LoopState, Orchestrator, DEFAULT_MAX_TOKENS, DEFAULT_MAX_TOOL_ROUNDS};
pub use prompt::SYSTEM_PROMPT;
pub use session::{Session, ToolResult, Turn};
