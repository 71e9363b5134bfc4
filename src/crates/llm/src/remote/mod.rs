//! Remote LLM provider implementations.
//!
//! # Providers
//!
//! - **Claude** - Anthropic's Claude models via the Messages API, with tool use

pub mod claude;

pub use claude::ClaudeClient;
