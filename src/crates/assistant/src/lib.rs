//! # Assistant - Termux phone assistant
//!
//! A conversational front-end for an Android phone running Termux. Typed or
//! spoken requests go to Claude along with a catalog of device actions; tool
//! calls come back, run against Termux:API and a local notes directory, and
//! the results are fed back until Claude answers in plain language.
//!
//! ## Features
//!
//! - **Device Actions** - SMS, notes, clipboard, notifications, battery, contacts
//! - **Tool Loop** - Multi-round tool calling with a per-turn round cap
//! - **Text and Voice** - Terminal input or Termux speech recognition and TTS
//! - **Layered Config** - Defaults, `~/.assistant/assistant.toml`, `ASSISTANT_*` env vars
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use assistant::conversation::{Orchestrator, Session};
//! use assistant::device::{DeviceExecutor, NoteStore, SystemClock, SystemCommandRunner};
//! use llm::remote::ClaudeClient;
//! use llm::RemoteLlmConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = RemoteLlmConfig::from_env(
//!     "ANTHROPIC_API_KEY",
//!     "https://api.anthropic.com",
//!     "claude-sonnet-4-20250514",
//! )?;
//! let executor = DeviceExecutor::new(
//!     Arc::new(SystemCommandRunner::default()),
//!     NoteStore::open("/data/data/com.termux/files/home/notes").await?,
//!     Arc::new(SystemClock),
//! );
//! let orchestrator = Orchestrator::new(Arc::new(ClaudeClient::new(config)?), Arc::new(executor));
//!
//! let mut session = Session::new();
//! let reply = orchestrator.respond(&mut session, "what's my battery").await?;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod conversation;
pub mod device;
pub mod interaction;

// Error types and utilities
mod error;

// Re-export key types for convenience
pub use config::{AssistantConfig, ConfigLoader};
pub use conversation::{Orchestrator, Session};
pub use device::{DeviceExecutor, ToolExecutor};
pub use interaction::{Interaction, Mode, ShutdownCoordinator};

// Error types
pub use error::{AssistantError, Result};
