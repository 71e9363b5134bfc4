//! Tooling utilities shared across the pocket assistant workspace
//!
//! # Modules
//!
//! - `config` - Environment variable loading and the `ConfigBuilder` trait
//! - `async_utils` - Timeout wrapper for async operations
//! - `logging` - Structured logging helpers and formatters

pub mod async_utils;
pub mod config;
pub mod logging;

use thiserror::Error;

/// Errors that can occur in the tooling crate
#[derive(Debug, Error)]
pub enum ToolingError {
    /// General error with message
    #[error("Tooling error: {0}")]
    General(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tooling operations
pub type Result<T> = std::result::Result<T, ToolingError>;
