//! Command-line surface of the `assistant` binary
//!
//! Argument parsing and the startup credential check live here so the
//! binary stays a thin wiring layer.

use crate::config::AssistantConfig;
use crate::error::Result;
use crate::interaction::Mode;
use clap::Parser;
use llm::{LlmError, RemoteLlmConfig};
use std::path::PathBuf;
use tooling::config::get_env_nonempty;

/// Exit status when the API key is missing
pub const EXIT_MISSING_CREDENTIAL: i32 = 1;

#[derive(Debug, Parser)]
#[command(name = "assistant")]
#[command(about = "Voice and text phone assistant for Termux, powered by Claude", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Start in voice mode
    #[arg(short = 'v', long, conflicts_with = "text")]
    pub voice: bool,

    /// Start in text mode (default)
    #[arg(short = 't', long)]
    pub text: bool,

    /// Configuration file loaded after ~/.assistant/assistant.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level for stderr output (overrides config)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn start_mode(&self) -> Mode {
        if self.voice {
            Mode::Voice
        } else {
            Mode::Text
        }
    }
}

/// Build the Claude client config from the configured key variable
///
/// An unset or blank key is `LlmError::ApiKeyNotFound`.
pub fn remote_llm_config(config: &AssistantConfig) -> Result<RemoteLlmConfig> {
    let key_env = &config.llm.api_key_env;
    let api_key = get_env_nonempty(key_env)?.ok_or_else(|| {
        LlmError::ApiKeyNotFound(format!("Environment variable: {}", key_env))
    })?;

    Ok(
        RemoteLlmConfig::new(api_key, &config.llm.api_base, &config.llm.model)
            .with_timeout(config.llm_timeout()),
    )
}

/// Lines printed to stderr before exiting for a missing key
pub fn credential_guidance(key_env: &str) -> [String; 2] {
    [
        format!("Error: {} environment variable not set", key_env),
        format!("Run: export {}='your-key-here'", key_env),
    ]
}
