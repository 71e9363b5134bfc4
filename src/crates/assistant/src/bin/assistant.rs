//! Assistant CLI
//!
//! Starts the phone assistant in text mode (default) or voice mode.

use anyhow::Context;
use assistant::cli::{credential_guidance, remote_llm_config, Cli, EXIT_MISSING_CREDENTIAL};
use assistant::conversation::Orchestrator;
use assistant::device::{
    CommandRunner, DeviceExecutor, NoteStore, SystemClock, SystemCommandRunner,
};
use assistant::interaction::{Interaction, ShutdownCoordinator, TextChannel, VoiceChannel};
use assistant::ConfigLoader;
use clap::Parser;
use llm::remote::ClaudeClient;
use llm::ChatModel;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_explicit_path(path);
    }
    let config = loader.load().await.context("Failed to load configuration")?;

    init_tracing(cli.log_level.as_deref().unwrap_or(&config.logging.level));

    let llm_config = match remote_llm_config(&config) {
        Ok(llm_config) => llm_config,
        Err(e) if e.is_auth_error() => {
            for line in credential_guidance(&config.llm.api_key_env) {
                eprintln!("{}", line);
            }
            std::process::exit(EXIT_MISSING_CREDENTIAL);
        }
        Err(e) => return Err(e.into()),
    };

    let model: Arc<dyn ChatModel> = Arc::new(ClaudeClient::new(llm_config)?);
    let runner: Arc<dyn CommandRunner> =
        Arc::new(SystemCommandRunner::new(config.command_timeout()));

    let notes_dir = config.notes_dir();
    let notes = NoteStore::open(&notes_dir)
        .await
        .with_context(|| format!("Failed to create notes directory {}", notes_dir.display()))?;

    let executor = DeviceExecutor::new(runner.clone(), notes, Arc::new(SystemClock));
    let orchestrator = Orchestrator::new(model, Arc::new(executor))
        .with_max_tokens(config.llm.max_tokens)
        .with_max_tool_rounds(config.conversation.max_tool_rounds);

    let shutdown = ShutdownCoordinator::new();
    shutdown.install_ctrl_c_handler();

    info!(mode = %cli.start_mode(), model = %config.llm.model, "Starting assistant");

    let mut interaction = Interaction::new(
        orchestrator,
        Box::new(TextChannel::stdio()),
        Box::new(VoiceChannel::stdio(runner)),
        shutdown,
    );
    interaction.run(cli.start_mode()).await?;

    Ok(())
}
