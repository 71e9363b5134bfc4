//! The interactive loop
//!
//! Reads from the active channel, applies mode commands, and hands everything
//! else to the orchestrator. Each mode gets its own session; switching modes
//! starts over.

use crate::conversation::{Orchestrator, Session};
use crate::error::Result;
use crate::interaction::channel::{Channel, Heard};
use crate::interaction::mode::{Command, Mode};
use crate::interaction::shutdown::ShutdownCoordinator;
use tracing::{info, warn};

/// How a mode's loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModeExit {
    Quit,
    Switch,
}

/// Owns the channels and drives conversations until the user quits
pub struct Interaction {
    orchestrator: Orchestrator,
    text: Box<dyn Channel>,
    voice: Box<dyn Channel>,
    shutdown: ShutdownCoordinator,
}

impl std::fmt::Debug for Interaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interaction")
            .field("orchestrator", &self.orchestrator)
            .field("shutdown", &self.shutdown)
            .finish()
    }
}

impl Interaction {
    pub fn new(
        orchestrator: Orchestrator,
        text: Box<dyn Channel>,
        voice: Box<dyn Channel>,
        shutdown: ShutdownCoordinator,
    ) -> Self {
        Self {
            orchestrator,
            text,
            voice,
            shutdown,
        }
    }

    /// Run until the user quits, input ends, or Ctrl-C
    pub async fn run(&mut self, start: Mode) -> Result<()> {
        let mut mode = start;
        loop {
            match self.run_mode(mode).await? {
                ModeExit::Quit => {
                    info!(%mode, "Interaction finished");
                    return Ok(());
                }
                ModeExit::Switch => {
                    info!(from = %mode, to = %mode.other(), "Switching mode");
                    mode = mode.other();
                }
            }
        }
    }

    async fn run_mode(&mut self, mode: Mode) -> Result<ModeExit> {
        let Self {
            orchestrator,
            text,
            voice,
            shutdown,
        } = self;
        let channel: &mut dyn Channel = match mode {
            Mode::Text => text.as_mut(),
            Mode::Voice => voice.as_mut(),
        };

        let mut session = Session::new();
        channel.open().await?;

        loop {
            if shutdown.is_shutdown_requested() {
                channel.interrupted().await?;
                return Ok(ModeExit::Quit);
            }

            let heard = tokio::select! {
                heard = channel.listen() => Some(heard?),
                _ = shutdown.wait_for_shutdown() => None,
            };

            let input = match heard {
                None => {
                    channel.interrupted().await?;
                    return Ok(ModeExit::Quit);
                }
                Some(Heard::Closed) => {
                    channel.close().await?;
                    return Ok(ModeExit::Quit);
                }
                Some(Heard::Nothing) => String::new(),
                Some(Heard::Utterance(input)) => input,
            };

            match mode.interpret(&input) {
                Command::Ignore => {
                    if let Some(prompt) = mode.retry_prompt() {
                        channel.say(prompt).await?;
                    }
                }
                Command::Quit => {
                    channel.close().await?;
                    return Ok(ModeExit::Quit);
                }
                Command::Switch => {
                    if mode == Mode::Voice {
                        channel.notice("Switching to text mode...").await?;
                    }
                    return Ok(ModeExit::Switch);
                }
                Command::Ask(question) => {
                    let answer = tokio::select! {
                        answer = orchestrator.respond(&mut session, &question) => Some(answer),
                        _ = shutdown.wait_for_shutdown() => None,
                    };

                    match answer {
                        None => {
                            channel.interrupted().await?;
                            return Ok(ModeExit::Quit);
                        }
                        Some(Ok(reply)) => channel.say(&reply).await?,
                        Some(Err(e)) => {
                            warn!(error = %e, "Turn failed");
                            channel.notice(&format!("Error: {}", e)).await?;
                            if let Some(apology) = mode.apology() {
                                channel.say(apology).await?;
                            }
                        }
                    }
                }
            }
        }
    }
}
