//! Input/output channels
//!
//! A channel gets utterances from the user and renders replies. Text mode
//! reads lines from stdin; voice mode goes through Termux speech-to-text and
//! text-to-speech, echoing both sides to the terminal.

use crate::device::CommandRunner;
use async_trait::async_trait;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Stdout};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// What one attempt to listen produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heard {
    Utterance(String),
    /// Recognition failed or returned nothing
    Nothing,
    /// Input is exhausted
    Closed,
}

/// User-facing side of one interaction mode
#[async_trait]
pub trait Channel: Send {
    /// Announce the mode
    async fn open(&mut self) -> io::Result<()>;

    /// Wait for the next utterance
    async fn listen(&mut self) -> io::Result<Heard>;

    /// Deliver an assistant reply
    async fn say(&mut self, text: &str) -> io::Result<()>;

    /// Print a status line that is not part of the conversation
    async fn notice(&mut self, text: &str) -> io::Result<()>;

    /// Say goodbye
    async fn close(&mut self) -> io::Result<()>;

    /// Say goodbye after Ctrl-C, possibly in the middle of a prompt
    async fn interrupted(&mut self) -> io::Result<()>;
}

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await
}

/// Typed conversation over lines fed by a reader task and a writer
///
/// Lines arrive over a channel so that a pending read never holds up
/// shutdown: the reader is abandoned instead of awaited.
pub struct TextChannel<W> {
    lines: mpsc::Receiver<io::Result<String>>,
    out: W,
}

impl TextChannel<Stdout> {
    /// Text channel on the terminal
    ///
    /// Stdin is read on a detached thread. A blocking read cannot be
    /// cancelled, and the runtime would otherwise wait for it on exit.
    pub fn stdio() -> Self {
        let (tx, rx) = mpsc::channel(1);
        std::thread::spawn(move || {
            use std::io::BufRead;

            for line in io::stdin().lock().lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
            debug!("Stdin reader finished");
        });
        Self::from_lines(rx, tokio::io::stdout())
    }
}

impl<W: AsyncWrite + Unpin + Send> TextChannel<W> {
    /// Text channel over any async reader; must be called inside a runtime
    pub fn new<R>(reader: R, out: W) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(async move {
            let mut lines = reader.lines();
            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) => Ok(line),
                    Ok(None) => break,
                    Err(e) => Err(e),
                };
                let failed = line.is_err();
                if tx.send(line).await.is_err() || failed {
                    break;
                }
            }
        });
        Self::from_lines(rx, out)
    }

    pub fn from_lines(lines: mpsc::Receiver<io::Result<String>>, out: W) -> Self {
        Self { lines, out }
    }

    pub fn into_writer(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> Channel for TextChannel<W> {
    async fn open(&mut self) -> io::Result<()> {
        write_line(&mut self.out, "=== Termux Assistant (Text Mode) ===").await?;
        write_line(
            &mut self.out,
            "Type 'quit' to exit, 'voice' to switch to voice mode\n",
        )
        .await
    }

    async fn listen(&mut self) -> io::Result<Heard> {
        self.out.write_all(b"You: ").await?;
        self.out.flush().await?;

        match self.lines.recv().await {
            Some(line) => Ok(Heard::Utterance(line?)),
            None => Ok(Heard::Closed),
        }
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        write_line(&mut self.out, &format!("Assistant: {}\n", text)).await
    }

    async fn notice(&mut self, text: &str) -> io::Result<()> {
        write_line(&mut self.out, text).await
    }

    async fn close(&mut self) -> io::Result<()> {
        write_line(&mut self.out, "Goodbye!").await
    }

    async fn interrupted(&mut self) -> io::Result<()> {
        write_line(&mut self.out, "\nGoodbye!").await
    }
}

/// Spoken conversation through Termux speech facilities
pub struct VoiceChannel<W> {
    runner: Arc<dyn CommandRunner>,
    out: W,
}

impl VoiceChannel<Stdout> {
    pub fn stdio(runner: Arc<dyn CommandRunner>) -> Self {
        Self::new(runner, tokio::io::stdout())
    }
}

impl<W: AsyncWrite + Unpin + Send> VoiceChannel<W> {
    pub fn new(runner: Arc<dyn CommandRunner>, out: W) -> Self {
        Self { runner, out }
    }

    pub fn into_writer(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> Channel for VoiceChannel<W> {
    async fn open(&mut self) -> io::Result<()> {
        write_line(&mut self.out, "=== Termux Assistant (Voice Mode) ===").await?;
        write_line(
            &mut self.out,
            "Say 'quit' to exit, 'text mode' to switch to text input\n",
        )
        .await?;
        self.say("Hello, I'm ready to help.").await
    }

    async fn listen(&mut self) -> io::Result<Heard> {
        write_line(&mut self.out, "\n[Listening... speak now]").await?;

        let output = self.runner.run("termux-speech-to-text", &[]).await;
        let text = output.stdout.trim();

        if !output.success() || text.is_empty() {
            write_line(&mut self.out, "[No speech detected]").await?;
            return Ok(Heard::Nothing);
        }

        write_line(&mut self.out, &format!("You: {}", text)).await?;
        Ok(Heard::Utterance(text.to_string()))
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        write_line(&mut self.out, &format!("Assistant: {}", text)).await?;

        let output = self.runner.run("termux-tts-speak", &[text]).await;
        if !output.success() {
            warn!(stderr = %output.stderr, "Text-to-speech failed");
        }
        Ok(())
    }

    async fn notice(&mut self, text: &str) -> io::Result<()> {
        write_line(&mut self.out, text).await
    }

    async fn close(&mut self) -> io::Result<()> {
        self.say("Goodbye!").await
    }

    async fn interrupted(&mut self) -> io::Result<()> {
        self.close().await
    }
}
