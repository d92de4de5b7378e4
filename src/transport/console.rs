#![cfg(feature = "std")]

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::transport::{InboundFeed, InboundMessage, MessageSink};

/// Reads `<opponent> <text>` lines from stdin. The opponent id doubles as the
/// thread id.
pub struct ConsoleFeed {
    lines: Lines<BufReader<Stdin>>,
    next_id: u64,
}

impl ConsoleFeed {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            next_id: 0,
        }
    }
}

impl Default for ConsoleFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a console line into an inbound message. Blank lines yield `None`.
pub fn parse_console_line(line: &str, message_id: u64) -> Option<InboundMessage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (opponent, body) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    Some(InboundMessage::new(
        opponent,
        opponent,
        message_id.to_string(),
        body.trim_start(),
    ))
}

#[async_trait::async_trait]
impl InboundFeed for ConsoleFeed {
    async fn recv(&mut self) -> anyhow::Result<Option<InboundMessage>> {
        loop {
            let line = match self.lines.next_line().await.context("reading stdin")? {
                Some(line) => line,
                None => return Ok(None),
            };
            self.next_id += 1;
            if let Some(msg) = parse_console_line(&line, self.next_id) {
                return Ok(Some(msg));
            }
        }
    }
}

/// Prints replies to stdout as `[<thread>] <text>`.
pub struct ConsoleSink {
    stdout: Mutex<tokio::io::Stdout>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            stdout: Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MessageSink for ConsoleSink {
    async fn send(&self, thread_id: &str, text: &str) -> anyhow::Result<()> {
        let line = format!("[{}] {}\n", thread_id, text);
        let mut stdout = self.stdout.lock().await;
        stdout.write_all(line.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}
