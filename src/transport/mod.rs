//! Chat-side collaborators: where inbound messages come from and where
//! replies go.

#![cfg(feature = "std")]

use serde::{Deserialize, Serialize};

/// A text message attributed to a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub opponent_id: String,
    pub thread_id: String,
    pub message_id: String,
    pub body: String,
}

impl InboundMessage {
    pub fn new(
        opponent_id: impl Into<String>,
        thread_id: impl Into<String>,
        message_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            opponent_id: opponent_id.into(),
            thread_id: thread_id.into(),
            message_id: message_id.into(),
            body: body.into(),
        }
    }
}

/// A reply delivered to a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub thread_id: String,
    pub body: String,
}

/// Delivers text to a conversation thread. Delivery guarantees belong to the
/// implementation.
#[async_trait::async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, thread_id: &str, text: &str) -> anyhow::Result<()>;
}

/// Source of inbound chat messages. `Ok(None)` means the feed is exhausted.
#[async_trait::async_trait]
pub trait InboundFeed: Send {
    async fn recv(&mut self) -> anyhow::Result<Option<InboundMessage>>;
}

pub mod console;
pub mod in_memory;
