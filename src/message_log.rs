//! Append-only record of inbound chat messages.

#![cfg(feature = "std")]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::transport::InboundMessage;

/// One stored message, keyed by thread and message id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedMessage {
    pub thread_id: String,
    pub message_id: String,
    pub body: String,
}

impl From<&InboundMessage> for LoggedMessage {
    fn from(msg: &InboundMessage) -> Self {
        Self {
            thread_id: msg.thread_id.clone(),
            message_id: msg.message_id.clone(),
            body: msg.body.clone(),
        }
    }
}

/// Durable store for inbound messages. Write-only from the game's side.
#[async_trait::async_trait]
pub trait MessageLog: Send + Sync {
    async fn append(&self, msg: &InboundMessage) -> anyhow::Result<()>;
}

/// Keeps the log in memory. Clones share the same records.
#[derive(Clone, Default)]
pub struct InMemoryMessageLog {
    records: Arc<Mutex<Vec<LoggedMessage>>>,
}

impl InMemoryMessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, Vec<LoggedMessage>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn entries(&self) -> Vec<LoggedMessage> {
        self.records().clone()
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

#[async_trait::async_trait]
impl MessageLog for InMemoryMessageLog {
    async fn append(&self, msg: &InboundMessage) -> anyhow::Result<()> {
        self.records().push(LoggedMessage::from(msg));
        Ok(())
    }
}
