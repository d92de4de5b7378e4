#![cfg(feature = "std")]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::transport::{InboundFeed, InboundMessage, MessageSink, OutboundMessage};

/// Sink that records every reply. Clones share the same record.
#[derive(Clone, Default)]
pub struct InMemorySink {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn sent(&self) -> MutexGuard<'_, Vec<OutboundMessage>> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every message sent so far, oldest first.
    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent().clone()
    }

    /// Bodies of the messages sent to `thread_id`, oldest first.
    pub fn bodies_for(&self, thread_id: &str) -> Vec<String> {
        self.sent()
            .iter()
            .filter(|msg| msg.thread_id == thread_id)
            .map(|msg| msg.body.clone())
            .collect()
    }

    /// Remove and return everything sent so far.
    pub fn take(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut *self.sent())
    }

    pub fn len(&self) -> usize {
        self.sent().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent().is_empty()
    }
}

#[async_trait::async_trait]
impl MessageSink for InMemorySink {
    async fn send(&self, thread_id: &str, text: &str) -> anyhow::Result<()> {
        self.sent().push(OutboundMessage {
            thread_id: thread_id.to_string(),
            body: text.to_string(),
        });
        Ok(())
    }
}

/// Feed that replays a fixed script of messages.
#[derive(Default)]
pub struct InMemoryFeed {
    queue: VecDeque<InboundMessage>,
}

impl InMemoryFeed {
    pub fn new(messages: impl IntoIterator<Item = InboundMessage>) -> Self {
        Self {
            queue: messages.into_iter().collect(),
        }
    }

    pub fn push(&mut self, msg: InboundMessage) {
        self.queue.push_back(msg);
    }
}

#[async_trait::async_trait]
impl InboundFeed for InMemoryFeed {
    async fn recv(&mut self) -> anyhow::Result<Option<InboundMessage>> {
        Ok(self.queue.pop_front())
    }
}
