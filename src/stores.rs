//! Storage trait for conversation history.
//!
//! - [`MessageStore`] - appends, lists and snapshots one conversation
//!
//! # Built-in Implementations
//!
//! [`InMemoryStore`] keeps every message forever and is the plain baseline.
//! [`crate::ConversationStore`] implements the same trait but compacts old
//! messages into a rolling summary, and can load an [`InMemoryStore`]
//! snapshot.

use crate::llm;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Trait for storing and retrieving one conversation's messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append messages to the history, in order.
    ///
    /// # Errors
    /// Returns an error if the messages cannot be stored.
    async fn add_messages(&self, messages: Vec<llm::Message>) -> Result<()>;

    /// Messages to send to the model, oldest first.
    ///
    /// # Errors
    /// Returns an error if the history cannot be retrieved.
    async fn list_messages(&self) -> Result<Vec<llm::Message>>;

    /// Number of messages returned by [`MessageStore::list_messages`].
    ///
    /// # Errors
    /// Returns an error if the history cannot be retrieved.
    async fn count(&self) -> Result<usize> {
        Ok(self.list_messages().await?.len())
    }

    /// Snapshot of the store's state as JSON.
    ///
    /// # Errors
    /// Returns an error if the state cannot be read or encoded.
    async fn serialize_state(&self) -> Result<serde_json::Value>;
}

#[derive(Serialize, Deserialize)]
struct PlainState {
    messages: Vec<llm::Message>,
}

/// Non-compacting in-memory store.
#[derive(Default)]
pub struct InMemoryStore {
    messages: RwLock<Vec<llm::Message>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_messages(messages: Vec<llm::Message>) -> Self {
        Self {
            messages: RwLock::new(messages),
        }
    }

    /// Rebuild a store from [`MessageStore::serialize_state`] output.
    ///
    /// # Errors
    /// Returns an error if `state` has no `messages` array of messages.
    pub fn from_state(state: serde_json::Value) -> Result<Self> {
        let state: PlainState =
            serde_json::from_value(state).context("invalid message store state")?;
        Ok(Self::with_messages(state.messages))
    }
}

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn add_messages(&self, messages: Vec<llm::Message>) -> Result<()> {
        self.messages
            .write()
            .ok()
            .context("lock poisoned")?
            .extend(messages);
        Ok(())
    }

    async fn list_messages(&self) -> Result<Vec<llm::Message>> {
        let messages = self.messages.read().ok().context("lock poisoned")?;
        Ok(messages.clone())
    }

    async fn serialize_state(&self) -> Result<serde_json::Value> {
        let messages = self.messages.read().ok().context("lock poisoned")?.clone();
        serde_json::to_value(PlainState { messages }).context("failed to encode message store")
    }
}
