//! Compacting conversation store - bounded chat history for LLM agents.
//!
//! This crate keeps the message history of one conversation and stops it
//! from growing without bound:
//! - Appends go to a live buffer of verbatim messages
//! - When the buffer exceeds `max_messages`, the oldest messages are
//!   summarized by an LLM and folded into a rolling summary
//! - Reads return the summary as a leading system message followed by the
//!   live messages
//! - State round-trips through JSON, including snapshots of plain stores
//!
//! # Example
//!
//! ```ignore
//! use compacting_store::{ConversationStore, CompressionConfig, LlmSummarizer, Message};
//! use std::sync::Arc;
//!
//! let summarizer = Arc::new(LlmSummarizer::new(Arc::new(my_provider)));
//! let store = ConversationStore::new(
//!     CompressionConfig::default().with_max_messages(20).with_compress_to(5),
//! )?
//! .with_summarizer(summarizer);
//!
//! store.append(vec![Message::user("我叫张三")]).await;
//! let context = store.list().await;
//! let snapshot = store.to_json().await?;
//! ```

#![forbid(unsafe_code)]

pub mod compaction;
mod error;
pub mod llm;
mod store;
mod stores;
mod summarizer;

#[cfg(test)]
mod test_utils;

pub use compaction::{
    CompactionOutcome, CompactionStats, CompressionConfig, MergeStrategy, StoreStats,
    TruncationReason,
};
pub use error::StoreError;
pub use llm::{Content, ContentPart, LlmProvider, Message, Role};
pub use store::{ConversationStore, PersistedState};
pub use stores::{InMemoryStore, MessageStore};
pub use summarizer::{LlmSummarizer, Summarizer};
