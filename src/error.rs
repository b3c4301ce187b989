//! Errors that cross the store boundary.
//!
//! Summarizer and merge failures never show up here: compaction absorbs them
//! and falls back to truncation (see [`crate::compaction::CompactionOutcome`]).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("max_messages must be greater than zero")]
    ZeroMaxMessages,

    #[error("compress_to ({compress_to}) must be less than max_messages ({max_messages})")]
    InvalidThresholds {
        max_messages: usize,
        compress_to: usize,
    },

    #[error("malformed conversation state: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("failed to serialize conversation state: {0}")]
    Serialize(#[source] serde_json::Error),
}
