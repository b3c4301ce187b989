use crate::error::StoreError;
use crate::llm::Message;
use serde::{Deserialize, Serialize};

/// Serialized form of a [`crate::ConversationStore`].
///
/// Every compaction field is optional on input so that snapshots of a plain
/// [`crate::InMemoryStore`] (which only carry `messages`) load as a store
/// that has never compacted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(rename = "liveMessages", alias = "messages")]
    pub live_messages: Vec<Message>,

    #[serde(rename = "compression_summary", default)]
    pub summary: Option<String>,

    #[serde(rename = "compression_count", default)]
    pub compaction_count: u64,

    #[serde(rename = "total_compressed_messages", default)]
    pub total_compacted_messages: u64,

    /// Absent means "use the configured value".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_messages: Option<usize>,

    /// Absent means "use the configured value".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress_to: Option<usize>,
}

impl PersistedState {
    /// # Errors
    /// Returns [`StoreError::Deserialize`] when `value` does not match the schema.
    pub fn from_value(value: serde_json::Value) -> Result<Self, StoreError> {
        serde_json::from_value(value).map_err(StoreError::Deserialize)
    }

    /// # Errors
    /// Returns [`StoreError::Serialize`] if encoding fails.
    pub fn to_value(&self) -> Result<serde_json::Value, StoreError> {
        serde_json::to_value(self).map_err(StoreError::Serialize)
    }
}
