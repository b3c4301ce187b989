//! Compaction counters.

use serde::{Deserialize, Serialize};

/// Cumulative compaction activity of one store. Only ever grows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionStats {
    pub compaction_count: u64,
    pub total_compacted_messages: u64,
}

impl CompactionStats {
    /// Record one compaction attempt that removed `discarded` messages.
    pub fn record(&mut self, discarded: usize) {
        self.compaction_count += 1;
        self.total_compacted_messages += discarded as u64;
    }
}

/// Read-only snapshot returned by [`crate::ConversationStore::stats`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub current_messages: usize,
    pub compaction_count: u64,
    pub total_compacted_messages: u64,
    pub has_summary: bool,
    /// Length of the stored summary in characters.
    pub summary_length: usize,
}
