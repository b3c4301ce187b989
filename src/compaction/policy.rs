//! When to compact, and where to cut.

use super::config::CompressionConfig;

/// Decides whether a live buffer must be compacted and how to split it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompactionPolicy {
    max_messages: usize,
    compress_to: usize,
    enabled: bool,
}

impl CompactionPolicy {
    #[must_use]
    pub const fn new(max_messages: usize, compress_to: usize, enabled: bool) -> Self {
        Self {
            max_messages,
            compress_to,
            enabled,
        }
    }

    #[must_use]
    pub const fn from_config(config: &CompressionConfig) -> Self {
        Self::new(
            config.max_messages,
            config.compress_to,
            config.enable_compression,
        )
    }

    /// Strictly more than `max_messages` live messages, and compression on.
    #[must_use]
    pub const fn needs_compaction(&self, live_len: usize) -> bool {
        self.enabled && live_len > self.max_messages
    }

    /// Index of the first retained message.
    ///
    /// Messages before the index form the compaction segment; the rest are
    /// kept verbatim. `None` when nothing should be compacted, including the
    /// degenerate case of an empty segment.
    #[must_use]
    pub const fn split_point(&self, live_len: usize) -> Option<usize> {
        if !self.needs_compaction(live_len) {
            return None;
        }
        match live_len.saturating_sub(self.compress_to) {
            0 => None,
            split => Some(split),
        }
    }
}
