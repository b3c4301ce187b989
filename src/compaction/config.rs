//! Configuration for conversation compaction.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};

/// Configuration for conversation compaction.
///
/// Controls when compaction runs and how much history survives it.
///
/// # Example
///
/// ```
/// use compacting_store::CompressionConfig;
///
/// let config = CompressionConfig::default()
///     .with_max_messages(20)
///     .with_compress_to(5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Live message count above which compaction runs.
    /// Default: 50
    pub max_messages: usize,

    /// Number of most recent messages kept verbatim by compaction.
    /// Must be less than `max_messages`.
    /// Default: 10
    pub compress_to: usize,

    /// Output-length hint passed to the summarizer.
    /// Default: 1000
    pub summary_max_tokens: u32,

    /// Extra output-length allowance for merging two summaries.
    /// Default: 500
    pub merge_extra_tokens: u32,

    /// Master switch. When false, appends never compact.
    /// Default: true
    pub enable_compression: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_messages: 50,
            compress_to: 10,
            summary_max_tokens: 1000,
            merge_extra_tokens: 500,
            enable_compression: true,
        }
    }
}

impl CompressionConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_max_messages(mut self, max_messages: usize) -> Self {
        self.max_messages = max_messages;
        self
    }

    #[must_use]
    pub const fn with_compress_to(mut self, compress_to: usize) -> Self {
        self.compress_to = compress_to;
        self
    }

    #[must_use]
    pub const fn with_summary_max_tokens(mut self, tokens: u32) -> Self {
        self.summary_max_tokens = tokens;
        self
    }

    #[must_use]
    pub const fn with_merge_extra_tokens(mut self, tokens: u32) -> Self {
        self.merge_extra_tokens = tokens;
        self
    }

    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }

    /// Length hint for a merge request.
    #[must_use]
    pub const fn merge_max_tokens(&self) -> u32 {
        self.summary_max_tokens.saturating_add(self.merge_extra_tokens)
    }

    /// Check the threshold relationship.
    ///
    /// # Errors
    /// Returns [`StoreError::ZeroMaxMessages`] or
    /// [`StoreError::InvalidThresholds`] when `compress_to >= max_messages`.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.max_messages == 0 {
            return Err(StoreError::ZeroMaxMessages);
        }
        if self.compress_to >= self.max_messages {
            return Err(StoreError::InvalidThresholds {
                max_messages: self.max_messages,
                compress_to: self.compress_to,
            });
        }
        Ok(())
    }
}
