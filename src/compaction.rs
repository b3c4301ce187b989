//! Compaction of long conversation histories.
//!
//! When a store's live buffer grows past its ceiling, the oldest messages are
//! summarized and folded into a rolling summary, and only the most recent
//! messages are kept verbatim.
//!
//! # Overview
//!
//! One compaction round works as follows:
//! 1. [`CompactionPolicy`] sees the live buffer exceed `max_messages`
//! 2. The oldest `len - compress_to` messages become the compaction segment
//! 3. The segment is rendered and sent to the [`Summarizer`](crate::Summarizer)
//! 4. [`SummaryMerger`] folds the fresh summary into the running one
//! 5. The store commits the retained tail, the summary and the counters at once
//!
//! A failing or missing summarizer never fails the append: the round
//! degrades to truncation and the segment is dropped without a summary.
//!
//! # Configuration
//!
//! Use [`CompressionConfig`] to customize compaction behavior:
//! - `max_messages`: live message count that triggers compaction
//! - `compress_to`: how many recent messages survive a compaction
//! - `summary_max_tokens`: output-length hint for the summarizer
//! - `enable_compression`: master switch

mod compactor;
mod config;
mod merger;
mod policy;
pub mod prompt;
mod stats;

pub use compactor::{CompactionRound, Compactor};
pub use config::CompressionConfig;
pub use merger::{MergeStrategy, MergedSummary, SummaryMerger};
pub use policy::CompactionPolicy;
pub use stats::{CompactionStats, StoreStats};

use serde::{Deserialize, Serialize};

/// Running digest of every message compacted so far.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompactionSummary {
    text: String,
}

impl CompactionSummary {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Why a compaction round dropped its segment without summarizing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TruncationReason {
    /// No summarizer is configured.
    NoSummarizer,
    /// The summarizer call failed with the given error.
    SummarizerFailed(String),
}

/// What an append did to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompactionOutcome {
    /// The live buffer stayed within bounds; nothing was touched.
    NoOp,
    /// The segment was summarized and merged into the running summary.
    Compacted {
        compacted: usize,
        merge: MergeStrategy,
    },
    /// The segment was dropped and the summary left unchanged.
    Truncated {
        discarded: usize,
        reason: TruncationReason,
    },
}

impl CompactionOutcome {
    /// Messages removed from the live buffer by this append.
    #[must_use]
    pub const fn removed(&self) -> usize {
        match self {
            Self::NoOp => 0,
            Self::Compacted { compacted, .. } => *compacted,
            Self::Truncated { discarded, .. } => *discarded,
        }
    }

    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}
