//! The compacting conversation store.

mod state;

pub use state::PersistedState;

use crate::compaction::prompt::format_summary;
use crate::compaction::{
    CompactionOutcome, CompactionPolicy, CompactionRound, CompactionStats, CompactionSummary,
    Compactor, CompressionConfig, StoreStats, SummaryMerger, TruncationReason,
};
use crate::error::StoreError;
use crate::llm::{Message, Role};
use crate::stores::MessageStore;
use crate::summarizer::Summarizer;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Default)]
struct ConversationState {
    live_messages: Vec<Message>,
    summary: Option<CompactionSummary>,
    stats: CompactionStats,
}

/// Append-only conversation history with a bounded live buffer.
///
/// Appending past `max_messages` compacts the oldest messages into a running
/// summary and keeps the last `compress_to` verbatim. Appends are serialized
/// per store, so at most one compaction is in flight. Readers never observe
/// a half-applied compaction.
///
/// # Example
///
/// ```ignore
/// use compacting_store::{ConversationStore, CompressionConfig, LlmSummarizer, Message};
///
/// let store = ConversationStore::new(CompressionConfig::default())?
///     .with_summarizer(Arc::new(LlmSummarizer::new(provider)));
///
/// store.append(vec![Message::user("Hello")]).await;
/// let history = store.list().await;
/// ```
pub struct ConversationStore {
    config: CompressionConfig,
    policy: CompactionPolicy,
    compactor: Compactor,
    state: RwLock<ConversationState>,
    append_gate: Mutex<()>,
}

impl ConversationStore {
    /// Create an empty store without a summarizer.
    ///
    /// # Errors
    /// Returns an error if `config` has invalid thresholds.
    pub fn new(config: CompressionConfig) -> Result<Self, StoreError> {
        Self::with_state(config, ConversationState::default())
    }

    /// Create a store pre-filled with `messages`. No compaction runs until
    /// the next append.
    ///
    /// # Errors
    /// Returns an error if `config` has invalid thresholds.
    pub fn with_messages(
        config: CompressionConfig,
        messages: Vec<Message>,
    ) -> Result<Self, StoreError> {
        Self::with_state(
            config,
            ConversationState {
                live_messages: messages,
                ..ConversationState::default()
            },
        )
    }

    /// Rebuild a store from a snapshot.
    ///
    /// `max_messages` and `compress_to` from the snapshot override `config`;
    /// when absent, the values in `config` are used.
    ///
    /// # Errors
    /// Returns an error if the resulting thresholds are invalid.
    pub fn restore(state: PersistedState, config: CompressionConfig) -> Result<Self, StoreError> {
        let config = CompressionConfig {
            max_messages: state.max_messages.unwrap_or(config.max_messages),
            compress_to: state.compress_to.unwrap_or(config.compress_to),
            ..config
        };
        Self::with_state(
            config,
            ConversationState {
                live_messages: state.live_messages,
                summary: state.summary.map(CompactionSummary::new),
                stats: CompactionStats {
                    compaction_count: state.compaction_count,
                    total_compacted_messages: state.total_compacted_messages,
                },
            },
        )
    }

    /// Rebuild a store from JSON produced by [`ConversationStore::to_json`]
    /// or by a plain [`crate::InMemoryStore`].
    ///
    /// # Errors
    /// Returns an error if `value` is malformed or the thresholds are invalid.
    pub fn from_json(
        value: serde_json::Value,
        config: CompressionConfig,
    ) -> Result<Self, StoreError> {
        Self::restore(PersistedState::from_value(value)?, config)
    }

    fn with_state(config: CompressionConfig, state: ConversationState) -> Result<Self, StoreError> {
        config.validate()?;
        Ok(Self {
            policy: CompactionPolicy::from_config(&config),
            compactor: Compactor::new(None, &config),
            config,
            state: RwLock::new(state),
            append_gate: Mutex::new(()),
        })
    }

    /// Use `summarizer` for summarizing, and for merging summaries unless a
    /// merger was set with [`ConversationStore::with_merger`].
    #[must_use]
    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.set_summarizer(Some(summarizer));
        self
    }

    /// Use a separate capability for merging summaries. `None` makes merges
    /// concatenate the old and new summary.
    #[must_use]
    pub fn with_merger(mut self, merger: Option<Arc<dyn Summarizer>>) -> Self {
        let merger = SummaryMerger::new(merger, self.config.merge_max_tokens());
        self.compactor = self.compactor.with_merger(merger);
        self
    }

    /// Replace the summarizer. With `None`, every compaction degrades to
    /// truncation. A merger chosen with [`ConversationStore::with_merger`]
    /// is kept.
    pub fn set_summarizer(&mut self, summarizer: Option<Arc<dyn Summarizer>>) {
        self.compactor.set_summarizer(summarizer);
    }

    #[must_use]
    pub const fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Append messages, compacting at most once if the live buffer overflows.
    ///
    /// Never fails. Summarizer and merge failures are logged and resolved by
    /// the fallbacks described on [`CompactionOutcome`].
    pub async fn append(&self, messages: impl IntoIterator<Item = Message>) -> CompactionOutcome {
        let _gate = self.append_gate.lock().await;

        let (segment, previous) = {
            let mut state = self.state.write().await;
            state.live_messages.extend(messages);

            let live_len = state.live_messages.len();
            let Some(split) = self.policy.split_point(live_len) else {
                return CompactionOutcome::NoOp;
            };

            log::debug!(
                "Compaction triggered (live_messages={live_len}, max_messages={}, segment={split})",
                self.config.max_messages
            );
            (
                state.live_messages[..split].to_vec(),
                state.summary.clone(),
            )
        };

        let round = self.compactor.run(&segment, previous.as_ref()).await;

        // The gate guarantees nobody else mutated the buffer meanwhile, so
        // the segment is still its prefix.
        let removed = segment.len();
        let mut state = self.state.write().await;
        state.live_messages.drain(..removed);
        state.stats.record(removed);

        match round {
            CompactionRound::Summarized(merged) => {
                log::info!(
                    "Compacted {removed} messages (merge={:?}, summary_chars={}, compaction_count={})",
                    merged.strategy,
                    merged.text.chars().count(),
                    state.stats.compaction_count
                );
                state.summary = Some(CompactionSummary::new(merged.text));
                CompactionOutcome::Compacted {
                    compacted: removed,
                    merge: merged.strategy,
                }
            }
            CompactionRound::Truncated(reason) => {
                match &reason {
                    TruncationReason::NoSummarizer => log::debug!(
                        "No summarizer configured, truncated {removed} messages"
                    ),
                    TruncationReason::SummarizerFailed(error) => log::warn!(
                        "Summarization failed, truncated {removed} messages without summarizing them (compaction_count={}): {error}",
                        state.stats.compaction_count
                    ),
                }
                CompactionOutcome::Truncated {
                    discarded: removed,
                    reason,
                }
            }
        }
    }

    /// Live messages, preceded by a synthetic system message carrying the
    /// summary when one exists.
    pub async fn list(&self) -> Vec<Message> {
        let state = self.state.read().await;
        let summary = state.summary.as_ref().filter(|summary| !summary.is_empty());

        let mut messages = Vec::with_capacity(state.live_messages.len() + 1);
        if let Some(summary) = summary {
            messages.push(Message::new(Role::System, format_summary(summary.text())));
        }
        messages.extend(state.live_messages.iter().cloned());
        messages
    }

    /// The stored messages without the summary carrier.
    pub async fn live_messages(&self) -> Vec<Message> {
        self.state.read().await.live_messages.clone()
    }

    pub async fn summary(&self) -> Option<String> {
        self.state
            .read()
            .await
            .summary
            .as_ref()
            .map(|summary| summary.text().to_string())
    }

    pub async fn stats(&self) -> StoreStats {
        let state = self.state.read().await;
        StoreStats {
            current_messages: state.live_messages.len(),
            compaction_count: state.stats.compaction_count,
            total_compacted_messages: state.stats.total_compacted_messages,
            has_summary: state.summary.is_some(),
            summary_length: state.summary.as_ref().map_or(0, CompactionSummary::len),
        }
    }

    pub async fn serialize(&self) -> PersistedState {
        let state = self.state.read().await;
        PersistedState {
            live_messages: state.live_messages.clone(),
            summary: state
                .summary
                .as_ref()
                .map(|summary| summary.text().to_string()),
            compaction_count: state.stats.compaction_count,
            total_compacted_messages: state.stats.total_compacted_messages,
            max_messages: Some(self.config.max_messages),
            compress_to: Some(self.config.compress_to),
        }
    }

    /// # Errors
    /// Returns [`StoreError::Serialize`] if a message cannot be encoded.
    pub async fn to_json(&self) -> Result<serde_json::Value, StoreError> {
        self.serialize().await.to_value()
    }
}

#[async_trait]
impl MessageStore for ConversationStore {
    async fn add_messages(&self, messages: Vec<Message>) -> anyhow::Result<()> {
        self.append(messages).await;
        Ok(())
    }

    async fn list_messages(&self) -> anyhow::Result<Vec<Message>> {
        Ok(self.list().await)
    }

    async fn serialize_state(&self) -> anyhow::Result<serde_json::Value> {
        Ok(self.to_json().await?)
    }
}
