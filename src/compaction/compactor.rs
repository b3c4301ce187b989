//! One compaction round: summarize a segment and merge the result.

use super::merger::{MergedSummary, SummaryMerger};
use super::prompt::build_summary_prompt;
use super::{CompactionSummary, CompressionConfig, TruncationReason};
use crate::llm::Message;
use crate::summarizer::Summarizer;
use std::sync::Arc;

/// Result of running the capabilities for one segment.
///
/// The store turns this into a state commit; the compactor itself never
/// touches store state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompactionRound {
    Summarized(MergedSummary),
    Truncated(TruncationReason),
}

/// Drives the summarizer and merger for a compaction segment.
///
/// Unless a merger is set explicitly, the summarizer also merges summaries.
#[derive(Clone)]
pub struct Compactor {
    summarizer: Option<Arc<dyn Summarizer>>,
    merger: Option<SummaryMerger>,
    summary_max_tokens: u32,
    merge_max_tokens: u32,
}

impl Compactor {
    #[must_use]
    pub fn new(summarizer: Option<Arc<dyn Summarizer>>, config: &CompressionConfig) -> Self {
        Self {
            summarizer,
            merger: None,
            summary_max_tokens: config.summary_max_tokens,
            merge_max_tokens: config.merge_max_tokens(),
        }
    }

    /// Merge through `merger` instead of the summarizer.
    #[must_use]
    pub fn with_merger(mut self, merger: SummaryMerger) -> Self {
        self.merger = Some(merger);
        self
    }

    /// Replace the summarizer. An explicitly set merger is kept.
    pub fn set_summarizer(&mut self, summarizer: Option<Arc<dyn Summarizer>>) {
        self.summarizer = summarizer;
    }

    /// Summarize `segment` and fold it into `previous`.
    ///
    /// Never fails: a missing or failing summarizer yields
    /// [`CompactionRound::Truncated`].
    pub async fn run(
        &self,
        segment: &[Message],
        previous: Option<&CompactionSummary>,
    ) -> CompactionRound {
        let Some(summarizer) = &self.summarizer else {
            return CompactionRound::Truncated(TruncationReason::NoSummarizer);
        };

        let prompt = build_summary_prompt(segment);
        let fresh = match summarizer.summarize(&prompt, self.summary_max_tokens).await {
            Ok(fresh) => fresh,
            Err(error) => {
                log::debug!(
                    "Summarizer failed on {} messages: {error:#}",
                    segment.len()
                );
                return CompactionRound::Truncated(TruncationReason::SummarizerFailed(format!(
                    "{error:#}"
                )));
            }
        };

        let previous = previous
            .map(CompactionSummary::text)
            .filter(|text| !text.is_empty());
        let merged = match &self.merger {
            Some(merger) => merger.merge(previous, fresh).await,
            None => {
                SummaryMerger::new(Some(Arc::clone(summarizer)), self.merge_max_tokens)
                    .merge(previous, fresh)
                    .await
            }
        };
        CompactionRound::Summarized(merged)
    }
}
