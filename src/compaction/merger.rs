//! Folding a fresh summary into the running one.

use super::prompt::{SUMMARY_DIVIDER, build_merge_prompt};
use crate::summarizer::Summarizer;
use std::sync::Arc;

/// How a merge produced its text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeStrategy {
    /// There was no earlier summary; the fresh one is used as is.
    First,
    /// No merge capability; old and new are joined with a divider.
    Concatenated,
    /// The merge capability rewrote both into one summary.
    Merged,
    /// The merge request failed; the old summary was dropped.
    Replaced,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedSummary {
    pub text: String,
    pub strategy: MergeStrategy,
}

/// Combines the existing running summary with a freshly produced one.
#[derive(Clone)]
pub struct SummaryMerger {
    capability: Option<Arc<dyn Summarizer>>,
    max_tokens: u32,
}

impl SummaryMerger {
    #[must_use]
    pub fn new(capability: Option<Arc<dyn Summarizer>>, max_tokens: u32) -> Self {
        Self {
            capability,
            max_tokens,
        }
    }

    /// Merge `new_summary` into `old_summary`.
    ///
    /// Never fails: a failed merge request falls back to `new_summary` alone.
    pub async fn merge(&self, old_summary: Option<&str>, new_summary: String) -> MergedSummary {
        let Some(old_summary) = old_summary else {
            return MergedSummary {
                text: new_summary,
                strategy: MergeStrategy::First,
            };
        };

        let Some(capability) = &self.capability else {
            return MergedSummary {
                text: format!("{old_summary}{SUMMARY_DIVIDER}{new_summary}"),
                strategy: MergeStrategy::Concatenated,
            };
        };

        let prompt = build_merge_prompt(old_summary, &new_summary);
        match capability.summarize(&prompt, self.max_tokens).await {
            Ok(merged) => MergedSummary {
                text: merged,
                strategy: MergeStrategy::Merged,
            },
            Err(error) => {
                log::warn!("Summary merge failed, keeping only the new summary: {error:#}");
                MergedSummary {
                    text: new_summary,
                    strategy: MergeStrategy::Replaced,
                }
            }
        }
    }
}
