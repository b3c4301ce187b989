//! Message model and the provider-agnostic chat capability.

pub mod types;

pub use types::*;

use anyhow::Result;
use async_trait::async_trait;

/// A text-generation backend that answers a single chat request.
///
/// The store never talks to a provider directly; it goes through
/// [`crate::summarizer::LlmSummarizer`], which adapts any provider into a
/// [`crate::summarizer::Summarizer`].
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat(&self, request: ChatRequest) -> Result<ChatOutcome>;
    fn model(&self) -> &str;
    fn provider(&self) -> &'static str;
}
