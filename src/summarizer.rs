//! The summarization capability consumed by the store.
//!
//! Compaction needs exactly one thing from the outside world: turn an
//! instruction prompt into a piece of text. [`Summarizer`] is that boundary.
//! [`LlmSummarizer`] adapts any [`LlmProvider`]; tests and local setups can
//! implement the trait directly.

use crate::llm::{ChatOutcome, ChatRequest, LlmProvider, Message};
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::sync::Arc;

/// Produces text from an instruction prompt.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Run `prompt` and return the generated text.
    ///
    /// `max_tokens` is an output-length hint forwarded to the backend.
    ///
    /// # Errors
    /// Returns an error on transport, provider or empty-response failures.
    async fn summarize(&self, prompt: &str, max_tokens: u32) -> Result<String>;
}

const SYSTEM_PROMPT: &str = "You are a precise summarizer. You condense conversations into complete, faithful summaries without inventing details.";

/// [`Summarizer`] backed by an [`LlmProvider`].
pub struct LlmSummarizer<P: LlmProvider> {
    provider: Arc<P>,
    system: String,
}

impl<P: LlmProvider> LlmSummarizer<P> {
    #[must_use]
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            system: SYSTEM_PROMPT.to_string(),
        }
    }

    /// Replace the default system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }
}

#[async_trait]
impl<P: LlmProvider> Summarizer for LlmSummarizer<P> {
    async fn summarize(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = ChatRequest {
            system: self.system.clone(),
            messages: vec![Message::user(prompt)],
            max_tokens,
        };

        let outcome = self.provider.chat(request).await.with_context(|| {
            format!(
                "Failed to call {} ({}) for summarization",
                self.provider.provider(),
                self.provider.model()
            )
        })?;

        match outcome {
            ChatOutcome::Success(response) => {
                let text = response.text();
                if text.is_empty() {
                    bail!("No text in summarization response");
                }
                Ok(text)
            }
            ChatOutcome::RateLimited => {
                bail!("Rate limited during summarization")
            }
            ChatOutcome::InvalidRequest(msg) => {
                bail!("Invalid request during summarization: {msg}")
            }
            ChatOutcome::ServerError(msg) => {
                bail!("Server error during summarization: {msg}")
            }
        }
    }
}
