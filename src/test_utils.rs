use crate::llm::{ChatOutcome, ChatRequest, ChatResponse, ContentPart};
use crate::summarizer::Summarizer;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

// ===================
// Mock LLM Provider
// ===================

pub struct MockProvider {
    responses: Mutex<Vec<ChatOutcome>>,
    requests: Mutex<Vec<ChatRequest>>,
    call_count: AtomicUsize,
}

impl MockProvider {
    pub fn new(responses: Vec<ChatOutcome>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn text_response(text: &str) -> ChatOutcome {
        ChatOutcome::Success(ChatResponse {
            content: vec![ContentPart::text(text)],
        })
    }

    pub fn empty_response() -> ChatOutcome {
        ChatOutcome::Success(ChatResponse {
            content: Vec::new(),
        })
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl crate::llm::LlmProvider for MockProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatOutcome> {
        let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().expect("lock poisoned").push(request);
        let responses = self.responses.lock().expect("lock poisoned");
        Ok(responses
            .get(idx)
            .cloned()
            .unwrap_or_else(|| Self::text_response("Done")))
    }

    fn model(&self) -> &'static str {
        "mock-model"
    }

    fn provider(&self) -> &'static str {
        "mock"
    }
}

// ===================
// Mock Summarizer
// ===================

/// Scripted summarizer. Each call pops the next scripted reply; once the
/// script runs out it answers `"summary #<n>"` with a 1-based call number.
pub struct MockSummarizer {
    script: Mutex<Vec<std::result::Result<String, String>>>,
    prompts: Mutex<Vec<(String, u32)>>,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::scripted(Vec::new())
    }

    pub fn scripted(script: Vec<std::result::Result<&str, &str>>) -> Self {
        let script = script
            .into_iter()
            .rev()
            .map(|r| r.map(String::from).map_err(String::from))
            .collect();
        Self {
            script: Mutex::new(script),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().expect("lock poisoned").len()
    }

    pub fn prompts(&self) -> Vec<(String, u32)> {
        self.prompts.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let call = {
            let mut prompts = self.prompts.lock().expect("lock poisoned");
            prompts.push((prompt.to_string(), max_tokens));
            prompts.len()
        };
        match self.script.lock().expect("lock poisoned").pop() {
            Some(Ok(text)) => Ok(text),
            Some(Err(error)) => Err(anyhow!(error)),
            None => Ok(format!("summary #{call}")),
        }
    }
}

/// Summarizer whose every call fails.
pub struct FailingSummarizer;

#[async_trait]
impl Summarizer for FailingSummarizer {
    async fn summarize(&self, _prompt: &str, _max_tokens: u32) -> Result<String> {
        Err(anyhow!("provider unavailable"))
    }
}
