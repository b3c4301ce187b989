//! Compacting conversation example.
//!
//! Drives a store through a long conversation with a local, offline
//! provider that "summarizes" by keeping the first line of every turn.
//!
//! # Running
//!
//! ```bash
//! cargo run --example compacting_conversation
//! ```
//!
//! To see compaction logs:
//! ```bash
//! RUST_LOG=compacting_store=debug cargo run --example compacting_conversation
//! ```

use anyhow::Result;
use async_trait::async_trait;
use compacting_store::llm::{ChatOutcome, ChatRequest, ChatResponse};
use compacting_store::{
    CompressionConfig, ContentPart, ConversationStore, LlmProvider, LlmSummarizer, Message,
};
use std::sync::Arc;

/// Offline provider: answers every request with the bullet-ified lines of
/// the prompt that look like conversation turns.
struct ExtractiveProvider;

#[async_trait]
impl LlmProvider for ExtractiveProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatOutcome> {
        let prompt = request
            .messages
            .iter()
            .map(Message::text)
            .collect::<Vec<_>>()
            .join("\n");
        let bullets = prompt
            .lines()
            .filter(|line| line.contains(": ") || line.starts_with("- "))
            .map(|line| format!("- {}", line.trim_start_matches("- ")))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(ChatOutcome::Success(ChatResponse {
            content: vec![ContentPart::text(bullets)],
        }))
    }

    fn model(&self) -> &'static str {
        "extractive-v1"
    }

    fn provider(&self) -> &'static str {
        "local"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (the crate uses the `log` facade)
    env_logger::init();

    let config = CompressionConfig::default()
        .with_max_messages(20)
        .with_compress_to(5)
        .with_summary_max_tokens(800);
    let summarizer = Arc::new(LlmSummarizer::new(Arc::new(ExtractiveProvider)));
    let store = ConversationStore::new(config.clone())?.with_summarizer(summarizer.clone());

    let topics = [
        "我叫张三，是一名软件工程师",
        "我正在学习AI和机器学习",
        "我最喜欢的编程语言是Rust",
        "我最近在做一个智能体项目",
        "这个项目需要处理长对话",
        "我需要实现上下文压缩功能",
    ];

    for round in 0..25 {
        let topic = topics[round % topics.len()];
        let outcome = store
            .append([
                Message::user(format!("[{round}] {topic}")),
                Message::assistant(format!("[{round}] 收到：{topic}")),
            ])
            .await;
        if !outcome.is_noop() {
            println!("round {round}: {outcome:?}");
        }
    }

    let stats = store.stats().await;
    println!("\n---");
    println!("current messages:          {}", stats.current_messages);
    println!("compactions:               {}", stats.compaction_count);
    println!("total compacted messages:  {}", stats.total_compacted_messages);
    println!("summary length (chars):    {}", stats.summary_length);

    // Persist and restore
    let snapshot = store.to_json().await?;
    let restored = ConversationStore::from_json(snapshot, config)?.with_summarizer(summarizer);
    let history = restored.list().await;
    println!("\nrestored history has {} messages", history.len());
    if let Some(first) = history.first() {
        println!("\n{}", first.text());
    }

    Ok(())
}
