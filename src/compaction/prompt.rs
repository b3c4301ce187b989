//! Prompt rendering for summarization and merging.

use crate::llm::{Message, Role};

/// Divider placed between two summaries when they are concatenated.
pub const SUMMARY_DIVIDER: &str = "\n\n---\n\n";

const SUMMARY_HEADER: &str = "## 📝 对话历史摘要";
const SUMMARY_FOOTER: &str = "\n\n---\n*以下是最近的详细对话记录*\n";

/// Display label used when rendering a role into a prompt.
#[must_use]
pub fn role_display_name(role: &Role) -> String {
    match role {
        Role::User => "用户".to_string(),
        Role::Assistant => "助手".to_string(),
        Role::System => "系统".to_string(),
        Role::Tool => "工具".to_string(),
        Role::Other(name) => capitalize(name),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Render messages as `"<role>: <text>"` blocks separated by blank lines.
/// Messages without text are skipped.
#[must_use]
pub fn render_conversation(messages: &[Message]) -> String {
    messages
        .iter()
        .filter_map(|message| {
            let text = message.text();
            (!text.is_empty())
                .then(|| format!("{}: {text}", role_display_name(&message.role)))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Instruction prompt asking for a structured summary of `messages`.
#[must_use]
pub fn build_summary_prompt(messages: &[Message]) -> String {
    let conversation = render_conversation(messages);
    format!(
        r"请总结以下对话的关键信息。你的摘要应该：

1. **保留重要事实和数据** - 包括具体的数字、日期、名称等
2. **记录关键决策** - 用户做出的选择和偏好
3. **提取核心话题** - 主要讨论的主题和问题
4. **标注未解决的问题** - 任何悬而未决的事项

请用简洁但信息完整的方式输出摘要，使用要点列表格式。

<对话内容>
{conversation}
</对话内容>

请输出结构化摘要："
    )
}

/// Instruction prompt asking to fold `new_summary` into `old_summary`.
#[must_use]
pub fn build_merge_prompt(old_summary: &str, new_summary: &str) -> String {
    format!(
        r"请合并以下两段对话摘要，生成一个连贯统一的总结。

要求：
- 去除重复信息
- 保持时间顺序
- 突出重点和变化
- 保持简洁（不超过原有长度）

<早期摘要>
{old_summary}
</早期摘要>

<新增内容摘要>
{new_summary}
</新增内容摘要>

请输出合并后的摘要："
    )
}

/// Wrap a stored summary for presentation as a leading system message.
#[must_use]
pub fn format_summary(summary: &str) -> String {
    format!("{SUMMARY_HEADER}\n\n{summary}{SUMMARY_FOOTER}")
}
