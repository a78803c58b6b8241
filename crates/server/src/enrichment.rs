// Post summary and sentiment, remote first with a local fallback

use crate::local;
use agora_core::text::{truncate_chars, MAX_SUMMARY_CHARS};
use agora_core::SentimentResult;
use agora_sdk::{McpClient, McpClientResult};
use serde::{Deserialize, Serialize};

/// Longest sentiment label a post can store.
pub const MAX_SENTIMENT_CHARS: usize = 50;
pub const DEFAULT_SENTIMENT: &str = "NEUTRAL";

/// Which path produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Remote,
    Local,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    pub sentiment: String,
    pub summary: String,
    pub sentiment_source: Source,
    pub summary_source: Source,
}

/// Enriches posts through the MCP `summarize` and `sentiment` tools.
///
/// Transport failures and 5xx answers fall back to the in-process
/// classifier and summarizer. 4xx answers are returned to the caller.
#[derive(Debug, Clone)]
pub struct PostEnricher {
    client: McpClient,
}

impl PostEnricher {
    pub fn new(client: McpClient) -> Self {
        Self { client }
    }

    pub async fn enrich(&self, title: &str, content: &str) -> McpClientResult<Enrichment> {
        let text = post_text(title, content);

        let (summary, summary_source) = self.summary(&text).await?;
        let (sentiment, sentiment_source) = self.sentiment(&text).await?;

        Ok(Enrichment {
            sentiment,
            summary,
            sentiment_source,
            summary_source,
        })
    }

    async fn summary(&self, text: &str) -> McpClientResult<(String, Source)> {
        let remote = self
            .client
            .invoke_tool("summarize", &serde_json::json!({ "text": text }))
            .await
            .map(|value| {
                value
                    .get("summary")
                    .and_then(|s| s.as_str())
                    .map(|s| truncate_chars(s.trim(), MAX_SUMMARY_CHARS).to_string())
                    .filter(|s| !s.is_empty())
            });

        match fallback_on_server_error("summarize", remote)? {
            Some(summary) => Ok((summary, Source::Remote)),
            None => Ok((local::summarize(text), Source::Local)),
        }
    }

    async fn sentiment(&self, text: &str) -> McpClientResult<(String, Source)> {
        let remote = self
            .client
            .invoke_tool_as::<SentimentResult, _>("sentiment", &serde_json::json!({ "text": text }))
            .await
            .map(|result| normalize_label(&result.sentiment));

        match fallback_on_server_error("sentiment", remote)? {
            Some(label) => Ok((label, Source::Remote)),
            None => {
                let label = normalize_label(local::classify_sentiment(text))
                    .unwrap_or_else(|| DEFAULT_SENTIMENT.to_string());
                Ok((label, Source::Local))
            }
        }
    }
}

/// `Ok(None)` means use the local path: either the remote had nothing
/// usable or it failed on its side.
fn fallback_on_server_error<T>(
    tool: &str,
    result: McpClientResult<Option<T>>,
) -> McpClientResult<Option<T>> {
    match result {
        Ok(value) => {
            if value.is_none() {
                tracing::info!(tool, "MCP tool returned nothing usable, using local fallback");
            }
            Ok(value)
        }
        Err(err) if err.is_server_side() => {
            tracing::warn!(tool, error = %err, "MCP tool unavailable, using local fallback");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn post_text(title: &str, content: &str) -> String {
    match (title.trim(), content.trim()) {
        ("", content) => content.to_string(),
        (title, "") => title.to_string(),
        (title, content) => format!("{}\n\n{}", title, content),
    }
}

/// Uppercase, trimmed, at most 50 chars; `None` when blank.
pub fn normalize_label(raw: &str) -> Option<String> {
    let upper = raw.trim().to_uppercase();
    let label = truncate_chars(&upper, MAX_SENTIMENT_CHARS).trim_end();
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}
