// Sentiment classification tool

use crate::tools::{required_str, upstream, Tool};
use agora_core::llm::{CompletionProvider, CompletionRequest};
use agora_core::{
    json_schema_object, json_schema_string, parse_sentiment, ToolPayload, ToolResult, ToolSchema,
};
use anyhow::Context;
use std::sync::Arc;

/// Classifies the sentiment of text as Positive, Neutral or Negative
pub struct SentimentTool {
    provider: Arc<dyn CompletionProvider>,
}

impl SentimentTool {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    fn prompt(text: &str) -> String {
        format!(
            "Analyze the sentiment of the text below. Respond strictly in JSON with the shape:\n\
             {{\"sentiment\": \"Positive|Neutral|Negative\", \"reason\": \"short justification\", \"confidence\": 0-1}}\n\n\
             Text:\n{}",
            text
        )
    }
}

#[async_trait::async_trait]
impl Tool for SentimentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "sentiment".to_string(),
            description: "Classifies sentiment of the provided text.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "text": json_schema_string("Text to analyze.")
                }),
                vec!["text"],
            ),
        }
    }

    async fn execute(&self, payload: &ToolPayload) -> ToolResult {
        let text = required_str(payload, "text", "text is required")?;

        let request = CompletionRequest::prompt(Self::prompt(text), 200).with_temperature(0.0);
        let raw = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| upstream(self.provider.as_ref(), "Sentiment analysis failed", e))?;

        let result = parse_sentiment(&raw);
        tracing::debug!(sentiment = %result.sentiment, confidence = ?result.confidence, "Parsed sentiment");

        Ok(serde_json::to_value(result).context("Failed to serialize sentiment result")?)
    }
}
