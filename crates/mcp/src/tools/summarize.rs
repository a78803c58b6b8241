// Summarization tool

use crate::tools::{required_str, upstream, Tool};
use agora_core::llm::{CompletionProvider, CompletionRequest};
use agora_core::text::{truncate_chars, MAX_SUMMARY_CHARS};
use agora_core::{
    json_schema_object, json_schema_string, ToolError, ToolPayload, ToolResult, ToolSchema,
};
use std::sync::Arc;

/// Summarizes text in a few sentences
pub struct SummarizeTool {
    provider: Arc<dyn CompletionProvider>,
}

impl SummarizeTool {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl Tool for SummarizeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "summarize".to_string(),
            description: format!(
                "Summarizes text content using the {} model.",
                self.provider.model()
            ),
            input_schema: json_schema_object(
                serde_json::json!({
                    "text": json_schema_string("Text to summarize."),
                    "context": {
                        "type": "object",
                        "description": "Optional metadata/context passed to the tool."
                    }
                }),
                vec!["text"],
            ),
        }
    }

    async fn execute(&self, payload: &ToolPayload) -> ToolResult {
        let text = required_str(payload, "text", "text is required")?;

        let request = CompletionRequest::prompt(
            format!("Summarize the following text in 3–5 sentences:\n\n{}", text),
            200,
        )
        .with_temperature(0.3);

        let summary = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| upstream(self.provider.as_ref(), "Summarization failed", e))?;

        let summary = truncate_chars(summary.trim(), MAX_SUMMARY_CHARS);
        if summary.is_empty() {
            return Err(ToolError::Upstream(
                "Summarization failed: empty completion".to_string(),
            ));
        }

        Ok(serde_json::json!({ "summary": summary }))
    }
}
