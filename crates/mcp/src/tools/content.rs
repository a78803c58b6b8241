// Content generation tool

use crate::tools::{required_str, upstream, Tool};
use agora_core::llm::{CompletionProvider, CompletionRequest};
use agora_core::text::assess_context;
use agora_core::{
    json_schema_object, json_schema_string, ToolError, ToolPayload, ToolResult, ToolSchema,
};
use std::sync::Arc;

/// Generated content shorter than this is treated as a refusal.
const MIN_OUTPUT_CHARS: usize = 30;

/// Writes a short blog post from a free-form context
pub struct ContentGenerationTool {
    provider: Arc<dyn CompletionProvider>,
}

impl ContentGenerationTool {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    fn prompt(context: &str) -> String {
        format!(
            "You are a content generator.\n\
             If the context is vague, DO NOT ask questions or request more details.\n\
             Always generate a structured short blog post based on the context below.\n\n\
             Context: {}\n\n\
             Return only the content. No disclaimers. No suggestions.",
            context
        )
    }
}

#[async_trait::async_trait]
impl Tool for ContentGenerationTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "content_generation".to_string(),
            description: "Generates content based on the provided context.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "context": json_schema_string("Context to generate content from.")
                }),
                vec!["context"],
            ),
        }
    }

    async fn execute(&self, payload: &ToolPayload) -> ToolResult {
        let context = required_str(
            payload,
            "context",
            "No context provided. Please provide more details.",
        )?;

        let verdict = assess_context(context);
        if !verdict.is_meaningful() {
            tracing::debug!(verdict = ?verdict, "Rejected generation context");
            return Err(ToolError::Unprocessable(
                "The provided context is too vague or unclear to generate useful content. \
                 Please provide a more detailed context."
                    .to_string(),
            ));
        }

        let request = CompletionRequest::prompt(Self::prompt(context.trim()), 400);
        let output = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| upstream(self.provider.as_ref(), "Content generation failed", e))?;

        let content = output.trim();
        if content.chars().count() < MIN_OUTPUT_CHARS {
            return Err(ToolError::Unprocessable(
                "Unable to generate meaningful content from the given context. \
                 Please refine your input."
                    .to_string(),
            ));
        }

        Ok(serde_json::json!({ "content": content }))
    }
}
