// Chat assistant tool

use crate::tools::{required_str, upstream, Tool};
use agora_core::llm::{CompletionProvider, CompletionRequest};
use agora_core::{
    json_schema_object, json_schema_string, ToolError, ToolPayload, ToolResult, ToolSchema,
};
use std::sync::Arc;

/// General chat assistant for the app
pub struct ChatTool {
    provider: Arc<dyn CompletionProvider>,
}

impl ChatTool {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl Tool for ChatTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "chat".to_string(),
            description: "General chat assistant for the app.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "message": json_schema_string("User message to send to the assistant.")
                }),
                vec!["message"],
            ),
        }
    }

    async fn execute(&self, payload: &ToolPayload) -> ToolResult {
        let message = required_str(payload, "message", "Message is required.")?;

        let prompt = format!(
            "You are an intelligent AI assistant integrated into a social media platform.\n\
             Respond helpfully and concisely to the following message:\n\n{}",
            message
        );

        let reply = self
            .provider
            .complete(&CompletionRequest::prompt(prompt, 400))
            .await
            .map_err(|e| upstream(self.provider.as_ref(), "Chat AI failed", e))?;

        if reply.trim().is_empty() {
            return Err(ToolError::Upstream("Chat AI failed: empty completion".to_string()));
        }

        Ok(serde_json::json!({ "reply": reply }))
    }
}
