pub mod chat;
pub mod content;
pub mod sentiment;
pub mod summarize;
mod registry;

pub use chat::ChatTool;
pub use content::ContentGenerationTool;
pub use registry::{Tool, ToolRegistry, ToolRegistryBuilder};
pub use sentiment::SentimentTool;
pub use summarize::SummarizeTool;

use agora_core::llm::{CompletionProvider, LlmError};
use agora_core::{ToolError, ToolPayload, ToolResult};
use std::sync::Arc;

impl ToolRegistry {
    /// Registry with the summarize, sentiment, content generation and chat tools
    pub fn with_default_tools(provider: Arc<dyn CompletionProvider>) -> Self {
        Self::builder()
            .register(Arc::new(SummarizeTool::new(provider.clone())))
            .register(Arc::new(SentimentTool::new(provider.clone())))
            .register(Arc::new(ContentGenerationTool::new(provider.clone())))
            .register(Arc::new(ChatTool::new(provider)))
            .build()
    }
}

/// Fetch a required, non-empty string field from the payload.
pub(crate) fn required_str<'a>(
    payload: &'a ToolPayload,
    key: &str,
    message: &str,
) -> ToolResult<&'a str> {
    payload
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ToolError::InvalidInput(message.to_string()))
}

/// Re-signal a provider failure as the tool's own failure.
pub(crate) fn upstream(provider: &dyn CompletionProvider, what: &str, err: LlmError) -> ToolError {
    tracing::warn!(provider = provider.name(), model = provider.model(), error = %err, "{}", what);
    ToolError::Upstream(format!("{}: {}", what, err))
}

#[cfg(test)]
pub(crate) mod testing {
    use agora_core::llm::{CompletionProvider, CompletionRequest, LlmError};
    use std::sync::Mutex;

    /// Provider that returns a canned completion and records requests.
    pub struct StubProvider {
        reply: Result<String, String>,
        pub requests: Mutex<Vec<CompletionRequest>>,
    }

    impl StubProvider {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn last_prompt(&self) -> String {
            let requests = self.requests.lock().unwrap();
            requests
                .last()
                .and_then(|r| r.messages.last())
                .map(|m| m.content.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait::async_trait]
    impl CompletionProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub-model"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            self.reply
                .clone()
                .map_err(LlmError::Connection)
        }
    }

    pub fn payload(value: serde_json::Value) -> agora_core::ToolPayload {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("payload must be an object"),
        }
    }
}
