// Tool registry and dispatch

use agora_core::{ToolError, ToolPayload, ToolResult, ToolSchema};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for discovery
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the caller's payload
    async fn execute(&self, payload: &ToolPayload) -> ToolResult;
}

/// Immutable set of tools, built once at startup.
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> ToolResult<Arc<dyn Tool>> {
        self.tools.get(name).cloned().ok_or_else(|| {
            ToolError::NotFound(format!(
                "Tool '{}' not found. Available tools: {}",
                name,
                self.names().join(", ")
            ))
        })
    }

    /// List all tool schemas, ordered by name
    pub fn list_tools(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    /// Registered tool names, ordered
    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Resolve a tool and run it once.
    ///
    /// Client errors from the handler pass through; anything else comes back
    /// as `Upstream` naming the tool.
    pub async fn invoke(&self, name: &str, payload: &ToolPayload) -> ToolResult {
        let tool = self.get(name)?;
        let started = Instant::now();

        match tool.execute(payload).await {
            Ok(result) => {
                tracing::info!(
                    tool = %name,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Tool invocation succeeded"
                );
                Ok(result)
            }
            Err(err) if err.is_client_error() => {
                tracing::info!(tool = %name, status = err.status_code(), error = %err, "Tool rejected input");
                Err(err)
            }
            Err(err) => {
                tracing::error!(tool = %name, error = ?err, "Tool invocation failed");
                Err(err.for_tool(name))
            }
        }
    }
}

/// Collects tools before the registry is frozen.
#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistryBuilder {
    /// Register a tool; a later tool with the same name replaces the earlier one
    pub fn register(mut self, tool: Arc<dyn Tool>) -> Self {
        let name = tool.schema().name;
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!(tool = %name, "Duplicate tool registration, keeping the latest");
        }
        self
    }

    pub fn build(self) -> ToolRegistry {
        ToolRegistry { tools: self.tools }
    }
}
