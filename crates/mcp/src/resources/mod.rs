// Read-only context resources served next to the tools

pub mod post_meta;

pub use post_meta::PostMetaResource;

use agora_core::{ToolError, ToolResult};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Query parameters of a resource request.
pub type ResourceParams = HashMap<String, String>;

/// A named JSON context blob
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    fn name(&self) -> &str;

    async fn read(&self, params: &ResourceParams) -> ToolResult;
}

/// Immutable set of resources, built once at startup.
#[derive(Default)]
pub struct ResourceRegistry {
    resources: BTreeMap<String, Arc<dyn Resource>>,
}

impl ResourceRegistry {
    pub fn new(resources: Vec<Arc<dyn Resource>>) -> Self {
        Self {
            resources: resources
                .into_iter()
                .map(|r| (r.name().to_string(), r))
                .collect(),
        }
    }

    /// Registry with the built-in resources
    pub fn with_default_resources() -> Self {
        Self::new(vec![Arc::new(PostMetaResource)])
    }

    pub fn names(&self) -> Vec<String> {
        self.resources.keys().cloned().collect()
    }

    pub async fn read(&self, name: &str, params: &ResourceParams) -> ToolResult {
        let resource = self
            .resources
            .get(name)
            .ok_or_else(|| ToolError::NotFound(format!("Resource '{}' not found", name)))?;
        resource.read(params).await
    }
}
