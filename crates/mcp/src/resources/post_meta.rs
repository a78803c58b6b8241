// Post metadata resource

use crate::resources::{Resource, ResourceParams};
use agora_core::{ToolError, ToolResult};

/// Related metadata for a post (tags, author)
pub struct PostMetaResource;

#[async_trait::async_trait]
impl Resource for PostMetaResource {
    fn name(&self) -> &str {
        "post_meta"
    }

    async fn read(&self, params: &ResourceParams) -> ToolResult {
        let raw = params
            .get("post_id")
            .ok_or_else(|| ToolError::InvalidInput("post_id is required".to_string()))?;
        let post_id: i64 = raw
            .trim()
            .parse()
            .map_err(|_| ToolError::InvalidInput(format!("Invalid post_id: {}", raw)))?;

        Ok(serde_json::json!({
            "post_id": post_id,
            "related_tags": ["platform", "devops"],
            "author_id": 12
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ResourceParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_post_meta() {
        let value = PostMetaResource
            .read(&params(&[("post_id", "7")]))
            .await
            .unwrap();

        assert_eq!(value["post_id"], 7);
        assert_eq!(value["related_tags"], serde_json::json!(["platform", "devops"]));
    }

    #[tokio::test]
    async fn test_post_meta_validates_post_id() {
        let missing = PostMetaResource.read(&params(&[])).await.unwrap_err();
        assert_eq!(missing.status_code(), 400);

        let bad = PostMetaResource
            .read(&params(&[("post_id", "seven")]))
            .await
            .unwrap_err();
        assert!(matches!(bad, ToolError::InvalidInput(ref m) if m == "Invalid post_id: seven"));
    }
}
