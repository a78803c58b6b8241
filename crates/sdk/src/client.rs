//! Main client for the MCP server.

use crate::config::{parse_base_url, ClientConfig, DEFAULT_TIMEOUT};
use crate::error::{McpClientError, McpClientResult};
use crate::transport::{HttpTransport, Operation};
use agora_core::ToolSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Client for the MCP tool server.
///
/// Cheap to clone; clones share the pooled connection.
#[derive(Debug, Clone)]
pub struct McpClient {
    http: Arc<HttpTransport>,
}

/// `GET /mcp/tools` answers with either shape.
#[derive(Deserialize)]
#[serde(untagged)]
enum ToolListing {
    Wrapped { tools: Vec<ToolSchema> },
    Bare(Vec<ToolSchema>),
}

impl McpClient {
    /// Create a new client builder.
    pub fn builder() -> McpClientBuilder {
        McpClientBuilder::new()
    }

    /// Client configured from `MCP_SERVER_URL` / `MCP_HTTP_TIMEOUT`.
    pub fn from_env() -> McpClientResult<Self> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            http: Arc::new(HttpTransport::new(Arc::new(config))),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// Discover the tools the server exposes.
    pub async fn list_tools(&self) -> McpClientResult<Vec<ToolSchema>> {
        let listing: ToolListing = self.http.get(Operation::ListTools, "/mcp/tools").await?;
        Ok(match listing {
            ToolListing::Wrapped { tools } | ToolListing::Bare(tools) => tools,
        })
    }

    /// Fetch a named resource with query parameters.
    pub async fn get_resource<Q: Serialize + ?Sized>(
        &self,
        name: &str,
        params: &Q,
    ) -> McpClientResult<serde_json::Value> {
        self.http
            .get_with_query(
                Operation::Resource(name),
                &format!("/mcp/resources/{}", name),
                params,
            )
            .await
    }

    /// Invoke a tool and return its JSON result.
    pub async fn invoke_tool<B: Serialize + ?Sized>(
        &self,
        name: &str,
        payload: &B,
    ) -> McpClientResult<serde_json::Value> {
        self.invoke_tool_as(name, payload).await
    }

    /// Invoke a tool and decode its result into `T`.
    pub async fn invoke_tool_as<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        name: &str,
        payload: &B,
    ) -> McpClientResult<T> {
        self.http
            .post(
                Operation::Tool(name),
                &format!("/mcp/tools/{}/invoke", name),
                payload,
            )
            .await
    }

    /// Discard the pooled connection; the next call opens a new one.
    pub fn reset(&self) {
        self.http.reset();
    }

    /// Whether a pooled connection has been created.
    pub fn is_connected(&self) -> bool {
        self.http.is_connected()
    }
}

/// Builder for creating an McpClient.
pub struct McpClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
}

impl McpClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL of the MCP server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> McpClientResult<McpClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| McpClientError::Config("base_url is required".to_string()))?;

        Ok(McpClient::from_config(ClientConfig {
            base_url: parse_base_url(&base_url)?,
            timeout: self.timeout,
        }))
    }
}

impl Default for McpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::SentimentResult;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> McpClient {
        McpClient::builder()
            .base_url(server.uri())
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    fn tool_json(name: &str) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "description": format!("{} tool", name),
            "inputSchema": { "type": "object", "properties": {}, "required": [] }
        })
    }

    #[tokio::test]
    async fn test_list_tools_wrapped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mcp/tools"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tools": [tool_json("chat"), tool_json("summarize")]
            })))
            .mount(&server)
            .await;

        let tools = client(&server).list_tools().await.unwrap();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["chat", "summarize"]);
    }

    #[tokio::test]
    async fn test_list_tools_bare_array() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mcp/tools"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([tool_json("chat")])),
            )
            .mount(&server)
            .await;

        let tools = client(&server).list_tools().await.unwrap();
        assert_eq!(tools.len(), 1);
    }

    #[tokio::test]
    async fn test_list_tools_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mcp/tools"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server).list_tools().await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.message(), "MCP tools listing failed with 500");
    }

    #[tokio::test]
    async fn test_get_resource() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mcp/resources/post_meta"))
            .and(query_param("post_id", "9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "post_id": 9, "related_tags": ["platform"], "author_id": 12
            })))
            .mount(&server)
            .await;

        let blob = client(&server)
            .get_resource("post_meta", &[("post_id", 9)])
            .await
            .unwrap();
        assert_eq!(blob["author_id"], 12);
    }

    #[tokio::test]
    async fn test_get_resource_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mcp/resources/nope"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "detail": "Resource 'nope' not found" })),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .get_resource("nope", &[("x", "y")])
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert!(err.message().starts_with("MCP resource 'nope' failed with 404"));
        assert_eq!(err.detail(), "Resource 'nope' not found");
    }

    #[tokio::test]
    async fn test_invoke_tool() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/mcp/tools/summarize/invoke"))
            .and(body_json(serde_json::json!({ "text": "long text" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "summary": "short" })),
            )
            .mount(&server)
            .await;

        let result = client(&server)
            .invoke_tool("summarize", &serde_json::json!({ "text": "long text" }))
            .await
            .unwrap();
        assert_eq!(result["summary"], "short");
    }

    #[tokio::test]
    async fn test_invoke_tool_422_carries_status_and_detail() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/mcp/tools/summarize/invoke"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(serde_json::json!({ "detail": "text is required" })),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .invoke_tool("summarize", &serde_json::json!({}))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(422));
        let message = err.message();
        assert!(message.contains("422"));
        assert!(message.contains("text is required"));
        assert!(message.starts_with("MCP tool 'summarize' failed with 422: "));
        assert_eq!(err.detail(), "text is required");
    }

    #[tokio::test]
    async fn test_transport_failure_has_no_status() {
        // Nothing listens on the discard port
        let client = McpClient::builder()
            .base_url("http://127.0.0.1:9")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        let err = client
            .invoke_tool("chat", &serde_json::json!({ "message": "hi" }))
            .await
            .unwrap_err();

        assert!(matches!(err, McpClientError::Transport { .. }));
        assert_eq!(err.status_code(), None);
        assert!(err.message().starts_with("MCP tool 'chat' request failed: "));
        assert!(err.is_server_side());
    }

    #[tokio::test]
    async fn test_typed_sentiment_is_deterministic() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/mcp/tools/sentiment/invoke"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sentiment": "Positive", "reason": "upbeat", "confidence": 0.8
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = client(&server);
        let payload = serde_json::json!({ "text": "X" });
        let first: SentimentResult = client.invoke_tool_as("sentiment", &payload).await.unwrap();
        let second: SentimentResult = client.invoke_tool_as("sentiment", &payload).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.confidence, Some(0.8));
    }

    #[tokio::test]
    async fn test_clones_share_pool_and_reset() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mcp/tools"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "tools": [] })))
            .mount(&server)
            .await;

        let client = client(&server);
        let clone = client.clone();
        assert!(!clone.is_connected());

        client.list_tools().await.unwrap();
        assert!(clone.is_connected());

        clone.reset();
        assert!(!client.is_connected());
    }

    #[test]
    fn test_builder_requires_base_url() {
        assert!(matches!(
            McpClient::builder().build(),
            Err(McpClientError::Config(_))
        ));
    }
}
