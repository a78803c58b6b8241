//! HTTP transport layer for the MCP client.

use crate::config::ClientConfig;
use crate::error::{McpClientError, McpClientResult};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// The MCP operation a request belongs to; used to word errors.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    ListTools,
    Resource(&'a str),
    Tool(&'a str),
}

impl fmt::Display for Operation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListTools => write!(f, "MCP tools listing"),
            Self::Resource(name) => write!(f, "MCP resource '{}'", name),
            Self::Tool(name) => write!(f, "MCP tool '{}'", name),
        }
    }
}

/// HTTP transport holding one lazily created, pooled `reqwest::Client`.
#[derive(Debug)]
pub struct HttpTransport {
    config: Arc<ClientConfig>,
    client: RwLock<Option<Client>>,
}

impl HttpTransport {
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self {
            config,
            client: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The shared client, created on first use.
    fn client(&self) -> McpClientResult<Client> {
        if let Some(client) = self.client.read().unwrap_or_else(|e| e.into_inner()).as_ref() {
            return Ok(client.clone());
        }

        let mut slot = self.client.write().unwrap_or_else(|e| e.into_inner());
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let client = Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| McpClientError::Config(format!("Failed to build HTTP client: {}", e)))?;
        debug!(timeout_ms = self.config.timeout.as_millis() as u64, "Created pooled HTTP client");

        *slot = Some(client.clone());
        Ok(client)
    }

    /// Drop the pooled client; the next request creates a fresh one.
    pub fn reset(&self) {
        let mut slot = self.client.write().unwrap_or_else(|e| e.into_inner());
        if slot.take().is_some() {
            debug!("Discarded pooled HTTP client");
        }
    }

    /// Whether a pooled client currently exists.
    pub fn is_connected(&self) -> bool {
        self.client
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Send once and decode a JSON body. No retries.
    async fn execute<T: DeserializeOwned>(
        &self,
        op: Operation<'_>,
        request: RequestBuilder,
    ) -> McpClientResult<T> {
        let response = request.send().await.map_err(|e| {
            warn!(operation = %op, error = %e, "MCP request failed");
            McpClientError::Transport {
                message: format!("{} request failed: {}", op, e),
                source: e,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(operation = %op, status = status.as_u16(), "MCP server returned an error");

            let message = if body.is_empty() {
                format!("{} failed with {}", op, status.as_u16())
            } else {
                format!("{} failed with {}: {}", op, status.as_u16(), body)
            };
            return Err(McpClientError::Status {
                message,
                status: status.as_u16(),
                body,
            });
        }

        // A timeout or dropped connection mid-body is still a transport failure
        let body = response.bytes().await.map_err(|e| {
            warn!(operation = %op, error = %e, "MCP response body could not be read");
            McpClientError::Transport {
                message: format!("{} request failed: {}", op, e),
                source: e,
            }
        })?;

        serde_json::from_slice(&body).map_err(|e| McpClientError::InvalidResponse {
            message: format!("{} returned an invalid response: {}", op, e),
        })
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, op: Operation<'_>, path: &str) -> McpClientResult<T> {
        let url = self.config.url_for(path)?;
        debug!(url = %url, "GET request");

        let request = self.client()?.get(url);
        self.execute(op, request).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        op: Operation<'_>,
        path: &str,
        query: &Q,
    ) -> McpClientResult<T> {
        let url = self.config.url_for(path)?;
        debug!(url = %url, "GET request with query");

        let request = self.client()?.get(url).query(query);
        self.execute(op, request).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        op: Operation<'_>,
        path: &str,
        body: &B,
    ) -> McpClientResult<T> {
        let url = self.config.url_for(path)?;
        debug!(url = %url, "POST request");

        let request = self.client()?.post(url).json(body);
        self.execute(op, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestResponse {
        message: String,
    }

    fn create_transport(base_url: &str) -> HttpTransport {
        HttpTransport::new(Arc::new(ClientConfig {
            base_url: url::Url::parse(base_url).unwrap(),
            timeout: Duration::from_secs(5),
        }))
    }

    #[tokio::test]
    async fn test_get_with_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mcp/resources/post_meta"))
            .and(query_param("post_id", "4"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "ok" })),
            )
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());
        let result: TestResponse = transport
            .get_with_query(
                Operation::Resource("post_meta"),
                "/mcp/resources/post_meta",
                &[("post_id", "4")],
            )
            .await
            .unwrap();

        assert_eq!(result.message, "ok");
    }

    #[tokio::test]
    async fn test_post_json() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/mcp/tools/chat/invoke"))
            .and(body_json(serde_json::json!({ "message": "hello" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "hi" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());
        let result: TestResponse = transport
            .post(
                Operation::Tool("chat"),
                "/mcp/tools/chat/invoke",
                &serde_json::json!({ "message": "hello" }),
            )
            .await
            .unwrap();

        assert_eq!(result.message, "hi");
    }

    #[tokio::test]
    async fn test_client_created_lazily_and_reset() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mcp/tools"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "ok" })),
            )
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());
        assert!(!transport.is_connected());

        let _: TestResponse = transport
            .get(Operation::ListTools, "/mcp/tools")
            .await
            .unwrap();
        assert!(transport.is_connected());

        transport.reset();
        assert!(!transport.is_connected());

        let _: TestResponse = transport
            .get(Operation::ListTools, "/mcp/tools")
            .await
            .unwrap();
        assert!(transport.is_connected());
    }

    #[tokio::test]
    async fn test_error_status_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/mcp/tools/chat/invoke"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());
        let result: McpClientResult<TestResponse> = transport
            .post(Operation::Tool("chat"), "/mcp/tools/chat/invoke", &serde_json::json!({}))
            .await;

        match result {
            Err(McpClientError::Status { status, message, .. }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "MCP tool 'chat' failed with 503");
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mcp/tools"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());
        let result: McpClientResult<TestResponse> =
            transport.get(Operation::ListTools, "/mcp/tools").await;

        let err = result.unwrap_err();
        assert!(matches!(err, McpClientError::InvalidResponse { .. }));
        assert!(err.message().starts_with("MCP tools listing returned an invalid response"));
    }

    #[tokio::test]
    async fn test_hung_server_is_transport_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mcp/tools"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "message": "late" }))
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(Arc::new(ClientConfig {
            base_url: url::Url::parse(&server.uri()).unwrap(),
            timeout: Duration::from_millis(200),
        }));
        let result: McpClientResult<TestResponse> =
            transport.get(Operation::ListTools, "/mcp/tools").await;

        let err = result.unwrap_err();
        assert!(matches!(err, McpClientError::Transport { .. }));
        assert_eq!(err.status_code(), None);
        assert!(err.message().starts_with("MCP tools listing request failed"));
    }

    #[test]
    fn test_operation_labels() {
        assert_eq!(Operation::ListTools.to_string(), "MCP tools listing");
        assert_eq!(Operation::Resource("post_meta").to_string(), "MCP resource 'post_meta'");
        assert_eq!(Operation::Tool("chat").to_string(), "MCP tool 'chat'");
    }
}
