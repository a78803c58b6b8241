//! # Agora SDK
//!
//! HTTP client for the Agora MCP tool server.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agora_sdk::{McpClient, McpClientResult};
//!
//! # async fn example() -> McpClientResult<()> {
//! // Reads MCP_SERVER_URL and MCP_HTTP_TIMEOUT
//! let client = McpClient::from_env()?;
//!
//! for tool in client.list_tools().await? {
//!     println!("{}: {}", tool.name, tool.description);
//! }
//!
//! let result = client
//!     .invoke_tool("sentiment", &serde_json::json!({ "text": "What a launch!" }))
//!     .await?;
//! println!("Sentiment: {}", result["sentiment"]);
//! # Ok(())
//! # }
//! ```
//!
//! Failures surface as [`McpClientError`]; nothing is retried. Use
//! [`McpClientError::detail`] to recover the server's `detail` message.

pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{McpClient, McpClientBuilder};
pub use config::ClientConfig;
pub use error::{extract_error_detail, McpClientError, McpClientResult};

// Re-export wire types for convenience
pub use agora_core::{SentimentResult, ToolSchema};
