//! Configuration types for the MCP client.

use crate::error::{McpClientError, McpClientResult};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable overriding the server URL.
pub const BASE_URL_ENV: &str = "MCP_SERVER_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "MCP_HTTP_TIMEOUT";

/// Configuration for the MCP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the MCP server.
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read `MCP_SERVER_URL` and `MCP_HTTP_TIMEOUT`, falling back to defaults.
    pub fn from_env() -> McpClientResult<Self> {
        Self::from_values(
            std::env::var(BASE_URL_ENV).ok().as_deref(),
            std::env::var(TIMEOUT_ENV).ok().as_deref(),
        )
    }

    pub(crate) fn from_values(base_url: Option<&str>, timeout: Option<&str>) -> McpClientResult<Self> {
        let base_url = parse_base_url(base_url.unwrap_or(DEFAULT_BASE_URL))?;

        let timeout = match timeout {
            Some(raw) => parse_timeout(raw)?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self { base_url, timeout })
    }

    /// Absolute URL for a server path such as `/mcp/tools`.
    ///
    /// The path is appended to the base URL, so a base with a path prefix
    /// keeps it.
    pub fn url_for(&self, path: &str) -> McpClientResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}{}", base, path))
            .map_err(|e| McpClientError::Config(format!("Invalid URL for {}: {}", path, e)))
    }
}

pub(crate) fn parse_base_url(raw: &str) -> McpClientResult<Url> {
    Url::parse(raw.trim())
        .map_err(|e| McpClientError::Config(format!("Invalid base URL '{}': {}", raw, e)))
}

fn parse_timeout(raw: &str) -> McpClientResult<Duration> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| McpClientError::Config(format!("Invalid timeout '{}'", raw)))?;

    if !secs.is_finite() || secs <= 0.0 {
        return Err(McpClientError::Config(format!(
            "Timeout must be positive, got '{}'",
            raw
        )));
    }

    Duration::try_from_secs_f64(secs)
        .map_err(|e| McpClientError::Config(format!("Invalid timeout '{}': {}", raw, e)))
}
