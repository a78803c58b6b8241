//! Error types for the MCP client.

/// Result type for client operations.
pub type McpClientResult<T> = Result<T, McpClientError>;

/// Failure of a call to the MCP server.
///
/// Every variant carries a message naming the operation; `status_code` is
/// set only when the server answered with a non-2xx status.
#[derive(Debug, thiserror::Error)]
pub enum McpClientError {
    /// The server could not be reached (DNS, refused connection, timeout).
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status {
        message: String,
        status: u16,
        body: String,
    },

    /// A 2xx response whose body was not the expected JSON.
    #[error("{message}")]
    InvalidResponse { message: String },

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl McpClientError {
    /// Remote HTTP status, when the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether the failure lies with the server side or the network rather
    /// than with the request itself.
    ///
    /// Callers use this to decide whether a local fallback is appropriate.
    pub fn is_server_side(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::InvalidResponse { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Config(_) => false,
        }
    }

    /// The nested `detail` of the remote error body, or the full message.
    pub fn detail(&self) -> String {
        extract_error_detail(&self.message())
    }
}

/// Pull the `detail` field out of an error message that embeds a JSON body.
///
/// Messages look like `MCP tool 'x' failed with 422: {"detail": "msg"}`. The
/// text between the first `{` and the last `}` is parsed; when it has a string
/// `detail` that is returned, otherwise the input comes back unchanged.
pub fn extract_error_detail(raw: &str) -> String {
    let json = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => return raw.to_string(),
    };

    serde_json::from_str::<serde_json::Value>(json)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| raw.to_string())
}
