//! Error taxonomy for tool invocation.

/// Result type for tool handlers and the dispatch layer.
pub type ToolResult<T = serde_json::Value> = Result<T, ToolError>;

/// Errors a tool invocation can end in.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Unknown tool or resource.
    #[error("{0}")]
    NotFound(String),

    /// Missing or empty required payload field.
    #[error("{0}")]
    InvalidInput(String),

    /// Input present but too vague to act on, or degenerate model output.
    #[error("{0}")]
    Unprocessable(String),

    /// The completion capability failed or returned nothing usable.
    #[error("{0}")]
    Upstream(String),

    /// Unexpected fault inside a handler.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidInput(_) => 400,
            Self::Unprocessable(_) => 422,
            Self::Upstream(_) | Self::Internal(_) => 500,
        }
    }

    /// Whether the caller caused this error (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::InvalidInput(_) | Self::Unprocessable(_)
        )
    }

    /// Reclassify a server-side failure so that it names the tool.
    ///
    /// Client errors pass through unchanged.
    pub fn for_tool(self, tool: &str) -> Self {
        if self.is_client_error() {
            return self;
        }
        Self::Upstream(format!("Tool '{}' failed: {}", tool, self))
    }
}
