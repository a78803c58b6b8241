// MCP HTTP server: tool discovery, tool invocation and resources

use crate::resources::{ResourceParams, ResourceRegistry};
use crate::tools::ToolRegistry;
use agora_core::{ErrorResponse, ListToolsResult, ToolError, ToolPayload};
use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};

/// State shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub tools: Arc<ToolRegistry>,
    pub resources: Arc<ResourceRegistry>,
}

pub struct McpServer {
    state: AppState,
}

impl McpServer {
    pub fn new(tools: ToolRegistry, resources: ResourceRegistry) -> Self {
        Self {
            state: AppState {
                tools: Arc::new(tools),
                resources: Arc::new(resources),
            },
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Bind and serve until the process is stopped
    pub async fn serve(&self, addr: &str) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("MCP server listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

/// Create the MCP router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/mcp/tools", get(list_tools))
        .route("/mcp/tools/{tool_name}/invoke", post(invoke_tool))
        .route("/mcp/resources/{name}", get(get_resource))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(false))
                .on_response(DefaultOnResponse::new()),
        )
        .with_state(Arc::new(state))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "agora-mcp",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn list_tools(State(state): State<Arc<AppState>>) -> Json<ListToolsResult> {
    Json(ListToolsResult {
        tools: state.tools.list_tools(),
    })
}

async fn invoke_tool(
    State(state): State<Arc<AppState>>,
    Path(tool_name): Path<String>,
    body: Bytes,
) -> ApiResult<Json<serde_json::Value>> {
    let payload = parse_payload(&body)?;
    let result = state.tools.invoke(&tool_name, &payload).await?;
    Ok(Json(result))
}

async fn get_resource(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<ResourceParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let blob = state.resources.read(&name, &params).await?;
    Ok(Json(blob))
}

/// Decode the request body; an empty body is an empty payload.
fn parse_payload(body: &[u8]) -> Result<ToolPayload, ToolError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ToolPayload::new());
    }

    match serde_json::from_slice(body) {
        Ok(serde_json::Value::Object(payload)) => Ok(payload),
        Ok(serde_json::Value::Null) => Ok(ToolPayload::new()),
        Ok(_) => Err(ToolError::InvalidInput(
            "Payload must be a JSON object".to_string(),
        )),
        Err(e) => Err(ToolError::InvalidInput(format!("Invalid JSON payload: {}", e))),
    }
}

/// Error type for MCP handlers
pub struct ApiError(ToolError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(ErrorResponse::new(self.0.to_string()))).into_response()
    }
}

impl From<ToolError> for ApiError {
    fn from(err: ToolError) -> Self {
        Self(err)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
