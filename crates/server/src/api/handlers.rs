use super::{ApiError, ApiResult};
use crate::config::AppState;
use crate::enrichment::Enrichment;
use agora_core::ListToolsResult;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Delegate to the MCP `chat` tool and return its `{reply}` as-is.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<serde_json::Value>> {
    let Json(req) = body?;
    let result = state
        .mcp
        .invoke_tool("chat", &serde_json::json!({ "message": req.message }))
        .await?;

    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub context: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub content: String,
}

/// Draft a post from a short description.
pub async fn generate_post(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<GenerateResponse>> {
    let Json(req) = body?;
    let result = state
        .mcp
        .invoke_tool(
            "content_generation",
            &serde_json::json!({ "context": req.context }),
        )
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Post generation failed");
            ApiError::scraped(e)
        })?;

    let content = result
        .get("content")
        .and_then(|c| c.as_str())
        .ok_or_else(|| ApiError::bad_gateway("MCP content_generation returned no content"))?;

    Ok(Json(GenerateResponse {
        content: content.to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct EnrichRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Summary and sentiment label for a post, ready to store.
pub async fn enrich_post(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EnrichRequest>, JsonRejection>,
) -> ApiResult<Json<Enrichment>> {
    let Json(req) = body?;
    if req.title.trim().is_empty() && req.content.trim().is_empty() {
        return Err(ApiError::bad_request("title or content is required"));
    }

    let enrichment = state.enricher.enrich(&req.title, &req.content).await?;
    tracing::info!(
        sentiment = %enrichment.sentiment,
        sentiment_source = ?enrichment.sentiment_source,
        summary_source = ?enrichment.summary_source,
        "Post enriched"
    );

    Ok(Json(enrichment))
}

/// Proxy of the MCP server's tool listing.
pub async fn list_mcp_tools(State(state): State<Arc<AppState>>) -> ApiResult<Json<ListToolsResult>> {
    let tools = state.mcp.list_tools().await?;
    Ok(Json(ListToolsResult { tools }))
}
