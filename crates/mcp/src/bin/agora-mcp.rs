// Standalone MCP tool server binary

use agora_mcp::config::McpServerConfig;
use agora_mcp::resources::ResourceRegistry;
use agora_mcp::{McpServer, ToolRegistry};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "agora-mcp")]
#[command(about = "LLM tool server for the Agora social backend", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "agora-mcp.toml")]
    config: PathBuf,

    /// Port to listen on
    #[arg(short, long, env = "MCP_PORT", default_value = "9000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agora_mcp=info,tower_http=debug".into()),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    tracing::info!("Agora MCP server starting...");

    let config = McpServerConfig::load(&args.config)?;
    let provider = Arc::new(config.llm.build_provider()?);
    tracing::info!(model = %config.llm.model, base_url = %config.llm.base_url, "Completion provider configured");

    let tools = ToolRegistry::with_default_tools(provider);
    tracing::info!("Registered {} tools: {}", tools.len(), tools.names().join(", "));

    let server = McpServer::new(tools, ResourceRegistry::with_default_resources());
    server.serve(&format!("{}:{}", args.host, args.port)).await?;

    Ok(())
}
