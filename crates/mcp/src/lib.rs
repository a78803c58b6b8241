// MCP (Model Context Protocol) tool server
// Exposes LLM-backed tools and read-only resources over HTTP

pub mod config;
pub mod resources;
pub mod server;
pub mod tools;

pub use server::{AppState, McpServer};
pub use tools::{Tool, ToolRegistry};
