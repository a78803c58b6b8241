// Core types and functionality shared by the Agora tool server, SDK and API

pub mod error;
pub mod llm;
pub mod sentiment;
pub mod text;
pub mod types;

pub use error::{ToolError, ToolResult};
pub use sentiment::parse_sentiment;
pub use types::*;
