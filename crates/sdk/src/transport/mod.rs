//! Transport layer for the MCP client.

pub mod http;

pub use http::{HttpTransport, Operation};
