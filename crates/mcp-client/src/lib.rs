//! Model Context Protocol client over the SSE transport.
//!
//! A thin session wrapper around the `rmcp` client: connect, initialize,
//! list tools, call tools, close.

mod error;
mod session;

pub use error::McpError;
pub use session::McpSession;

pub use rmcp::model::{CallToolResult, Content, Implementation, JsonObject, RawContent, Tool};
