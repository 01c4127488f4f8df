//! MCP client errors.

use rmcp::service::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum McpError {
    /// The SSE stream could not be opened.
    #[error("Failed to open event stream at {url}: {message}")]
    Transport { url: String, message: String },

    /// The initialize handshake failed.
    #[error("Initialization failed: {0}")]
    Initialize(String),

    #[error("Session is not initialized")]
    NotInitialized,

    #[error("Session was already initialized")]
    AlreadyInitialized,

    /// A request failed after the session was established.
    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("Session shutdown failed: {0}")]
    Shutdown(String),
}
