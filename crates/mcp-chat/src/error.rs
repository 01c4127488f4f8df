//! Application error types.
//!
//! Every error ends the session; the `Display` of [`AppError`] is the line
//! reported to the operator.

use mcp_client::McpError;
use openai_client::OpenAiError;
use std::io;
use thiserror::Error;
use tool_catalog::CatalogError;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0:#}")]
    Config(#[from] anyhow::Error),

    #[error("Error connecting to server: {0}")]
    Connection(McpError),

    #[error("Error connecting to server: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Error calling OpenAI: {0}")]
    Chat(#[from] OpenAiError),

    #[error("Error calling tool: {0}")]
    ToolCall(#[from] ToolCallError),

    #[error("Console error: {0}")]
    Console(#[from] io::Error),
}

impl AppError {
    /// True when the operator interrupted a prompt with Ctrl-C.
    pub fn is_interrupt(&self) -> bool {
        let io_error = match self {
            AppError::Console(e) | AppError::ToolCall(ToolCallError::Console(e)) => e,
            _ => return false,
        };
        io_error.kind() == io::ErrorKind::Interrupted
    }
}

/// Failure while processing one model-requested tool call.
#[derive(Error, Debug)]
pub enum ToolCallError {
    #[error("Invalid arguments for '{tool}': {source}")]
    InvalidArguments {
        tool: String,
        source: serde_json::Error,
    },

    #[error("Model finished for tool calls but requested none")]
    NoToolCalls,

    #[error("Arguments for '{0}' are not a JSON object")]
    ArgumentsNotObject(String),

    #[error("{0}")]
    Provider(#[from] McpError),

    #[error("Tool '{0}' returned no content")]
    EmptyResult(String),

    #[error("Tool '{tool}' returned {kind} content, expected text")]
    NonTextContent { tool: String, kind: &'static str },

    #[error("{0}")]
    History(#[from] ConversationError),

    #[error("Console failed during approval: {0}")]
    Console(#[from] io::Error),
}

/// Violation of the conversation history invariants.
#[derive(Error, Debug, PartialEq)]
pub enum ConversationError {
    #[error("No pending tool call with id '{0}'")]
    UnknownToolCall(String),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
