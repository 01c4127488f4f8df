//! The two remote collaborators of a conversation.

use async_trait::async_trait;
use mcp_client::{CallToolResult, JsonObject, McpError, McpSession, Tool};
use openai_client::{AssistantTurn, Message, OpenAiClient, OpenAiError, ToolDefinition};

/// Deterministic sampling for tool use.
const TEMPERATURE: f32 = 0.0;

/// A session with a tool server.
#[async_trait]
pub trait ToolProvider: Send {
    async fn initialize(&mut self) -> Result<(), McpError>;

    async fn list_tools(&mut self) -> Result<Vec<Tool>, McpError>;

    async fn call_tool(
        &mut self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError>;
}

#[async_trait]
impl ToolProvider for McpSession {
    async fn initialize(&mut self) -> Result<(), McpError> {
        McpSession::initialize(self).await
    }

    async fn list_tools(&mut self) -> Result<Vec<Tool>, McpError> {
        McpSession::list_tools(self).await
    }

    async fn call_tool(
        &mut self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        McpSession::call_tool(self, name, arguments).await
    }
}

/// A chat-completion API that may answer with tool calls.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Complete `messages`, offering `tools` with automatic tool choice.
    async fn create_completion(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn, OpenAiError>;
}

#[async_trait]
impl ChatBackend for OpenAiClient {
    async fn create_completion(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn, OpenAiError> {
        self.chat_with_tools(messages, tools, Some(TEMPERATURE)).await
    }
}
