//! MCP client session over the SSE transport.

use crate::error::McpError;
use futures::future::BoxFuture;
use futures::FutureExt;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ClientCapabilities, ClientInfo, Implementation,
    JsonObject, ProtocolVersion, Tool,
};
use rmcp::service::RunningService;
use rmcp::transport::SseClientTransport;
use rmcp::{RoleClient, ServiceExt};
use std::mem;
use tracing::{debug, info, instrument};

type McpClient = RunningService<RoleClient, ClientInfo>;

type Handshake = BoxFuture<'static, Result<McpClient, McpError>>;

enum SessionState {
    /// Stream open, handshake not yet run.
    Connected(Handshake),
    Ready(McpClient),
    Failed,
}

/// A session with one MCP server.
///
/// `connect` opens the event stream; `initialize` runs the handshake. Tools
/// can only be listed or called once the session is initialized.
pub struct McpSession {
    server_url: String,
    state: SessionState,
}

impl McpSession {
    /// Open the event stream at `server_url`.
    #[instrument(skip(client_info))]
    pub async fn connect(server_url: &str, client_info: Implementation) -> Result<Self, McpError> {
        let transport = SseClientTransport::start(server_url.to_owned())
            .await
            .map_err(|e| McpError::Transport {
                url: server_url.to_owned(),
                message: e.to_string(),
            })?;
        info!("SSE stream open");

        let info = ClientInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ClientCapabilities::default(),
            client_info,
        };
        let handshake = async move {
            info.serve(transport)
                .await
                .map_err(|e| McpError::Initialize(e.to_string()))
        }
        .boxed();

        Ok(Self::with_handshake(server_url, handshake))
    }

    fn with_handshake(server_url: &str, handshake: Handshake) -> Self {
        Self {
            server_url: server_url.to_owned(),
            state: SessionState::Connected(handshake),
        }
    }

    /// Run the initialize handshake.
    #[instrument(skip(self))]
    pub async fn initialize(&mut self) -> Result<(), McpError> {
        let handshake = match mem::replace(&mut self.state, SessionState::Failed) {
            SessionState::Connected(handshake) => handshake,
            SessionState::Ready(client) => {
                self.state = SessionState::Ready(client);
                return Err(McpError::AlreadyInitialized);
            }
            SessionState::Failed => return Err(McpError::NotInitialized),
        };

        let client = handshake.await?;
        info!(peer = ?client.peer_info(), "MCP session initialized");
        self.state = SessionState::Ready(client);
        Ok(())
    }

    /// List every tool the server offers, across all pages.
    #[instrument(skip(self))]
    pub async fn list_tools(&mut self) -> Result<Vec<Tool>, McpError> {
        let tools = self.client()?.list_all_tools().await?;
        debug!("Server lists {} tools", tools.len());
        Ok(tools)
    }

    /// Invoke a tool by name.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &mut self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let params = CallToolRequestParam {
            name: name.to_owned().into(),
            arguments,
        };
        Ok(self.client()?.call_tool(params).await?)
    }

    /// Cancel the running service and wait for its transport to shut down.
    pub async fn close(self) -> Result<(), McpError> {
        match self.state {
            SessionState::Ready(client) => {
                let reason = client
                    .cancel()
                    .await
                    .map_err(|e| McpError::Shutdown(e.to_string()))?;
                debug!(?reason, server = %self.server_url, "MCP session closed");
            }
            // Dropping the pending handshake drops the transport.
            SessionState::Connected(_) | SessionState::Failed => {
                debug!(server = %self.server_url, "MCP session dropped before initialization");
            }
        }
        Ok(())
    }

    fn client(&self) -> Result<&McpClient, McpError> {
        match &self.state {
            SessionState::Ready(client) => Ok(client),
            _ => Err(McpError::NotInitialized),
        }
    }
}
