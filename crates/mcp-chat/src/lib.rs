//! Interactive chat assistant backed by one MCP tool server.
//!
//! The server's tools are offered to an OpenAI-compatible chat model; every
//! tool call the model requests is shown to the operator and runs only if
//! approved.

pub mod backends;
pub mod chat_loop;
pub mod config;
pub mod console;
pub mod conversation;
pub mod error;
pub mod gate;

#[cfg(test)]
mod testing;

pub use backends::{ChatBackend, ToolProvider};
pub use chat_loop::ConversationLoop;
pub use config::Config;
pub use console::{Console, StdConsole};
pub use conversation::ConversationHistory;
pub use error::{AppError, AppResult, ConversationError, ToolCallError};
pub use gate::ToolCallGate;

use mcp_client::{Implementation, McpSession};
use openai_client::OpenAiClient;
use tool_catalog::ToolCatalog;
use tracing::{info, warn};

/// Connect to the configured server, then converse until the operator quits.
pub async fn run<C: Console>(config: &Config, console: &mut C) -> AppResult<()> {
    let client_info = Implementation {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let mut session = McpSession::connect(&config.mcp_server_url, client_info)
        .await
        .map_err(AppError::Connection)?;

    let chat = OpenAiClient::new(
        config.openai_api_key.as_str(),
        config.openai_base_url.as_str(),
        config::MODEL,
        config.openai_timeout,
    )?;

    let result = converse(&config.mcp_server_url, &chat, &mut session, console).await;
    if let Err(e) = session.close().await {
        warn!("{}", e);
    }
    result
}

/// Initialize the provider, build the tool catalog and run the conversation.
pub async fn converse<B, P, C>(
    server_url: &str,
    chat: &B,
    provider: &mut P,
    console: &mut C,
) -> AppResult<()>
where
    B: ChatBackend,
    P: ToolProvider,
    C: Console,
{
    provider.initialize().await.map_err(AppError::Connection)?;
    console.print_line(&format!("Connected to server at {}", server_url))?;

    let tools = provider.list_tools().await.map_err(AppError::Connection)?;
    let catalog = ToolCatalog::from_descriptors(&tools)?;
    info!(tools = ?catalog.names(), "Tool catalog ready");

    ConversationLoop::new(chat, provider, console, &catalog)
        .run()
        .await
}
