//! mcp-chat - Main entry point.

use anyhow::Context;
use mcp_chat::{AppError, Config, StdConsole};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load configuration
    let config = match Config::load().context("Failed to load configuration") {
        Ok(config) => config,
        Err(e) => {
            println!("{}", AppError::Config(e));
            return;
        }
    };

    // Initialize logging
    init_logging(&config.log_level);

    info!(server = %config.mcp_server_url, model = mcp_chat::config::MODEL, "Starting mcp-chat");

    let mut console = match StdConsole::new() {
        Ok(console) => console,
        Err(e) => {
            println!("{}", AppError::Console(e));
            return;
        }
    };
    if let Err(e) = mcp_chat::run(&config, &mut console).await {
        error!("Session ended with error: {}", e);
        println!("{}", e);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout belongs to the conversation
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
