//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Chat model used for every completion.
pub const MODEL: &str = "gpt-4o-mini";

/// First message of every conversation.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant with access to tools";

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// SSE URL of the MCP server
    pub mcp_server_url: String,

    /// OpenAI API key
    pub openai_api_key: String,

    /// API base URL
    #[serde(default = "default_openai_url")]
    pub openai_base_url: String,

    /// Request timeout for chat completions; unbounded when unset
    #[serde(default, with = "humantime_serde")]
    pub openai_timeout: Option<Duration>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_openai_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_source(None)
    }

    /// Load configuration from an explicit variable map instead of the
    /// process environment.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::from_source(Some(vars))
    }

    fn from_source(vars: Option<HashMap<String, String>>) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // API keys and URLs must stay strings.
                    .try_parsing(false)
                    .source(vars),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
