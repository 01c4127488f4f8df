//! Common test utilities for integration tests.

use async_trait::async_trait;
use mcp_chat::{Config, Console, ToolProvider};
use mcp_client::{CallToolResult, Content, JsonObject, McpError, Tool};
use openai_client::OpenAiClient;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::io;
use wiremock::MockServer;

/// Console replaying answers and recording prompts and output in order.
#[derive(Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            transcript: Vec::new(),
        }
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.transcript.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }

    fn print_line(&mut self, text: &str) -> io::Result<()> {
        self.transcript.push(text.to_string());
        Ok(())
    }
}

/// Tool server that lists fixed tools and answers calls from a script.
#[derive(Default)]
pub struct WeatherServer {
    pub tools: Vec<Tool>,
    pub replies: VecDeque<CallToolResult>,
    pub calls: Vec<(String, Option<JsonObject>)>,
    pub initialized: bool,
}

impl WeatherServer {
    /// One `get_weather` tool answering every call with `reply`.
    pub fn answering(reply: &str) -> Self {
        let tool = serde_json::from_value(json!({
            "name": "get_weather",
            "description": "\n  Get the current weather for a city.\n",
            "inputSchema": {
                "type": "object",
                "properties": {"city": {"type": "string"}},
                "required": ["city"]
            }
        }))
        .unwrap();

        Self {
            tools: vec![tool],
            replies: VecDeque::from([CallToolResult::success(vec![Content::text(reply)])]),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ToolProvider for WeatherServer {
    async fn initialize(&mut self) -> Result<(), McpError> {
        self.initialized = true;
        Ok(())
    }

    async fn list_tools(&mut self) -> Result<Vec<Tool>, McpError> {
        Ok(self.tools.clone())
    }

    async fn call_tool(
        &mut self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        self.calls.push((name.to_string(), arguments));
        self.replies.pop_front().ok_or(McpError::NotInitialized)
    }
}

/// Chat client pointing at the mock chat server.
pub fn chat_client(chat_server: &MockServer) -> OpenAiClient {
    OpenAiClient::new(
        "test-api-key",
        chat_server.uri(),
        mcp_chat::config::MODEL,
        Some(std::time::Duration::from_secs(5)),
    )
    .unwrap()
}

/// Configuration pointing at `mcp_server_url` and the mock chat server.
pub fn test_config(mcp_server_url: &str, chat_server: &MockServer) -> Config {
    let vars: HashMap<String, String> = [
        ("MCP_SERVER_URL", mcp_server_url.to_string()),
        ("OPENAI_API_KEY", "test-api-key".to_string()),
        ("OPENAI_BASE_URL", chat_server.uri()),
        ("OPENAI_TIMEOUT", "5s".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    Config::from_vars(vars).unwrap()
}

/// A chat completion response with a single choice.
pub fn completion(message: Value, finish_reason: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1677652288,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": message,
            "finish_reason": finish_reason
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}
