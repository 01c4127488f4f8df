//! Test doubles for the conversation collaborators.

use crate::backends::{ChatBackend, ToolProvider};
use crate::console::Console;
use async_trait::async_trait;
use mcp_client::{CallToolResult, Content, JsonObject, McpError, Tool};
use openai_client::{AssistantTurn, FinishReason, Message, OpenAiError, ToolCall, ToolDefinition};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

/// Provider double returning canned results and recording calls.
#[derive(Default)]
pub struct FakeProvider {
    pub tools: Vec<Tool>,
    pub results: VecDeque<Result<CallToolResult, McpError>>,
    pub calls: Vec<(String, Option<JsonObject>)>,
    pub initialized: bool,
}

impl FakeProvider {
    pub fn returning(results: Vec<Result<CallToolResult, McpError>>) -> Self {
        Self {
            results: results.into(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ToolProvider for FakeProvider {
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
        self.results.pop_front().expect("unexpected tool call")
    }
}

/// Console double replaying answers and recording everything shown.
#[derive(Default)]
pub struct ScriptedConsole {
    pub answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub printed: Vec<String>,
    /// Prompts and printed lines, interleaved in order.
    pub transcript: Vec<String>,
    /// Answer Ctrl-C instead of end of input once the answers run out.
    pub interrupt_when_done: bool,
}

impl ScriptedConsole {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn interrupted_after(answers: &[&str]) -> Self {
        Self {
            interrupt_when_done: true,
            ..Self::answering(answers)
        }
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        self.transcript.push(prompt.to_string());
        match self.answers.pop_front() {
            None if self.interrupt_when_done => {
                Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"))
            }
            answer => Ok(answer),
        }
    }

    fn print_line(&mut self, text: &str) -> io::Result<()> {
        self.printed.push(text.to_string());
        self.transcript.push(text.to_string());
        Ok(())
    }
}

/// Chat double replaying turns and recording each request's history.
#[derive(Default)]
pub struct ScriptedChat {
    turns: Mutex<VecDeque<Result<AssistantTurn, OpenAiError>>>,
    pub requests: Mutex<Vec<(Vec<Message>, Vec<ToolDefinition>)>>,
}

impl ScriptedChat {
    pub fn replying(turns: Vec<Result<AssistantTurn, OpenAiError>>) -> Self {
        Self {
            turns: Mutex::new(turns.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, index: usize) -> Vec<Message> {
        self.requests.lock().unwrap()[index].0.clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedChat {
    async fn create_completion(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn, OpenAiError> {
        self.requests
            .lock()
            .unwrap()
            .push((messages.to_vec(), tools.to_vec()));
        self.turns
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected completion request")
    }
}

pub fn text_result(text: &str) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

/// A tool descriptor as a server would list it.
pub fn tool(name: &str, description: &str, input_schema: Value) -> Tool {
    serde_json::from_value(json!({
        "name": name,
        "description": description,
        "inputSchema": input_schema,
    }))
    .unwrap()
}

pub fn answer(text: &str) -> AssistantTurn {
    AssistantTurn {
        message: Message::assistant(text),
        finish_reason: Some(FinishReason::Stop),
        usage: None,
    }
}

pub fn tool_request(calls: Vec<ToolCall>) -> AssistantTurn {
    AssistantTurn {
        message: Message::assistant_with_tool_calls(None, calls),
        finish_reason: Some(FinishReason::ToolCalls),
        usage: None,
    }
}
