//! Operator approval of model-requested tool calls.

use crate::backends::ToolProvider;
use crate::console::Console;
use crate::conversation::ConversationHistory;
use crate::error::ToolCallError;
use mcp_client::{CallToolResult, JsonObject, RawContent};
use openai_client::ToolCall;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Tool message content recorded when the operator refuses a call.
pub const REFUSAL_MESSAGE: &str = "The tool call request was refused by the user.";

/// Asks the operator about each tool call and records the outcome.
pub struct ToolCallGate<'a, P, C> {
    provider: &'a mut P,
    console: &'a mut C,
}

impl<'a, P: ToolProvider, C: Console> ToolCallGate<'a, P, C> {
    pub fn new(provider: &'a mut P, console: &'a mut C) -> Self {
        Self { provider, console }
    }

    /// Handle every call in order, appending one tool message per call.
    ///
    /// Stops at the first failure; calls after it are neither prompted for
    /// nor recorded.
    pub async fn process(
        &mut self,
        calls: &[ToolCall],
        history: &mut ConversationHistory,
    ) -> Result<(), ToolCallError> {
        for call in calls {
            let content = self.handle(call).await?;
            history.append_tool_result(&call.id, content)?;
        }
        Ok(())
    }

    #[instrument(skip(self, call), fields(id = %call.id, tool = %call.function.name))]
    async fn handle(&mut self, call: &ToolCall) -> Result<String, ToolCallError> {
        let name = &call.function.name;
        let arguments = parse_arguments(name, &call.function.arguments)?;

        let shown = arguments.clone().map_or(Value::Null, Value::Object);
        let prompt = format!("Allow tool call {} with arguments {}? (y/n) ", name, shown);
        let answer = self.console.read_line(&prompt)?;

        if !is_approval(answer.as_deref()) {
            info!("Tool call refused");
            return Ok(REFUSAL_MESSAGE.to_string());
        }

        info!("Tool call approved");
        let result = self.provider.call_tool(name, arguments).await?;
        result_text(name, result)
    }
}

/// Only a lone `y` or `Y` approves; end of input refuses.
fn is_approval(answer: Option<&str>) -> bool {
    answer.map_or(false, |a| a.eq_ignore_ascii_case("y"))
}

/// A JSON object becomes the call arguments; `null` means no arguments.
fn parse_arguments(tool: &str, raw: &str) -> Result<Option<JsonObject>, ToolCallError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|source| ToolCallError::InvalidArguments {
            tool: tool.to_string(),
            source,
        })?;

    match value {
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        _ => Err(ToolCallError::ArgumentsNotObject(tool.to_string())),
    }
}

fn result_text(tool: &str, result: CallToolResult) -> Result<String, ToolCallError> {
    if result.is_error == Some(true) {
        warn!(tool = %tool, "Tool reported an error; passing its text to the model");
    }
    if result.content.len() > 1 {
        debug!(tool = %tool, items = result.content.len(), "Using first content item only");
    }

    let first = result
        .content
        .into_iter()
        .next()
        .ok_or_else(|| ToolCallError::EmptyResult(tool.to_string()))?;

    let kind = match first.raw {
        RawContent::Text(content) => return Ok(content.text),
        RawContent::Image(_) => "image",
        RawContent::Resource(_) => "resource",
        _ => "other",
    };
    Err(ToolCallError::NonTextContent {
        tool: tool.to_string(),
        kind,
    })
}
