//! In-memory conversation history.

use crate::error::ConversationError;
use openai_client::{Message, Role};

/// Ordered, append-only message history of one session.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    /// Start a history holding only the system prompt.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// The most recent assistant message, if any.
    pub fn last_assistant(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.role == Role::Assistant)
    }

    /// Append a tool result. `tool_call_id` must name a tool call of the
    /// most recent assistant message.
    pub fn append_tool_result(
        &mut self,
        tool_call_id: &str,
        content: impl Into<String>,
    ) -> Result<(), ConversationError> {
        let pending = self
            .last_assistant()
            .map(|m| m.tool_calls().iter().any(|c| c.id == tool_call_id))
            .unwrap_or(false);

        if !pending {
            return Err(ConversationError::UnknownToolCall(tool_call_id.to_string()));
        }

        self.messages.push(Message::tool_result(tool_call_id, content));
        Ok(())
    }
}
