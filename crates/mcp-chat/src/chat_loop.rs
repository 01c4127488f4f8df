//! The question / answer loop.

use crate::backends::{ChatBackend, ToolProvider};
use crate::config::SYSTEM_PROMPT;
use crate::console::Console;
use crate::conversation::ConversationHistory;
use crate::error::{AppResult, ToolCallError};
use crate::gate::ToolCallGate;
use openai_client::Message;
use std::io;
use tool_catalog::ToolCatalog;
use tracing::{debug, info, instrument, warn};

/// Operator input that ends the session.
pub const QUIT_SENTINEL: &str = "q";

const QUESTION_PROMPT: &str = "Question: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingUser,
    AwaitingModel,
}

/// Drives one conversation: operator questions, model turns, and the
/// approval of every tool call in between.
pub struct ConversationLoop<'a, B, P, C> {
    chat: &'a B,
    provider: &'a mut P,
    console: &'a mut C,
    catalog: &'a ToolCatalog,
    history: ConversationHistory,
}

impl<'a, B, P, C> ConversationLoop<'a, B, P, C>
where
    B: ChatBackend,
    P: ToolProvider,
    C: Console,
{
    pub fn new(
        chat: &'a B,
        provider: &'a mut P,
        console: &'a mut C,
        catalog: &'a ToolCatalog,
    ) -> Self {
        Self {
            chat,
            provider,
            console,
            catalog,
            history: ConversationHistory::new(SYSTEM_PROMPT),
        }
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Run until the operator quits or an error occurs.
    pub async fn run(&mut self) -> AppResult<()> {
        let mut state = State::AwaitingUser;

        loop {
            state = match state {
                State::AwaitingUser => match self.ask_question()? {
                    Some(question) => {
                        self.history.push(Message::user(question));
                        State::AwaitingModel
                    }
                    None => break,
                },
                State::AwaitingModel => match self.model_turn().await {
                    Ok(next) => next,
                    Err(e) if e.is_interrupt() => {
                        debug!("Interrupted at the approval prompt");
                        break;
                    }
                    Err(e) => return Err(e),
                },
            };
        }

        info!(messages = self.history.len(), "Conversation ended");
        Ok(())
    }

    /// Read the next question. `None` when the operator quits or input ends.
    fn ask_question(&mut self) -> AppResult<Option<String>> {
        match self.console.read_line(QUESTION_PROMPT) {
            Ok(Some(line)) if line == QUIT_SENTINEL => Ok(None),
            Ok(Some(line)) => Ok(Some(line)),
            Ok(None) => {
                debug!("End of input");
                Ok(None)
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                debug!("Interrupted at the question prompt");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn model_turn(&mut self) -> AppResult<State> {
        let turn = self
            .chat
            .create_completion(self.history.messages(), self.catalog.definitions())
            .await?;

        if let Some(usage) = turn.usage {
            debug!(total_tokens = usage.total_tokens, "Completion usage");
        }

        let requests_tools = turn.requests_tools();
        let message = turn.message;
        if let Some(text) = message.text() {
            self.console.print_line(text)?;
        }

        if !requests_tools {
            self.history.push(message);
            return Ok(State::AwaitingUser);
        }

        let calls = message.tool_calls().to_vec();
        if calls.is_empty() {
            warn!("Model finished for tool calls but requested none");
            return Err(ToolCallError::NoToolCalls.into());
        }

        self.history.push(message);
        debug!(count = calls.len(), "Model requested tool calls");
        ToolCallGate::new(&mut *self.provider, &mut *self.console)
            .process(&calls, &mut self.history)
            .await?;

        Ok(State::AwaitingModel)
    }
}
