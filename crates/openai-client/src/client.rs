//! Chat completions HTTP client.

use crate::error::OpenAiError;
use crate::types::*;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Tool choice sent whenever tools are offered.
const TOOL_CHOICE_AUTO: &str = "auto";

/// OpenAI-compatible chat completions client.
///
/// The API key is stored using `SecretString` to prevent accidental
/// exposure in logs or debug output.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

impl OpenAiClient {
    /// Create a new client. `timeout` of `None` leaves requests unbounded.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, OpenAiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: SecretString::new(api_key.into()),
            model: model.into(),
        })
    }

    /// Send a chat completion request offering `tools` with automatic tool
    /// choice, and return the first choice as an [`AssistantTurn`].
    ///
    /// When `tools` is empty neither `tools` nor `tool_choice` is sent; the
    /// API rejects a tool choice without tools.
    #[instrument(skip(self, messages, tools), fields(message_count = messages.len(), tool_count = tools.len()))]
    pub async fn chat_with_tools(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        temperature: Option<f32>,
    ) -> Result<AssistantTurn, OpenAiError> {
        let offer_tools = !tools.is_empty();
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature,
            tools: offer_tools.then_some(tools),
            tool_choice: offer_tools.then_some(TOOL_CHOICE_AUTO),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let chat_response = self.handle_response::<ChatResponse>(response).await?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or(OpenAiError::EmptyResponse)?;

        debug!(
            finish_reason = ?choice.finish_reason,
            tool_calls = choice.message.tool_calls.as_ref().map_or(0, Vec::len),
            "Received assistant turn"
        );

        Ok(AssistantTurn {
            message: choice.message.into_message(),
            finish_reason: choice.finish_reason,
            usage: chat_response.usage,
        })
    }

    /// Handle HTTP response, converting errors appropriately.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, OpenAiError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            debug!("Response body: {}", truncate(&body, 200));
            serde_json::from_str(&body).map_err(OpenAiError::from)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract error information from failed response.
    async fn extract_error(&self, response: reqwest::Response) -> OpenAiError {
        let status = response.status();

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Rate limit exceeded");
                OpenAiError::RateLimit
            }
            StatusCode::UNAUTHORIZED => {
                warn!("Authentication failed");
                OpenAiError::Unauthorized
            }
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".into());
                OpenAiError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}

/// Cut `text` to at most `max` bytes on a char boundary.
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
