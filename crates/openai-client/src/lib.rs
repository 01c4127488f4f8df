//! Client for OpenAI-compatible chat completion APIs with tool calling.

mod client;
mod error;
mod types;

pub use client::OpenAiClient;
pub use error::OpenAiError;
pub use types::*;
