//! Shared types and helpers for OpenAI-compatible chat APIs (Groq and friends)

use color_eyre::Result;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::agents::{ChatMessage, CompletionRequest};

#[derive(Debug, Serialize)]
pub struct OpenAIChatRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OpenAIMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIChatResponse {
    pub choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIChoiceMessage,
}

/// The message inside a choice -- content may come back as null
#[derive(Debug, Deserialize)]
pub struct OpenAIChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl OpenAIChatRequest {
    pub fn new(model: &str, request: &CompletionRequest) -> Self {
        Self {
            model: model.to_string(),
            messages: convert_messages(&request.messages),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        }
    }
}

/// Converts internal `ChatMessage` list to OpenAI-compatible messages
pub fn convert_messages(messages: &[ChatMessage]) -> Vec<OpenAIMessage> {
    messages
        .iter()
        .map(|msg| OpenAIMessage {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        })
        .collect()
}

/// Extracts the assistant reply from an OpenAI-style response.
/// A null content field yields an empty string so callers can report it as an empty reply.
pub fn extract_reply(response: OpenAIChatResponse, provider: &str) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or_else(|| color_eyre::eyre::eyre!("{} response missing choices", provider))
}

/// Builds a `reqwest::blocking::Client` with standard timeouts
pub fn build_client(timeout_secs: u64) -> Result<Client> {
    Ok(Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}
