pub mod groq;
#[path = "openai-compat.rs"]
pub mod openai_compat;
#[cfg(test)]
pub mod scripted;

use color_eyre::Result;

pub use groq::GroqClient;

/// A chat message for model communication
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

impl MessageRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// A single-turn completion request with sampling limits
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Anything that can answer a chat completion request
///
/// Implemented by `GroqClient` for the real API and by scripted doubles in tests.
pub trait LanguageModel {
    /// Returns the raw text content of the first completion choice
    fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
