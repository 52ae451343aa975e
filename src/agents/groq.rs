use color_eyre::Result;
use reqwest::blocking::Client;
use tracing::debug;

use crate::agents::openai_compat::{self, OpenAIChatRequest, OpenAIChatResponse};
use crate::agents::{CompletionRequest, LanguageModel};
use crate::config::ModelConfig;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Blocking client for Groq's OpenAI-compatible chat endpoint
pub struct GroqClient {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

impl GroqClient {
    /// Builds a client from the `[model]` config section.
    /// Fails when no API key is configured.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(color_eyre::eyre::eyre!(
                "Missing API key. Set GROQ_API_KEY in .env or the [model] section of the config file."
            ));
        }
        Ok(Self {
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client: openai_compat::build_client(config.timeout_secs)?,
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl LanguageModel for GroqClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let url = self.chat_url();
        debug!(model = %self.model, %url, "sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&OpenAIChatRequest::new(&self.model, request))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(color_eyre::eyre::eyre!(
                "Groq chat failed ({}): {}",
                status,
                body
            ));
        }

        let payload: OpenAIChatResponse = serde_json::from_str(&body)?;
        openai_compat::extract_reply(payload, "Groq")
    }
}
