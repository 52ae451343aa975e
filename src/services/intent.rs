use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::agents::{ChatMessage, CompletionRequest, LanguageModel};
use crate::error::MeetError;

pub const GREETING_MESSAGE: &str = "Hello! How can I assist you? Try 'show me interactions with [name]' or 'what did I discuss with [name]' to retrieve an interaction.";

const INTENT_SYSTEM_PROMPT: &str = r#"Extract a person's name from a natural language query to retrieve past interactions. Always respond with valid JSON using double quotes: {"name": "person_name", "message": null} if a name is found, or {"name": null, "message": "response_text"} if no name is identified. Recognize queries like 'show me interactions with [name]' or 'what did I discuss with [name]'. For courtesy words like 'hi' or 'hello', return {"name": null, "message": "Hello! How can I assist you? Try 'show me interactions with [name]' or 'what did I discuss with [name]' to retrieve an interaction."}. For other queries without a name, return {"name": null, "message": null}. Examples: 'what did I discuss with John' -> {"name": "John", "message": null}, 'hello' -> {"name": null, "message": "Hello! How can I assist you? ..."}."#;

/// What a free-text query asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// A person name to look up
    Name(String),
    /// A direct reply to show, e.g. for a greeting
    Message(String),
    Empty,
}

/// Sampling limits for the extraction call
#[derive(Debug, Clone, Copy)]
pub struct ExtractionSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            max_tokens: 100,
        }
    }
}

/// Turns a query into an `Intent` with one language model call
pub struct IntentExtractor<M> {
    model: M,
    settings: ExtractionSettings,
}

impl<M: LanguageModel> IntentExtractor<M> {
    pub fn new(model: M, settings: ExtractionSettings) -> Self {
        Self { model, settings }
    }

    /// Errors cover a failed call, an empty reply and an unusable reply.
    /// Callers degrade every error to `Intent::Empty` after reporting it.
    pub fn extract(&self, query: &str) -> Result<Intent, MeetError> {
        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system(INTENT_SYSTEM_PROMPT),
                ChatMessage::user(query),
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let raw = self.model.complete(&request).map_err(|error| {
            warn!(%error, "intent model call failed");
            MeetError::ModelCall(format!("Error calling Groq API: {}", error))
        })?;
        debug!(reply = %raw, "intent model reply");

        parse_intent(&raw).inspect_err(|error| warn!(%error, "unusable intent reply"))
    }

    #[cfg(test)]
    pub(crate) fn model(&self) -> &M {
        &self.model
    }
}

/// Parses the model's JSON reply.
///
/// `name` wins when both fields are populated. Blank strings count as null.
fn parse_intent(raw: &str) -> Result<Intent, MeetError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MeetError::ModelCall(
            "Groq returned an empty response.".to_string(),
        ));
    }

    let value = parse_json_reply(trimmed).ok_or_else(|| {
        MeetError::ModelCall(format!(
            "Failed to parse Groq response as JSON: '{}'",
            trimmed
        ))
    })?;

    let invalid = || MeetError::ModelCall(format!("Parsed result invalid: {}", value));
    let object = value.as_object().ok_or_else(invalid)?;
    let name = object.get("name").ok_or_else(invalid)?;
    let name = text_field(name).ok_or_else(invalid)?;
    let message = object.get("message").and_then(text_field).flatten();

    Ok(match (name, message) {
        (Some(name), _) => Intent::Name(name),
        (None, Some(message)) => Intent::Message(message),
        (None, None) => Intent::Empty,
    })
}

/// Strict parse first, then the outermost `{...}` span for replies wrapped in prose or fences.
fn parse_json_reply(raw: &str) -> Option<JsonValue> {
    serde_json::from_str(raw).ok().or_else(|| {
        let object = extract_json_object(raw)?;
        serde_json::from_str(&object).ok()
    })
}

fn extract_json_object(value: &str) -> Option<String> {
    let start = value.find('{')?;
    let end = value.rfind('}')?;
    if end <= start {
        return None;
    }
    value.get(start..=end).map(str::to_string)
}

/// `Some(None)` for null or blank, `Some(Some(text))` for text, `None` for any other JSON type.
fn text_field(value: &JsonValue) -> Option<Option<String>> {
    match value {
        JsonValue::Null => Some(None),
        JsonValue::String(text) if text.trim().is_empty() => Some(None),
        JsonValue::String(text) => Some(Some(text.trim().to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::scripted::ScriptedModel;

    fn extract_with(model: ScriptedModel, query: &str) -> Result<Intent, MeetError> {
        IntentExtractor::new(model, ExtractionSettings::default()).extract(query)
    }

    #[test]
    fn test_name_reply() {
        let intent = extract_with(
            ScriptedModel::replying(r#"{"name": "John", "message": null}"#),
            "what did I discuss with John",
        );
        assert_eq!(intent, Ok(Intent::Name("John".to_string())));
    }

    #[test]
    fn test_greeting_reply() {
        let reply = format!(r#"{{"name": null, "message": "{}"}}"#, GREETING_MESSAGE);
        let intent = extract_with(ScriptedModel::replying(&reply), "hello");
        assert_eq!(intent, Ok(Intent::Message(GREETING_MESSAGE.to_string())));
    }

    #[test]
    fn test_neither_reply() {
        let intent = extract_with(
            ScriptedModel::replying(r#"{"name": null, "message": null}"#),
            "blah blah",
        );
        assert_eq!(intent, Ok(Intent::Empty));
    }

    #[test]
    fn test_name_wins_when_both_present() {
        let intent = extract_with(
            ScriptedModel::replying(r#"{"name": "Pritha", "message": "Here you go"}"#),
            "pritha?",
        );
        assert_eq!(intent, Ok(Intent::Name("Pritha".to_string())));
    }

    #[test]
    fn test_blank_name_falls_through_to_message() {
        let intent = extract_with(
            ScriptedModel::replying(r#"{"name": "  ", "message": "Try again"}"#),
            "hmm",
        );
        assert_eq!(intent, Ok(Intent::Message("Try again".to_string())));
    }

    #[test]
    fn test_missing_message_field_is_allowed() {
        let intent = extract_with(ScriptedModel::replying(r#"{"name": "Ana"}"#), "ana");
        assert_eq!(intent, Ok(Intent::Name("Ana".to_string())));
    }

    #[test]
    fn test_fenced_reply_is_recovered() {
        let reply = "```json\n{\"name\": \"John\", \"message\": null}\n```";
        let intent = extract_with(ScriptedModel::replying(reply), "john");
        assert_eq!(intent, Ok(Intent::Name("John".to_string())));
    }

    #[test]
    fn test_empty_reply_is_error() {
        let intent = extract_with(ScriptedModel::replying("   \n"), "john");
        assert!(matches!(intent, Err(MeetError::ModelCall(text)) if text.contains("empty")));
    }

    #[test]
    fn test_malformed_reply_is_error() {
        let intent = extract_with(ScriptedModel::replying("I think you mean John"), "john");
        assert!(matches!(intent, Err(MeetError::ModelCall(text)) if text.contains("parse")));
    }

    #[test]
    fn test_object_without_name_is_invalid() {
        for reply in [r#"{"message": "hi"}"#, r#"["John"]"#, r#"{"name": 42}"#] {
            let intent = extract_with(ScriptedModel::replying(reply), "john");
            assert!(
                matches!(&intent, Err(MeetError::ModelCall(text)) if text.contains("invalid")),
                "reply {reply} gave {intent:?}"
            );
        }
    }

    #[test]
    fn test_model_failure_is_error() {
        let intent = extract_with(ScriptedModel::failing("connection refused"), "john");
        assert!(
            matches!(intent, Err(MeetError::ModelCall(text)) if text.contains("connection refused"))
        );
    }

    #[test]
    fn test_request_is_single_turn_with_limits() {
        let model = ScriptedModel::replying(r#"{"name": null, "message": null}"#);
        let settings = ExtractionSettings {
            temperature: 0.1,
            max_tokens: 64,
        };
        let extractor = IntentExtractor::new(model, settings);
        assert!(extractor.extract("who?").is_ok());

        let seen = extractor.model.requests();
        let Some(request) = seen.first() else {
            panic!("model was not called");
        };
        assert_eq!(request.messages.len(), 2);
        assert_eq!(
            request.messages.first(),
            Some(&ChatMessage::system(INTENT_SYSTEM_PROMPT))
        );
        assert_eq!(request.messages.get(1), Some(&ChatMessage::user("who?")));
        assert_eq!(request.max_tokens, 64);
        assert!((request.temperature - 0.1).abs() < f32::EPSILON);
    }
}
