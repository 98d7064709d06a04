//! OpenAI-compatible chat completions client.

use super::ApiClient;
use crate::error::{LlmError, LlmResult};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    api: ApiClient,
    model: String,
    has_key: bool,
}

impl OpenAiClient {
    /// Create a client. `api` must carry the API key as its bearer token.
    pub fn new(api: ApiClient, model: impl Into<String>, has_key: bool) -> Self {
        Self {
            api,
            model: model.into(),
            has_key,
        }
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a system and a user message and return the first choice's text.
    pub fn chat(&self, system: &str, user: &str) -> LlmResult<String> {
        if !self.has_key {
            return Err(LlmError::MissingApiKey);
        }

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        let response = self.api.post_json("/chat/completions", &body)?;
        let text = ApiClient::read_string(response)?;
        let completion: ChatCompletion =
            serde_json::from_str(&text).map_err(|e| LlmError::Request(e.into()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        tracing::debug!(model = %self.model, chars = content.chars().count(), "Chat completion received");
        Ok(content)
    }
}
