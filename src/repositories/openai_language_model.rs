use crate::client::OpenAiClient;
use crate::error::LlmResult;
use crate::repositories::traits::LanguageModel;

/// Language model backed by an OpenAI-compatible chat completions API.
pub struct OpenAiLanguageModel {
    client: OpenAiClient,
}

impl OpenAiLanguageModel {
    /// Create a new OpenAiLanguageModel with the given client.
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }
}

impl LanguageModel for OpenAiLanguageModel {
    fn complete(&self, system: &str, prompt: &str) -> LlmResult<String> {
        self.client.chat(system, prompt)
    }
}
