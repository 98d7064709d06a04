use std::sync::{Arc, Mutex};
use tour_sales_assistant::error::{LlmError, LlmResult};
use tour_sales_assistant::repositories::LanguageModel;

/// Mock language model that records prompts and returns a canned answer.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockLanguageModel {
    answer: Arc<Mutex<Option<String>>>,
    prompts: Arc<Mutex<Vec<(String, String)>>>,
}

#[allow(dead_code)]
impl MockLanguageModel {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Arc::new(Mutex::new(Some(answer.to_string()))),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A model without an API key.
    pub fn without_key() -> Self {
        Self {
            answer: Arc::new(Mutex::new(None)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every `(system, prompt)` pair received, in call order.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().map(|(_, p)| p.clone())
    }
}

impl LanguageModel for MockLanguageModel {
    fn complete(&self, system: &str, prompt: &str) -> LlmResult<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));
        self.answer
            .lock()
            .unwrap()
            .clone()
            .ok_or(LlmError::MissingApiKey)
    }
}
