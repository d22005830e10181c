use super::GenerationService;
use crate::models::{GenerationOutcome, SourceImage};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum CannedResponse {
    Image(Vec<u8>),
    Text(String),
    ApiError(String),
    NoOutput,
}

/// Scripted [`GenerationService`] for tests: queued responses are replayed
/// in order and cycle once exhausted.
#[derive(Clone)]
pub struct MockGenerationClient {
    responses: Arc<Mutex<Vec<CannedResponse>>>,
    call_count: Arc<Mutex<usize>>,
    last_prompt: Arc<Mutex<Option<String>>>,
    last_had_image: Arc<Mutex<bool>>,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
            last_had_image: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_image_response(self, bytes: Vec<u8>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(CannedResponse::Image(bytes));
        self
    }

    pub fn with_text_response(self, text: String) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(CannedResponse::Text(text));
        self
    }

    pub fn with_api_error(self, message: String) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(CannedResponse::ApiError(message));
        self
    }

    pub fn with_empty_response(self) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(CannedResponse::NoOutput);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    pub fn last_had_image(&self) -> bool {
        *self.last_had_image.lock().unwrap()
    }
}

impl Default for MockGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationService for MockGenerationClient {
    async fn generate(
        &self,
        prompt: &str,
        source: Option<&SourceImage>,
    ) -> Result<GenerationOutcome> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        *self.last_had_image.lock().unwrap() = source.is_some();

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            return Ok(GenerationOutcome::Text(format!(
                "Mock response for: {}",
                prompt
            )));
        }

        let index = (*count - 1) % responses.len();
        match responses[index].clone() {
            CannedResponse::Image(bytes) => Ok(GenerationOutcome::Image(bytes)),
            CannedResponse::Text(text) => Ok(GenerationOutcome::Text(text)),
            CannedResponse::ApiError(message) => Err(Error::AiProvider(message)),
            CannedResponse::NoOutput => Err(Error::NoOutput),
        }
    }
}
