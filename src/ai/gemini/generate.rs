use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::GenerationService;
use crate::models::{GenerationOutcome, SourceImage};
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

/// Dispatches one multimodal generateContent call and classifies the
/// response into an image or text outcome.
pub struct GeminiGenerationClient {
    http: GeminiHttpClient,
}

impl GeminiGenerationClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(120),
                client,
            ),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    /// First match wins, in part order: inline image data beats text, and
    /// any text in the same response is discarded once an image is found.
    fn classify(response: GenerateContentResponse) -> Result<GenerationOutcome> {
        let parts = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();

        for part in &parts {
            if let Part::InlineData { inline_data } = part {
                tracing::debug!("Gemini returned inline data ({})", inline_data.mime_type);
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(&inline_data.data)
                    .map_err(|e| {
                        Error::AiProvider(format!("Failed to decode base64 image data: {}", e))
                    })?;
                return Ok(GenerationOutcome::Image(bytes));
            }
        }

        for part in parts {
            if let Part::Text { text } = part {
                if !text.trim().is_empty() {
                    return Ok(GenerationOutcome::Text(text));
                }
            }
        }

        Err(Error::NoOutput)
    }
}

#[async_trait]
impl GenerationService for GeminiGenerationClient {
    async fn generate(
        &self,
        prompt: &str,
        source: Option<&SourceImage>,
    ) -> Result<GenerationOutcome> {
        if prompt.trim().is_empty() {
            return Err(Error::EmptyPrompt);
        }

        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];
        if let Some(image) = source {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type().to_string(),
                    data: base64::engine::general_purpose::STANDARD.encode(image.bytes()),
                },
            });
        }

        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            },
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;
        Self::classify(response)
    }
}
