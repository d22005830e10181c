//! AI service integration for multimodal generation
//!
//! Provides the dispatch seam between the web layer and Gemini's
//! generateContent API, plus a mock implementation for tests.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::GeminiGenerationClient;
pub use mock::MockGenerationClient;

use crate::models::{GenerationOutcome, SourceImage};
use crate::Result;
use async_trait::async_trait;

/// One-shot multimodal generation: a required prompt plus an optional
/// source image in, exactly one image-or-text outcome back.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        source: Option<&SourceImage>,
    ) -> Result<GenerationOutcome>;
}
