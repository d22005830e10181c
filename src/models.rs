//! Data models and configuration
//!
//! Defines the request/result types exchanged between the web layer and
//! the generation dispatcher, plus process-wide configuration loaded once
//! at startup.

use crate::ai::mime::sniff_image_mime;
use crate::{Error, Result};

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";

/// A user-uploaded source image, validated at construction.
///
/// Construction decodes the bytes once to reject uploads that are not a
/// standard raster format; only the raw bytes are forwarded upstream.
#[derive(Debug, Clone)]
pub struct SourceImage {
    bytes: Vec<u8>,
    mime_type: &'static str,
}

impl SourceImage {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        image::load_from_memory(&bytes)?;
        let mime_type = sniff_image_mime(&bytes);
        Ok(Self { bytes, mime_type })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }
}

/// Result of one generation call: the model produced either an image or text.
///
/// Exactly one variant exists per successful call. A response carrying
/// neither an image nor text is surfaced as [`Error::NoOutput`], not a
/// third variant.
///
/// [`Error::NoOutput`]: crate::Error::NoOutput
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// Raw image bytes decoded from the response's inline data part.
    Image(Vec<u8>),
    /// Text from the response's first text part.
    Text(String),
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .map_err(|_| Error::Config("GEMINI_API_KEY not set".to_string()))?,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }
}
