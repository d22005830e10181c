//! Web UI for Gemini image generation and analysis
//!
//! Forwards an optional source image and a text prompt to Gemini's
//! generateContent API and renders whichever the model returns: a
//! generated image with a download link, or a plain text response.

pub mod ai;
pub mod error;
pub mod image;
pub mod models;
pub mod server;
pub mod templates;

pub use error::{Error, Result};
