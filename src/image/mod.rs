//! Generated-image output handling
//!
//! Validates image bytes returned by the model and writes them as PNG
//! files the web layer can display and offer for download.

pub mod mock;
pub mod processor;

pub use mock::MockImageProcessor;
pub use processor::ImageProcessor;

use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug)]
pub struct SavedImage {
    pub filename: String,
    pub path: PathBuf,
}

#[async_trait]
pub trait ImageService: Send + Sync {
    async fn save_png(&self, image_data: &[u8]) -> Result<SavedImage>;
}
