use super::{ImageService, SavedImage};
use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Test double that writes bytes verbatim under a base path with
/// deterministic filenames, skipping decode validation.
pub struct MockImageProcessor {
    base_path: Arc<Mutex<PathBuf>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageProcessor {
    pub fn new() -> Self {
        Self {
            base_path: Arc::new(Mutex::new(std::env::temp_dir())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_base_path(self, base_path: PathBuf) -> Self {
        *self.base_path.lock().unwrap() = base_path;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockImageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageService for MockImageProcessor {
    async fn save_png(&self, image_data: &[u8]) -> Result<SavedImage> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let filename = format!("generated_image_mock_{}.png", *count);
        let path = self.base_path.lock().unwrap().join(&filename);
        std::fs::write(&path, image_data)?;

        Ok(SavedImage { filename, path })
    }
}
