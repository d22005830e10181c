use super::{ImageService, SavedImage};
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Writes model-produced image bytes to the output directory as PNG files.
pub struct ImageProcessor {
    output_dir: PathBuf,
}

impl ImageProcessor {
    pub fn new(output_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    fn save_png_sync(img: DynamicImage, path: PathBuf) -> Result<()> {
        img.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

#[async_trait]
impl ImageService for ImageProcessor {
    async fn save_png(&self, image_data: &[u8]) -> Result<SavedImage> {
        // Decoding doubles as validation of the inline payload.
        let img = image::load_from_memory(image_data)?;

        let filename = format!(
            "generated_image_{}_{}.png",
            Utc::now().format("%Y%m%dT%H%M%S"),
            Uuid::new_v4()
        );
        let path = self.output_dir.join(&filename);

        tokio::task::spawn_blocking({
            let path = path.clone();
            move || Self::save_png_sync(img, path)
        })
        .await
        .map_err(|e| Error::Invariant(format!("Image save task join error: {}", e)))??;

        Ok(SavedImage { filename, path })
    }
}
