// rizer/src/processors/loader.rs
use crate::core::{ImageMeta, Result, RizerError, MAX_DIMENSION};
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::path::Path;

/// A decoded source image together with the codec it was stored in.
pub struct SourceImage {
    pub image: DynamicImage,
    pub format: Option<ImageFormat>,
}

impl SourceImage {
    pub fn meta(&self) -> ImageMeta {
        let (width, height) = self.image.dimensions();
        ImageMeta { width, height }
    }
}

#[derive(Clone)]
pub struct Loader {
    max_dimensions: Option<(u32, u32)>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: Some((MAX_DIMENSION, MAX_DIMENSION)),
        }
    }

    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_dimensions = Some((width, height));
        self
    }

    pub fn load(&self, path: &Path) -> Result<SourceImage> {
        log::debug!("Loading image from: {}", path.display());

        self.validate_path(path)?;

        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let format = reader.format();
        let image = reader.decode().map_err(|e| {
            RizerError::ProcessingError(format!("Failed to decode image: {}", e))
        })?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(RizerError::ProcessingError(format!(
                "Image has no pixels: {}x{}",
                width, height
            )));
        }

        if let Some((max_w, max_h)) = self.max_dimensions {
            if width > max_w || height > max_h {
                return Err(RizerError::MemoryLimitExceeded(format!(
                    "Image dimensions {}x{} exceed maximum {}x{}",
                    width, height, max_w, max_h
                )));
            }
        }

        log::info!(
            "Loaded image: {}x{} pixels, format: {:?}",
            width,
            height,
            format
        );

        Ok(SourceImage { image, format })
    }

    fn validate_path(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(RizerError::InputNotFound(path.to_path_buf()));
        }

        let metadata = path.metadata()?;
        if metadata.len() == 0 {
            return Err(RizerError::InvalidParameter(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        Ok(())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
