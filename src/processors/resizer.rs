// rizer/src/processors/resizer.rs
use crate::core::{ResizeAlgorithm, ResizeTarget};
use image::{imageops::FilterType, DynamicImage, GenericImageView};

pub struct Resizer {
    algorithm: ResizeAlgorithm,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Resizes the source to a planned target. A single given side keeps the
    /// aspect ratio.
    pub fn resize(&self, image: &DynamicImage, target: &ResizeTarget) -> DynamicImage {
        let (width, height) = calculate_dimensions(image.dimensions(), target);

        if width == image.width() && height == image.height() {
            log::debug!("Image dimensions unchanged for {}, skipping resize", target.suffix);
            return image.clone();
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{} ({})",
            image.width(),
            image.height(),
            width,
            height,
            target.suffix
        );

        image.resize_exact(width, height, self.filter_type())
    }

    fn filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

pub fn calculate_dimensions(original: (u32, u32), target: &ResizeTarget) -> (u32, u32) {
    let (orig_width, orig_height) = original;

    match (target.width, target.height) {
        (Some(width), Some(height)) => (width.max(1), height.max(1)),
        (Some(width), None) => {
            let ratio = width as f64 / orig_width as f64;
            let height = (orig_height as f64 * ratio).round() as u32;
            (width.max(1), height.max(1))
        }
        (None, Some(height)) => {
            let ratio = height as f64 / orig_height as f64;
            let width = (orig_width as f64 * ratio).round() as u32;
            (width.max(1), height.max(1))
        }
        (None, None) => (orig_width, orig_height),
    }
}
