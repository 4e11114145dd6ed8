// rizer/src/processors/encoder.rs
use crate::core::{Result, RizerError};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageFormat};
use oxipng::{optimize_from_memory, Options};
use std::io::Cursor;
use std::path::Path;

/// Parses an output format override such as `webp` or `JPG`.
pub fn parse_output_format(value: &str) -> Result<ImageFormat> {
    let normalized = value.trim().trim_start_matches('.').to_lowercase();
    match normalized.as_str() {
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "png" => Ok(ImageFormat::Png),
        "webp" => Ok(ImageFormat::WebP),
        "gif" => Ok(ImageFormat::Gif),
        "bmp" => Ok(ImageFormat::Bmp),
        "tif" | "tiff" => Ok(ImageFormat::Tiff),
        _ => Err(RizerError::UnsupportedFormat(value.to_string())),
    }
}

/// Dotted file extension written for a format, e.g. `.jpg`.
pub fn format_extension(format: ImageFormat) -> String {
    let ext = format.extensions_str().first().copied().unwrap_or("img");
    format!(".{}", ext)
}

pub struct Encoder {
    quality: u8,
    optimize_png: bool,
}

impl Encoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            optimize_png: false,
        }
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    /// Encodes and writes the image, returning the number of bytes written.
    pub fn save(&self, image: &DynamicImage, path: &Path, format: ImageFormat) -> Result<u64> {
        log::debug!(
            "Saving image to {} with format {:?}, quality: {}",
            path.display(),
            format,
            self.quality
        );

        let bytes = self.encode(image, format)?;
        std::fs::write(path, &bytes)?;
        Ok(bytes.len() as u64)
    }

    pub fn encode(&self, image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
        match format {
            ImageFormat::Jpeg => self.encode_jpeg(image),
            ImageFormat::Png => self.encode_png(image),
            ImageFormat::WebP => {
                // the webp encoder only accepts 8-bit RGB(A)
                let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
                encode_generic(&rgba, format)
            }
            _ => encode_generic(image, format),
        }
    }

    fn encode_jpeg(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let rgb = image.to_rgb8();
        let mut buffer = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
        encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
        Ok(buffer)
    }

    fn encode_png(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let data = encode_generic(image, ImageFormat::Png)?;
        if !self.optimize_png {
            return Ok(data);
        }

        optimize_from_memory(&data, &Options::default())
            .map_err(|e| RizerError::ProcessingError(format!("PNG optimization failed: {}", e)))
    }
}

fn encode_generic(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgba8(image::RgbaImage::new(8, 6))
    }

    #[test]
    fn parses_format_names() {
        assert_eq!(parse_output_format("JPG").unwrap(), ImageFormat::Jpeg);
        assert_eq!(parse_output_format(".webp").unwrap(), ImageFormat::WebP);
        assert_eq!(parse_output_format("tif").unwrap(), ImageFormat::Tiff);
        assert!(matches!(
            parse_output_format("heic"),
            Err(RizerError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn extensions_are_dotted() {
        assert_eq!(format_extension(ImageFormat::Jpeg), ".jpg");
        assert_eq!(format_extension(ImageFormat::Png), ".png");
        assert_eq!(format_extension(ImageFormat::WebP), ".webp");
    }

    #[test]
    fn jpeg_drops_alpha() {
        let bytes = Encoder::new(80).encode(&sample(), ImageFormat::Jpeg).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
    }

    #[test]
    fn optimized_png_still_decodes() {
        let bytes = Encoder::new(85)
            .with_png_optimization(true)
            .encode(&sample(), ImageFormat::Png)
            .unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
    }

    #[test]
    fn webp_accepts_grayscale_sources() {
        let gray = DynamicImage::ImageLuma8(image::GrayImage::new(4, 4));
        let bytes = Encoder::new(85).encode(&gray, ImageFormat::WebP).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn save_reports_bytes_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let written = Encoder::new(85).save(&sample(), &path, ImageFormat::Png).unwrap();
        assert_eq!(written, std::fs::metadata(&path).unwrap().len());
    }
}
