// rizer/src/core/mod.rs
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub mod guard;
pub mod processor;

pub const DEFAULT_RATIO_LEVELS: [&str; 3] = ["0.25", "0.5", "0.75"];
pub const DEFAULT_FILENAME_PATTERN: &str = "${name}${suffix}${ext}";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "./resized";
pub const DEFAULT_QUALITY: u8 = 85;
/// Largest side accepted for a source or a generated image.
pub const MAX_DIMENSION: u32 = 100_000;
/// Largest pixel count a single generated image may have.
pub const MAX_OUTPUT_PIXELS: u64 = 1 << 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Width,
    Height,
    Ratio,
}

impl Mode {
    pub fn is_pixel(self) -> bool {
        matches!(self, Mode::Width | Mode::Height)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Width => "width",
            Mode::Height => "height",
            Mode::Ratio => "ratio",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

/// A single requested size as the user wrote it.
///
/// The literal text is kept because ratio suffixes reuse it verbatim, so
/// `0.5` and `0.50` name different files.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    text: String,
}

impl Level {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_number(value: f64) -> Self {
        Self::new(value.to_string())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Numeric value, `None` when the text is not a finite number.
    pub fn value(&self) -> Option<f64> {
        self.text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

pub fn default_levels() -> Vec<Level> {
    DEFAULT_RATIO_LEVELS.iter().map(|l| Level::new(*l)).collect()
}

/// Fully merged run options.
#[derive(Debug, Clone)]
pub struct Options {
    pub mode: Mode,
    pub levels: Option<Vec<Level>>,
    pub count_hint: Option<u32>,
    pub allow_upscale: bool,
    pub filename_pattern: String,
    pub output_format: Option<String>,
    pub output_directory: PathBuf,
    pub quality: u8,
    pub algorithm: ResizeAlgorithm,
    pub optimize_png: bool,
    pub threads: usize,
    pub show_progress: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: Mode::Ratio,
            levels: Some(default_levels()),
            count_hint: None,
            allow_upscale: false,
            filename_pattern: DEFAULT_FILENAME_PATTERN.to_string(),
            output_format: None,
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            quality: DEFAULT_QUALITY,
            algorithm: ResizeAlgorithm::Lanczos3,
            optimize_png: false,
            threads: 0,
            show_progress: false,
        }
    }
}

impl Options {
    pub fn validate(&self) -> Result<()> {
        if self.quality == 0 || self.quality > 100 {
            return Err(RizerError::InvalidParameter(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMeta {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeTarget {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NotANumber,
    BelowOnePixel,
    Upscale { requested: u32, original: u32 },
    RatioOutOfRange(f64),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotANumber => write!(f, "not a number"),
            SkipReason::BelowOnePixel => write!(f, "smaller than one pixel"),
            SkipReason::Upscale { requested, original } => {
                write!(f, "{}px exceeds original {}px", requested, original)
            }
            SkipReason::RatioOutOfRange(ratio) => {
                write!(f, "ratio {} outside (0, 1]", ratio)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skip {
    pub level: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanEntry {
    Target(ResizeTarget),
    Skipped(Skip),
}

impl PlanEntry {
    pub fn target(&self) -> Option<&ResizeTarget> {
        match self {
            PlanEntry::Target(target) => Some(target),
            PlanEntry::Skipped(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, PlanEntry::Skipped(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TargetStatus {
    Written { bytes: u64 },
    Failed { message: String },
}

#[derive(Debug, Clone)]
pub struct TargetOutcome {
    pub suffix: String,
    pub path: PathBuf,
    pub status: TargetStatus,
}

impl TargetOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self.status, TargetStatus::Written { .. })
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub plan: Vec<PlanEntry>,
    pub outcomes: Vec<TargetOutcome>,
}

impl RunReport {
    pub fn generated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_written()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.generated()
    }

    pub fn skipped(&self) -> usize {
        self.plan.iter().filter(|e| e.is_skipped()).count()
    }

    pub fn total_bytes(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|o| match o.status {
                TargetStatus::Written { bytes } => bytes,
                TargetStatus::Failed { .. } => 0,
            })
            .sum()
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    Completed(RunReport),
    Declined,
}

#[derive(Error, Debug)]
pub enum RizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Invalid rizer configuration in {}:\n{}", .path.display(), format_violations(.errors))]
    InvalidConfig { path: PathBuf, errors: Vec<String> },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Processing error: {0}")]
    ProcessingError(String),

    #[error("Memory limit exceeded: {0}")]
    MemoryLimitExceeded(String),
}

fn format_violations(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("  • {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, RizerError>;
