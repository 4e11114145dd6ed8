//! Configuration resolution.
//!
//! Options come from three tiers, evaluated field by field:
//! command line, then the discovered `rizer` config file, then built-in
//! defaults. A config file looks like:
//!
//! ```json
//! {
//!   "mode": "width",
//!   "levels": [320, 640, 1280],
//!   "filenamePattern": "${name}${suffix}${ext}",
//!   "outputFormat": "webp",
//!   "outputDirectory": "./resized",
//!   "allowUpscale": false
//! }
//! ```
//!
//! Unknown keys are rejected.

mod loader;
mod schema;

pub use loader::{ConfigLoadError, ConfigLoader, DiscoveredConfig, SEARCH_PLACES};
pub use schema::{validate, Violation};

use crate::core::{
    default_levels, Level, Mode, Options, ResizeAlgorithm, Result, RizerError,
    DEFAULT_FILENAME_PATTERN, DEFAULT_OUTPUT_DIRECTORY, DEFAULT_QUALITY,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Values read from a config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
    pub mode: Option<Mode>,
    pub levels: Option<Vec<f64>>,
    pub filename_pattern: Option<String>,
    pub output_format: Option<String>,
    pub output_directory: Option<String>,
    pub allow_upscale: Option<bool>,
}

/// How the command line asked for sizes.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelSelection {
    Levels(Mode, Vec<Level>),
    Count(Mode, u32),
}

/// Options given on the command line; `None` means "not specified".
#[derive(Debug, Clone)]
pub struct CliOptions {
    pub selection: Option<LevelSelection>,
    pub allow_upscale: Option<bool>,
    pub filename_pattern: Option<String>,
    pub output_format: Option<String>,
    pub output_directory: Option<PathBuf>,
    pub quality: u8,
    pub algorithm: ResizeAlgorithm,
    pub optimize_png: bool,
    pub threads: usize,
    pub show_progress: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            selection: None,
            allow_upscale: None,
            filename_pattern: None,
            output_format: None,
            output_directory: None,
            quality: DEFAULT_QUALITY,
            algorithm: ResizeAlgorithm::Lanczos3,
            optimize_png: false,
            threads: 0,
            show_progress: false,
        }
    }
}

/// Merges command line options over file config over defaults.
pub fn resolve(cli: CliOptions, file: FileConfig) -> Options {
    let (mode, levels, count_hint) = match cli.selection {
        Some(LevelSelection::Levels(mode, levels)) => (mode, Some(levels), None),
        Some(LevelSelection::Count(mode, count)) => (mode, None, Some(count)),
        None => match (file.mode, file.levels) {
            (mode, Some(levels)) => (
                mode.unwrap_or(Mode::Ratio),
                Some(levels.into_iter().map(Level::from_number).collect()),
                None,
            ),
            (Some(mode), None) => {
                if mode != Mode::Ratio {
                    log::warn!(
                        "Config sets mode '{}' without levels, using default ratios",
                        mode
                    );
                }
                (Mode::Ratio, None, None)
            }
            (None, None) => (Mode::Ratio, None, None),
        },
    };

    // default levels are ratios, so they only ever pair with ratio mode
    let (mode, levels) = match (levels, count_hint) {
        (None, None) => (Mode::Ratio, Some(default_levels())),
        (levels, _) => (mode, levels),
    };

    Options {
        mode,
        levels,
        count_hint,
        allow_upscale: cli.allow_upscale.or(file.allow_upscale).unwrap_or(false),
        filename_pattern: cli
            .filename_pattern
            .or(file.filename_pattern)
            .unwrap_or_else(|| DEFAULT_FILENAME_PATTERN.to_string()),
        output_format: cli.output_format.or(file.output_format),
        output_directory: cli
            .output_directory
            .or_else(|| file.output_directory.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIRECTORY)),
        quality: cli.quality,
        algorithm: cli.algorithm,
        optimize_png: cli.optimize_png,
        threads: cli.threads,
        show_progress: cli.show_progress,
    }
}

/// Finds, validates and reads the config file.
///
/// A missing or unreadable file yields an empty config. A file that breaks
/// the schema is an error listing every violation.
pub fn load_config(ignore_config: bool, start_dir: &Path) -> Result<FileConfig> {
    if ignore_config {
        log::debug!("Config discovery disabled");
        return Ok(FileConfig::default());
    }

    let found = match ConfigLoader::new(start_dir).search() {
        Ok(Some(found)) => found,
        Ok(None) => return Ok(FileConfig::default()),
        Err(e) => {
            log::warn!("⚠ Failed to load config: {}", e);
            return Ok(FileConfig::default());
        }
    };

    let violations = validate(&found.value);
    if !violations.is_empty() {
        return Err(RizerError::InvalidConfig {
            path: found.path,
            errors: violations.iter().map(ToString::to_string).collect(),
        });
    }

    serde_json::from_value(found.value).map_err(|e| RizerError::InvalidConfig {
        path: found.path.clone(),
        errors: vec![e.to_string()],
    })
}
