// rizer/src/config/loader.rs
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File names probed in every directory, in priority order.
pub const SEARCH_PLACES: [&str; 6] = [
    "package.json",
    ".rizerrc",
    ".rizerrc.json",
    ".rizerrc.toml",
    "rizer.config.json",
    "rizer.config.toml",
];

const PACKAGE_PROPERTY: &str = "rizer";

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON parse error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("TOML parse error in {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// A config file found on disk, not yet validated.
#[derive(Debug, Clone)]
pub struct DiscoveredConfig {
    pub path: PathBuf,
    pub value: Value,
}

/// Walks from a start directory up to the filesystem root, or to the stop
/// directory when one is set, looking for a `rizer` config.
pub struct ConfigLoader {
    start: PathBuf,
    stop_dir: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            start: start.into(),
            stop_dir: None,
        }
    }

    /// Last directory searched; its ancestors are never read.
    pub fn with_stop_dir(mut self, stop_dir: impl Into<PathBuf>) -> Self {
        self.stop_dir = Some(stop_dir.into());
        self
    }

    pub fn search(&self) -> Result<Option<DiscoveredConfig>, ConfigLoadError> {
        for dir in self.start.ancestors() {
            if self.past_stop_dir(dir) {
                break;
            }

            for place in SEARCH_PLACES {
                let candidate = dir.join(place);
                if !candidate.is_file() {
                    continue;
                }

                if let Some(value) = read_candidate(&candidate, place)? {
                    log::debug!("Using config from {}", candidate.display());
                    return Ok(Some(DiscoveredConfig {
                        path: candidate,
                        value,
                    }));
                }
            }
        }

        Ok(None)
    }

    fn past_stop_dir(&self, dir: &Path) -> bool {
        match &self.stop_dir {
            Some(stop) => !dir.starts_with(stop),
            None => false,
        }
    }
}

fn read_candidate(path: &Path, place: &str) -> Result<Option<Value>, ConfigLoadError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if place.ends_with(".toml") {
        let value = toml::from_str::<Value>(&content).map_err(|source| ConfigLoadError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(Some(value));
    }

    let value = serde_json::from_str::<Value>(&content).map_err(|source| ConfigLoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if place == "package.json" {
        return Ok(value.get(PACKAGE_PROPERTY).cloned());
    }

    Ok(Some(value))
}
