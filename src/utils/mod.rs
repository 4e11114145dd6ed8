// rizer/src/utils/mod.rs
use crate::core::Level;
use std::path::Path;

/// Expands `${name}`, `${suffix}` and `${ext}` in a filename pattern.
///
/// Only the first occurrence of each token is replaced. The name is not
/// sanitized.
pub fn compose_filename(pattern: &str, name: &str, suffix: &str, ext: &str) -> String {
    pattern
        .replacen("${name}", name, 1)
        .replacen("${suffix}", suffix, 1)
        .replacen("${ext}", ext, 1)
}

/// Splits a comma separated list, trimming entries and dropping empty ones.
pub fn parse_csv(value: &str) -> Vec<Level> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(Level::new)
        .collect()
}

/// Base name and dotted extension of a path, e.g. `("photo", ".jpg")`.
///
/// A file without an extension yields an empty extension.
pub fn split_file_name(path: &Path) -> (String, String) {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let ext = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    (name, ext)
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}
