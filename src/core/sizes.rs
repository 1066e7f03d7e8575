//! File size measurement and display helpers

use std::fs;
use std::path::Path;

use super::bitrate::BYTES_PER_MB;
use crate::error::Result;

/// Get file size in megabytes (1 MB = 1024 * 1024 bytes)
pub fn file_size_mb(path: &Path) -> Result<f64> {
    let bytes = fs::metadata(path)?.len();
    Ok(bytes_to_mb(bytes))
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Format a size already in MB, e.g. "12.34 MB"
pub fn format_mb(size_mb: f64) -> String {
    format!("{:.2} MB", size_mb)
}

/// Format duration as "Xm Ys"
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds.round() as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{}m {}s", mins, secs)
}
