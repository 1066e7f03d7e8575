//! FFmpeg subprocess handling for audio conversion

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::error::{Result, ShrinkError};

/// Build ffmpeg arguments
///
/// -i <input>        : Input file
/// -vn               : Skip video streams (embedded cover art)
/// -codec:a <enc>    : Audio encoder
/// -b:a <bitrate>k   : Set audio bitrate
/// -y                : Overwrite output file without asking
pub fn build_args(input_path: &Path, output_path: &Path, encoder: &str, bitrate: u32) -> Vec<OsString> {
    vec![
        "-i".into(),
        input_path.into(),
        "-vn".into(),
        "-codec:a".into(),
        encoder.into(),
        "-b:a".into(),
        format!("{}k", bitrate).into(),
        "-y".into(),
        output_path.into(),
    ]
}

/// Convert a single audio file using ffmpeg
///
/// # Arguments
/// * `ffmpeg_path` - Path to the ffmpeg binary
/// * `input_path` - Path to the input audio file
/// * `output_path` - Path for the output file
/// * `encoder` - ffmpeg audio encoder (e.g., "libmp3lame")
/// * `bitrate` - Target bitrate in kbps (e.g., 256)
pub fn convert_file(
    ffmpeg_path: &Path,
    input_path: &Path,
    output_path: &Path,
    encoder: &str,
    bitrate: u32,
) -> Result<()> {
    let args = build_args(input_path, output_path, encoder, bitrate);

    log::info!(
        "Converting: {} -> {} at {}kbps",
        input_path.display(),
        output_path.display(),
        bitrate
    );

    let output = Command::new(ffmpeg_path)
        .args(&args)
        .output()
        .map_err(|e| ShrinkError::Encode(format!("Failed to spawn ffmpeg: {}", e)))?;

    if output.status.success() {
        log::info!("Successfully converted: {}", input_path.display());
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let error_msg = format!(
        "ffmpeg exited with status {}: {}",
        output.status,
        stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("Unknown error")
    );
    log::error!("Conversion failed: {}", error_msg);
    Err(ShrinkError::Encode(error_msg))
}
