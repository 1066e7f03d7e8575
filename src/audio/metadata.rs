use std::fs::File;
use std::path::Path;

use lofty::AudioFile;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{Result, ShrinkError};

/// Get audio duration in seconds
///
/// Tries Symphonia's frame count first, then falls back to the duration
/// Lofty reads from the container headers.
pub fn get_audio_duration(path: &Path) -> Result<f64> {
    match symphonia_duration(path) {
        Ok(duration) if duration > 0.0 => return Ok(duration),
        Ok(_) => log::debug!("Symphonia reported no frames for {:?}", path.file_name()),
        Err(e) => log::debug!("Symphonia probe failed for {:?}: {}", path.file_name(), e),
    }

    let duration = lofty_duration(path)?;
    if duration > 0.0 {
        Ok(duration)
    } else {
        Err(ShrinkError::Probe(format!(
            "could not determine duration of {}",
            path.display()
        )))
    }
}

/// Duration from the default track's frame count and sample rate
fn symphonia_duration(path: &Path) -> Result<f64> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension() {
        hint.with_extension(&ext.to_string_lossy());
    }

    let format_opts = FormatOptions::default();
    let metadata_opts = MetadataOptions::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .map_err(|e| ShrinkError::Probe(format!("Failed to probe audio format: {}", e)))?;

    let format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| ShrinkError::Probe("No default track found".to_string()))?;

    Ok(frames_to_seconds(
        track.codec_params.n_frames,
        track.codec_params.sample_rate,
    ))
}

/// Seconds for a frame count; 0.0 when either value is unknown
fn frames_to_seconds(n_frames: Option<u64>, sample_rate: Option<u32>) -> f64 {
    match (n_frames, sample_rate) {
        (Some(frames), Some(rate)) if rate > 0 => frames as f64 / rate as f64,
        _ => 0.0,
    }
}

/// Duration from the container properties
fn lofty_duration(path: &Path) -> Result<f64> {
    let tagged_file = lofty::read_from_path(path)
        .map_err(|e| ShrinkError::Probe(format!("Failed to read file: {}", e)))?;

    Ok(tagged_file.properties().duration().as_secs_f64())
}
