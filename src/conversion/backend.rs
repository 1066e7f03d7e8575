//! Media backend abstraction
//!
//! The compression workflow only needs two things from the outside world:
//! how long an input is, and a re-encode at a given bitrate.

use std::path::{Path, PathBuf};

use super::ffmpeg;
use crate::audio;
use crate::error::Result;

pub trait MediaBackend {
    /// Duration of `input` in seconds
    fn duration(&self, input: &Path) -> Result<f64>;

    /// Re-encode `input` into `output` at `bitrate` kbps
    fn reencode(&self, input: &Path, output: &Path, bitrate: u32) -> Result<()>;
}

/// Backend that probes with Symphonia/Lofty and encodes with ffmpeg
#[derive(Debug, Clone)]
pub struct FfmpegBackend {
    ffmpeg_path: PathBuf,
    encoder: String,
}

impl FfmpegBackend {
    pub fn new(ffmpeg_path: PathBuf, encoder: impl Into<String>) -> Self {
        Self {
            ffmpeg_path,
            encoder: encoder.into(),
        }
    }
}

impl MediaBackend for FfmpegBackend {
    fn duration(&self, input: &Path) -> Result<f64> {
        audio::get_audio_duration(input)
    }

    fn reencode(&self, input: &Path, output: &Path, bitrate: u32) -> Result<()> {
        ffmpeg::convert_file(&self.ffmpeg_path, input, output, &self.encoder, bitrate)
    }
}
