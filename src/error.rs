//! Error types for audio-shrink

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShrinkError {
    #[error("Input file '{}' not found.", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input size must be a non-negative number of MB, got {0}")]
    InvalidInputSize(f64),

    #[error("Target size must be a positive number of MB, got {0}")]
    InvalidTargetSize(f64),

    #[error("Audio duration must be positive, got {0} seconds")]
    InvalidDuration(f64),

    #[error("Failed to read audio duration: {0}")]
    Probe(String),

    #[error("ffmpeg binary not found: {0}")]
    EncoderNotFound(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Invalid settings: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShrinkError>;
