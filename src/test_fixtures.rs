//! Test fixtures for duration probing and compression tests
//!
//! Writes small PCM WAV files directly so tests do not depend on an
//! installed ffmpeg.

#![cfg(test)]

use std::f64::consts::PI;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Generate a mono 16-bit PCM WAV file containing a 440 Hz tone
///
/// # Arguments
/// * `dir` - Directory to write into
/// * `name` - Base name for the file (without extension)
/// * `duration_secs` - Duration in seconds
/// * `sample_rate` - Samples per second
///
/// # Returns
/// Path to the generated file
pub fn generate_wav_file(dir: &Path, name: &str, duration_secs: u32, sample_rate: u32) -> PathBuf {
    let path = dir.join(format!("{}.wav", name));

    let channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let block_align = channels * bits_per_sample / 8;
    let byte_rate = sample_rate * block_align as u32;
    let n_samples = duration_secs * sample_rate;
    let data_len = n_samples * block_align as u32;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&channels.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&bits_per_sample.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());

    for i in 0..n_samples {
        let t = i as f64 / sample_rate as f64;
        let sample = ((2.0 * PI * 440.0 * t).sin() * 8000.0) as i16;
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    let mut file = std::fs::File::create(&path).expect("Failed to create wav fixture");
    file.write_all(&bytes).expect("Failed to write wav fixture");

    path
}

/// Write a file of exactly `len` bytes (content is irrelevant)
pub fn generate_sized_file(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, vec![0u8; len]).expect("Failed to write sized fixture");
    path
}
