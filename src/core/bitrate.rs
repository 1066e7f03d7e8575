//! Bitrate calculation for target-size compression
//!
//! Given the size and duration of an input file, pick the highest standard
//! MP3 bitrate whose output stays at or below a requested size.

use crate::error::{Result, ShrinkError};

/// Standard MP3 bitrates (kbps), highest first
pub const STANDARD_BITRATES: [u32; 11] = [320, 256, 192, 160, 128, 112, 96, 80, 64, 48, 32];

/// Maximum MP3 bitrate (kbps)
pub const MAX_BITRATE: u32 = STANDARD_BITRATES[0];

/// Minimum MP3 bitrate (kbps), used as a floor when nothing smaller fits
pub const MIN_BITRATE: u32 = STANDARD_BITRATES[STANDARD_BITRATES.len() - 1];

/// Bytes per megabyte (binary, matching how file sizes are reported)
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Inputs to a single bitrate calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionRequest {
    pub input_size_mb: f64,
    pub duration_seconds: f64,
    pub target_size_mb: f64,
}

impl CompressionRequest {
    /// Build a request, rejecting values the planner cannot work with
    pub fn new(input_size_mb: f64, duration_seconds: f64, target_size_mb: f64) -> Result<Self> {
        validate_target_size(target_size_mb)?;
        if !(duration_seconds.is_finite() && duration_seconds > 0.0) {
            return Err(ShrinkError::InvalidDuration(duration_seconds));
        }
        if !(input_size_mb.is_finite() && input_size_mb >= 0.0) {
            return Err(ShrinkError::InvalidInputSize(input_size_mb));
        }
        Ok(Self {
            input_size_mb,
            duration_seconds,
            target_size_mb,
        })
    }
}

/// Result of bitrate calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionResult {
    /// Chosen standard bitrate in kbps
    pub chosen_bitrate_kbps: u32,
    /// Estimated output size in MB at the chosen bitrate
    pub output_size_mb: f64,
}

/// Encoding decision for a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingDecision {
    /// Input already fits; re-encode at the passthrough bitrate without planning
    Passthrough(u32),
    /// Convert at the planned bitrate
    ConvertAt(u32),
}

impl EncodingDecision {
    pub fn bitrate(&self) -> u32 {
        match *self {
            EncodingDecision::Passthrough(kbps) | EncodingDecision::ConvertAt(kbps) => kbps,
        }
    }
}

/// Target sizes must be finite and positive
pub fn validate_target_size(target_size_mb: f64) -> Result<()> {
    if target_size_mb.is_finite() && target_size_mb > 0.0 {
        Ok(())
    } else {
        Err(ShrinkError::InvalidTargetSize(target_size_mb))
    }
}

/// Raw bitrate (kbps) that would produce exactly `target_size_mb`
///
/// bitrate (kbps) = (size_mb * 8 * 1024 * 1024) / duration_seconds / 1000
pub fn target_kbps(duration_seconds: f64, target_size_mb: f64) -> f64 {
    (target_size_mb * 8.0 * BYTES_PER_MB) / duration_seconds / 1000.0
}

/// Pick the highest standard bitrate not exceeding the target bitrate
///
/// Falls back to [`MIN_BITRATE`] when even the lowest standard value is too
/// high. `duration_seconds` must be positive; callers check this through
/// [`CompressionRequest::new`].
pub fn select_bitrate(_input_size_mb: f64, duration_seconds: f64, target_size_mb: f64) -> u32 {
    let target = target_kbps(duration_seconds, target_size_mb);

    STANDARD_BITRATES
        .iter()
        .copied()
        .find(|&bitrate| bitrate as f64 <= target)
        .unwrap_or(MIN_BITRATE)
}

/// Estimated output size (MB) for `duration_seconds` of audio at `kbps`
pub fn estimate_output_size_mb(kbps: u32, duration_seconds: f64) -> f64 {
    (kbps as f64 * 1000.0 * duration_seconds) / 8.0 / BYTES_PER_MB
}

/// Choose a bitrate and estimate the resulting size
pub fn plan(request: &CompressionRequest) -> CompressionResult {
    let chosen_bitrate_kbps = select_bitrate(
        request.input_size_mb,
        request.duration_seconds,
        request.target_size_mb,
    );

    CompressionResult {
        chosen_bitrate_kbps,
        output_size_mb: estimate_output_size_mb(chosen_bitrate_kbps, request.duration_seconds),
    }
}

/// Whether a file of `input_size_mb` can skip planning entirely
pub fn is_under_target(input_size_mb: f64, target_size_mb: f64) -> bool {
    input_size_mb < target_size_mb
}

/// Format bitrate for display (e.g., "320 kbps")
pub fn format_bitrate(kbps: u32) -> String {
    format!("{} kbps", kbps)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Target size that makes one second of audio need exactly `kbps`
    fn target_mb_for_kbps(kbps: f64) -> f64 {
        kbps * 1000.0 / 8.0 / BYTES_PER_MB
    }

    #[test]
    fn test_high_target_returns_max() {
        assert_eq!(select_bitrate(10.0, 1.0, target_mb_for_kbps(320.0)), 320);
        assert_eq!(select_bitrate(10.0, 1.0, target_mb_for_kbps(1000.0)), 320);
    }

    #[test]
    fn test_between_values_rounds_down() {
        assert_eq!(select_bitrate(10.0, 1.0, target_mb_for_kbps(300.0)), 256);
        assert_eq!(select_bitrate(10.0, 1.0, target_mb_for_kbps(150.0)), 128);
        assert_eq!(select_bitrate(10.0, 1.0, target_mb_for_kbps(33.0)), 32);
    }

    #[test]
    fn test_exact_standard_value_is_kept() {
        assert_eq!(select_bitrate(10.0, 1.0, target_mb_for_kbps(128.0)), 128);
        assert_eq!(select_bitrate(10.0, 1.0, target_mb_for_kbps(32.0)), 32);
    }

    #[test]
    fn test_tiny_target_floors_at_min() {
        assert_eq!(select_bitrate(10.0, 1.0, target_mb_for_kbps(31.9)), MIN_BITRATE);
        assert_eq!(select_bitrate(500.0, 36_000.0, 0.01), 32);
    }

    #[test]
    fn test_hour_long_file_at_default_target() {
        let kbps = target_kbps(3600.0, 199.0);
        assert!((kbps - 463.7).abs() < 0.1, "got {}", kbps);
        assert_eq!(select_bitrate(500.0, 3600.0, 199.0), 320);
    }

    #[test]
    fn test_longer_file_needs_lower_bitrate() {
        // 10 hours into 199 MB is ~46 kbps
        assert_eq!(select_bitrate(900.0, 36_000.0, 199.0), 32);
        // 2 hours into 199 MB is ~231 kbps
        assert_eq!(select_bitrate(900.0, 7200.0, 199.0), 192);
    }

    #[test]
    fn test_standard_bitrates_descending() {
        assert!(STANDARD_BITRATES.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(MAX_BITRATE, 320);
        assert_eq!(MIN_BITRATE, 32);
    }

    #[test]
    fn test_estimate_output_size() {
        // 128 kbps * 60s = 960_000 bytes
        let size = estimate_output_size_mb(128, 60.0);
        assert!((size - 960_000.0 / BYTES_PER_MB).abs() < 1e-9);
    }

    #[test]
    fn test_plan_stays_under_target() {
        let request = CompressionRequest::new(500.0, 3600.0, 100.0).unwrap();
        let result = plan(&request);
        assert_eq!(result.chosen_bitrate_kbps, 192);
        assert!(result.output_size_mb <= request.target_size_mb);
    }

    #[test]
    fn test_under_target_is_strict() {
        assert!(is_under_target(50.0, 199.0));
        assert!(!is_under_target(199.0, 199.0));
        assert!(!is_under_target(500.0, 199.0));
    }

    #[test]
    fn test_request_rejects_bad_duration() {
        assert!(matches!(
            CompressionRequest::new(10.0, 0.0, 199.0),
            Err(ShrinkError::InvalidDuration(_))
        ));
        assert!(matches!(
            CompressionRequest::new(10.0, -5.0, 199.0),
            Err(ShrinkError::InvalidDuration(_))
        ));
        assert!(CompressionRequest::new(10.0, f64::NAN, 199.0).is_err());
    }

    #[test]
    fn test_request_rejects_bad_input_size() {
        assert!(matches!(
            CompressionRequest::new(-1.0, 60.0, 199.0),
            Err(ShrinkError::InvalidInputSize(_))
        ));
        assert!(matches!(
            CompressionRequest::new(f64::NAN, 60.0, 199.0),
            Err(ShrinkError::InvalidInputSize(_))
        ));
        assert!(CompressionRequest::new(0.0, 60.0, 199.0).is_ok());
    }

    #[test]
    fn test_request_rejects_bad_target() {
        assert!(matches!(
            CompressionRequest::new(10.0, 60.0, 0.0),
            Err(ShrinkError::InvalidTargetSize(_))
        ));
        assert!(CompressionRequest::new(10.0, 60.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_format_bitrate() {
        assert_eq!(format_bitrate(320), "320 kbps");
        assert_eq!(format_bitrate(32), "32 kbps");
    }
}
