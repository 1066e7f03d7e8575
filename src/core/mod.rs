//! Core size and bitrate logic
//!
//! This module contains:
//! - Bitrate selection for fitting a file under a target size
//! - Output size estimation
//! - File size measurement and formatting

mod bitrate;
mod sizes;

pub use bitrate::{
    format_bitrate, is_under_target, plan, target_kbps, validate_target_size, CompressionRequest,
    EncodingDecision, MAX_BITRATE,
};
pub use sizes::{file_size_mb, format_duration, format_mb};
