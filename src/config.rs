//! Compression settings
//!
//! Defaults can be overridden by a JSON file at
//! `<config dir>/AudioShrink/settings.json` (or a path passed with
//! `--config`), and then by command-line arguments.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::MAX_BITRATE;
use crate::error::{Result, ShrinkError};

/// Default target size in MB
pub const DEFAULT_TARGET_SIZE_MB: f64 = 199.0;

/// Settings for a compression run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShrinkSettings {
    /// Maximum output size in MB
    pub target_size_mb: f64,
    /// Extension of generated output files
    pub output_extension: String,
    /// ffmpeg audio encoder name
    pub encoder: String,
    /// Bitrate used when the input is already under the target size
    pub passthrough_bitrate: u32,
    /// Explicit ffmpeg binary; searched for when absent
    pub ffmpeg_path: Option<PathBuf>,
}

impl Default for ShrinkSettings {
    fn default() -> Self {
        Self {
            target_size_mb: DEFAULT_TARGET_SIZE_MB,
            output_extension: "mp3".to_string(),
            encoder: "libmp3lame".to_string(),
            passthrough_bitrate: MAX_BITRATE,
            ffmpeg_path: None,
        }
    }
}

impl ShrinkSettings {
    const SETTINGS_FILE: &'static str = "settings.json";

    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("AudioShrink").join(Self::SETTINGS_FILE))
    }

    /// Load settings from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::debug!("No config directory, using default settings");
            return Self::default();
        };

        if !path.exists() {
            log::debug!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from an explicit file; a missing file is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ShrinkError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let settings = Self::from_json(&contents)?;
        log::debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    fn from_json(contents: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(contents)
            .map_err(|e| ShrinkError::Config(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        crate::core::validate_target_size(self.target_size_mb)?;
        if self.output_extension.is_empty() || self.output_extension.contains(['/', '.']) {
            return Err(ShrinkError::Config(format!(
                "invalid output extension '{}'",
                self.output_extension
            )));
        }
        if self.encoder.is_empty() {
            return Err(ShrinkError::Config("encoder must not be empty".to_string()));
        }
        if self.passthrough_bitrate == 0 {
            return Err(ShrinkError::Config(
                "passthrough bitrate must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
