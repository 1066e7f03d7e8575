//! Audio conversion module
//!
//! Handles transcoding audio files using ffmpeg, behind the
//! [`MediaBackend`] trait.

mod backend;
mod ffmpeg;

pub use backend::{FfmpegBackend, MediaBackend};

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{Result, ShrinkError};

#[cfg(windows)]
const FFMPEG_BINARY: &str = "ffmpeg.exe";
#[cfg(not(windows))]
const FFMPEG_BINARY: &str = "ffmpeg";

/// Get the path to the ffmpeg binary
///
/// Search order:
/// 1. An explicit path from the command line or settings
/// 2. `resources/bin/ffmpeg` next to the executable (bundled builds)
/// 3. Each directory on `PATH`
pub fn get_ffmpeg_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return verify_ffmpeg(path);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let bundled = exe_dir.join("resources").join("bin").join(FFMPEG_BINARY);
            if is_executable(&bundled) {
                log::debug!("Found ffmpeg at bundled path: {:?}", bundled);
                return Ok(bundled);
            }
        }
    }

    if let Some(path_var) = std::env::var_os("PATH") {
        if let Some(found) = find_in_path(FFMPEG_BINARY, &path_var) {
            log::debug!("Found ffmpeg on PATH: {:?}", found);
            return Ok(found);
        }
    }

    Err(ShrinkError::EncoderNotFound(
        "install ffmpeg or pass --ffmpeg <path>".to_string(),
    ))
}

/// Search a `PATH`-style list of directories for an executable
pub fn find_in_path(binary: &str, path_var: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .map(|dir| dir.join(binary))
        .find(|candidate| is_executable(candidate))
}

/// Verify that ffmpeg exists and is executable
pub fn verify_ffmpeg(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(ShrinkError::EncoderNotFound(format!(
            "no file at {}",
            path.display()
        )));
    }
    if !is_executable(path) {
        return Err(ShrinkError::EncoderNotFound(format!(
            "{} is not executable",
            path.display()
        )));
    }
    log::debug!("ffmpeg verified at: {:?}", path);
    Ok(path.to_path_buf())
}

fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// Default output path: the input's directory and stem with a new extension
pub fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    let file_stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let file_name = format!("{}.{}", file_stem, extension);

    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_fake_binary(dir: &Path, name: &str, executable: bool) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = if executable { 0o755 } else { 0o644 };
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
        }
        #[cfg(not(unix))]
        let _ = executable;
        path
    }

    #[test]
    fn test_default_output_path_swaps_extension() {
        assert_eq!(
            default_output_path(Path::new("/music/podcast.m4a"), "mp3"),
            PathBuf::from("/music/podcast.mp3")
        );
        assert_eq!(
            default_output_path(Path::new("talk.wav"), "mp3"),
            PathBuf::from("talk.mp3")
        );
        assert_eq!(
            default_output_path(Path::new("dir/live.set.flac"), "ogg"),
            PathBuf::from("dir/live.set.ogg")
        );
    }

    #[test]
    fn test_find_in_path_finds_executable() {
        let empty = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        let expected = write_fake_binary(bin.path(), "ffmpeg", true);

        let path_var = std::env::join_paths([empty.path(), bin.path()]).unwrap();
        assert_eq!(find_in_path("ffmpeg", &path_var), Some(expected));
    }

    #[test]
    fn test_find_in_path_missing() {
        let empty = TempDir::new().unwrap();
        let path_var = std::env::join_paths([empty.path()]).unwrap();
        assert_eq!(find_in_path("ffmpeg", &path_var), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_find_in_path_skips_non_executable() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_fake_binary(first.path(), "ffmpeg", false);
        let expected = write_fake_binary(second.path(), "ffmpeg", true);

        let path_var = std::env::join_paths([first.path(), second.path()]).unwrap();
        assert_eq!(find_in_path("ffmpeg", &path_var), Some(expected));
    }

    #[test]
    fn test_explicit_path_is_verified() {
        let dir = TempDir::new().unwrap();
        let ffmpeg = write_fake_binary(dir.path(), "my-ffmpeg", true);

        assert_eq!(get_ffmpeg_path(Some(&ffmpeg)).unwrap(), ffmpeg);

        let missing = dir.path().join("nope");
        assert!(matches!(
            get_ffmpeg_path(Some(&missing)),
            Err(ShrinkError::EncoderNotFound(_))
        ));
    }
}
