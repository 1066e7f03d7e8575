//! audio-shrink
//!
//! Compresses an audio file to fit under a target size by picking the
//! highest standard MP3 bitrate that fits and re-encoding with ffmpeg.

mod audio;
mod compress;
mod config;
mod conversion;
mod core;
mod error;
mod logging;
mod test_fixtures;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use compress::{compress, CompressionJob, CompressionReport};
use config::ShrinkSettings;
use conversion::FfmpegBackend;
use error::{Result, ShrinkError};

/// Compress audio files to a target size
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the input audio file
    input_file: PathBuf,
    /// Path to save the compressed output file (default: same as input with .mp3 extension)
    output_file: Option<PathBuf>,
    /// Target size in MB (default: 199)
    target_size: Option<f64>,
    /// Path to the ffmpeg binary
    #[arg(long)]
    ffmpeg: Option<PathBuf>,
    /// Settings file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
    /// Show more log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::debug!("Run failed: {:?}", e);
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run one compression; `Ok(false)` means the output missed the target
fn run(args: &Args) -> Result<bool> {
    let mut settings = match &args.config {
        Some(path) => ShrinkSettings::load_from(path)?,
        None => ShrinkSettings::load(),
    };
    if let Some(ffmpeg) = &args.ffmpeg {
        settings.ffmpeg_path = Some(ffmpeg.clone());
    }

    let job = CompressionJob {
        input: args.input_file.clone(),
        output: args.output_file.clone(),
        target_size_mb: args.target_size.unwrap_or(settings.target_size_mb),
    };

    // Report a missing input before complaining about a missing encoder
    if !job.input.is_file() {
        return Err(ShrinkError::InputNotFound(job.input.clone()));
    }

    let ffmpeg = conversion::get_ffmpeg_path(settings.ffmpeg_path.as_deref())?;
    let backend = FfmpegBackend::new(ffmpeg, settings.encoder.clone());

    let report = compress(&job, &settings, &backend)?;
    Ok(finish(&report))
}

/// The shortcut path always succeeds; planned runs must land under the target
fn succeeded(report: &CompressionReport) -> bool {
    report.took_shortcut() || report.within_target()
}

/// Print the outcome of a run and return whether it succeeded
fn finish(report: &CompressionReport) -> bool {
    if report.took_shortcut() {
        return true;
    }

    report.print_summary();
    if let (Some(estimated), Some(duration)) = (report.estimated_size_mb, report.duration_seconds) {
        log::debug!(
            "Estimated {:.2} MB for {:.1}s, produced {:.2} MB",
            estimated,
            duration,
            report.output_size_mb
        );
    }

    if succeeded(report) {
        println!(
            "Success! Output file is {:.2} MB below target.",
            report.margin_mb()
        );
        true
    } else {
        println!(
            "Warning: Output file is {:.2} MB above target size.",
            -report.margin_mb()
        );
        println!("Consider using a lower bitrate manually.");
        log::warn!(
            "Output {} exceeds target {:.2} MB",
            report.output_path.display(),
            report.target_size_mb
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EncodingDecision;

    fn report(output_size_mb: f64, decision: EncodingDecision) -> CompressionReport {
        CompressionReport {
            input_path: PathBuf::from("in.wav"),
            output_path: PathBuf::from("in.mp3"),
            input_size_mb: 500.0,
            output_size_mb,
            target_size_mb: 199.0,
            duration_seconds: Some(3600.0),
            estimated_size_mb: Some(137.3),
            decision,
        }
    }

    #[test]
    fn test_parse_positional_args() {
        let args = Args::try_parse_from(["audio-shrink", "in.m4a", "out.mp3", "180"]).unwrap();
        assert_eq!(args.input_file, PathBuf::from("in.m4a"));
        assert_eq!(args.output_file, Some(PathBuf::from("out.mp3")));
        assert_eq!(args.target_size, Some(180.0));
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_parse_input_only() {
        let args = Args::try_parse_from(["audio-shrink", "in.m4a"]).unwrap();
        assert_eq!(args.output_file, None);
        assert_eq!(args.target_size, None);
        assert!(args.ffmpeg.is_none());
    }

    #[test]
    fn test_parse_options() {
        let args = Args::try_parse_from([
            "audio-shrink",
            "-vv",
            "--ffmpeg",
            "/opt/bin/ffmpeg",
            "--config",
            "shrink.json",
            "in.m4a",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.ffmpeg, Some(PathBuf::from("/opt/bin/ffmpeg")));
        assert_eq!(args.config, Some(PathBuf::from("shrink.json")));
    }

    #[test]
    fn test_parse_rejects_bad_target() {
        assert!(Args::try_parse_from(["audio-shrink", "in.m4a", "out.mp3", "big"]).is_err());
        assert!(Args::try_parse_from(["audio-shrink"]).is_err());
    }

    #[test]
    fn test_run_missing_input() {
        let args = Args::try_parse_from(["audio-shrink", "/nonexistent/in.m4a"]).unwrap();
        let result = run(&args);
        assert!(matches!(result, Err(ShrinkError::InputNotFound(_))));
    }

    #[test]
    fn test_succeeded() {
        assert!(succeeded(&report(150.0, EncodingDecision::ConvertAt(320))));
        assert!(succeeded(&report(199.0, EncodingDecision::ConvertAt(320))));
        assert!(!succeeded(&report(205.0, EncodingDecision::ConvertAt(320))));
        // Shortcut succeeds even if re-encoding grew the file
        assert!(succeeded(&report(205.0, EncodingDecision::Passthrough(320))));
    }
}
