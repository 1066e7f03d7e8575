//! Single-file compression workflow
//!
//! Measures the input, skips planning when it already fits, otherwise
//! probes its duration and picks a bitrate, then hands the encode to a
//! [`MediaBackend`] and measures what came out.

use std::path::{Path, PathBuf};

use crate::config::ShrinkSettings;
use crate::conversion::{default_output_path, MediaBackend};
use crate::core::{
    file_size_mb, format_bitrate, format_duration, format_mb, is_under_target, plan, target_kbps,
    validate_target_size, CompressionRequest, EncodingDecision,
};
use crate::error::{Result, ShrinkError};

/// One compression run as requested on the command line
#[derive(Debug, Clone)]
pub struct CompressionJob {
    pub input: PathBuf,
    /// Explicit output path; derived from the input when absent
    pub output: Option<PathBuf>,
    pub target_size_mb: f64,
}

/// What happened during a compression run
#[derive(Debug, Clone)]
pub struct CompressionReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub input_size_mb: f64,
    pub output_size_mb: f64,
    pub target_size_mb: f64,
    /// Probed duration; not measured when the input already fit
    pub duration_seconds: Option<f64>,
    /// Planner's size estimate at the chosen bitrate
    pub estimated_size_mb: Option<f64>,
    pub decision: EncodingDecision,
}

impl CompressionReport {
    /// Input size divided by output size
    pub fn compression_ratio(&self) -> Option<f64> {
        (self.output_size_mb > 0.0).then(|| self.input_size_mb / self.output_size_mb)
    }

    pub fn within_target(&self) -> bool {
        self.output_size_mb <= self.target_size_mb
    }

    /// Positive when under the target, negative when over it
    pub fn margin_mb(&self) -> f64 {
        self.target_size_mb - self.output_size_mb
    }

    pub fn took_shortcut(&self) -> bool {
        matches!(self.decision, EncodingDecision::Passthrough(_))
    }

    /// Print the results block shown after a planned compression
    pub fn print_summary(&self) {
        println!("\nCompression Results:");
        println!(
            "Input file: {} ({})",
            self.input_path.display(),
            format_mb(self.input_size_mb)
        );
        println!(
            "Output file: {} ({})",
            self.output_path.display(),
            format_mb(self.output_size_mb)
        );
        match self.compression_ratio() {
            Some(ratio) => println!("Compression ratio: {:.2}x", ratio),
            None => println!("Compression ratio: n/a"),
        }
        println!("Used bitrate: {}", format_bitrate(self.decision.bitrate()));
    }
}

/// Resolve the output path, deriving it from the input when not given
fn resolve_output(job: &CompressionJob, settings: &ShrinkSettings) -> PathBuf {
    match &job.output {
        Some(path) => path.clone(),
        None => {
            let path = default_output_path(&job.input, &settings.output_extension);
            println!("No output file specified. Using: {}", path.display());
            path
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Re-encode `input` into `output`
///
/// When both name the same file, the encoder writes a sibling temp file
/// which replaces the input only after a successful encode.
fn encode_to<B: MediaBackend + ?Sized>(
    backend: &B,
    input: &Path,
    output: &Path,
    bitrate: u32,
) -> Result<()> {
    if !same_file(input, output) {
        return backend.reencode(input, output, bitrate);
    }

    let dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let suffix = output
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let temp_path = tempfile::Builder::new()
        .prefix(".audio-shrink-")
        .suffix(&suffix)
        .tempfile_in(dir)?
        .into_temp_path();

    log::info!(
        "Output is the input file; encoding via {} before replacing it",
        temp_path.display()
    );
    backend.reencode(input, &temp_path, bitrate)?;
    temp_path.persist(output).map_err(|e| ShrinkError::Io(e.error))?;
    Ok(())
}

/// Compress `job.input` so the output fits under `job.target_size_mb`
pub fn compress<B: MediaBackend + ?Sized>(
    job: &CompressionJob,
    settings: &ShrinkSettings,
    backend: &B,
) -> Result<CompressionReport> {
    if !job.input.is_file() {
        return Err(ShrinkError::InputNotFound(job.input.clone()));
    }
    validate_target_size(job.target_size_mb)?;
    let output_path = resolve_output(job, settings);

    let input_size_mb = file_size_mb(&job.input)?;
    println!("Input file size: {}", format_mb(input_size_mb));

    if is_under_target(input_size_mb, job.target_size_mb) {
        println!(
            "Input file is already smaller than target size ({})",
            format_mb(job.target_size_mb)
        );
        println!(
            "Copying file to {} without compression...",
            output_path.display()
        );

        let decision = EncodingDecision::Passthrough(settings.passthrough_bitrate);
        encode_to(backend, &job.input, &output_path, decision.bitrate())?;
        let output_size_mb = file_size_mb(&output_path)?;
        println!("Output file size: {}", format_mb(output_size_mb));

        return Ok(CompressionReport {
            input_path: job.input.clone(),
            output_path,
            input_size_mb,
            output_size_mb,
            target_size_mb: job.target_size_mb,
            duration_seconds: None,
            estimated_size_mb: None,
            decision,
        });
    }

    println!("Analyzing audio duration...");
    let duration = backend.duration(&job.input)?;
    println!(
        "Audio duration: {:.2} seconds ({:.2} minutes)",
        duration,
        duration / 60.0
    );

    let request = CompressionRequest::new(input_size_mb, duration, job.target_size_mb)?;
    let planned = plan(&request);
    log::debug!(
        "Target bitrate {:.1} kbps for {} -> {} ({} estimated)",
        target_kbps(duration, job.target_size_mb),
        format_duration(duration),
        format_bitrate(planned.chosen_bitrate_kbps),
        format_mb(planned.output_size_mb)
    );
    println!(
        "Calculated target bitrate: {}",
        format_bitrate(planned.chosen_bitrate_kbps)
    );

    let decision = EncodingDecision::ConvertAt(planned.chosen_bitrate_kbps);
    println!(
        "Compressing {} with bitrate {}kbps...",
        job.input.display(),
        decision.bitrate()
    );
    encode_to(backend, &job.input, &output_path, decision.bitrate())?;

    let output_size_mb = file_size_mb(&output_path)?;
    log::info!(
        "Compressed {} to {} at {}",
        format_mb(input_size_mb),
        format_mb(output_size_mb),
        format_bitrate(decision.bitrate())
    );

    Ok(CompressionReport {
        input_path: job.input.clone(),
        output_path,
        input_size_mb,
        output_size_mb,
        target_size_mb: job.target_size_mb,
        duration_seconds: Some(duration),
        estimated_size_mb: Some(planned.output_size_mb),
        decision,
    })
}
