//! Logging configuration for audio-shrink
//!
//! Logs go to the terminal and to a file at
//! `<local data dir>/AudioShrink/logs/audio-shrink.log`.
//! Progress and results are printed to stdout separately; the terminal
//! logger only shows warnings unless `-v` is given.

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

const LOG_FILE: &str = "audio-shrink.log";

/// Rotate the log once it grows past this many bytes
const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;

/// Get the log directory path
pub fn get_log_directory() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("AudioShrink").join("logs"))
}

/// Terminal level for a `-v` count
pub fn terminal_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn log_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build()
}

/// Initialize the logging system
///
/// Sets up combined logging to:
/// - Terminal (level chosen by `verbosity`)
/// - File (debug and above)
///
/// Returns the path to the log file on success
pub fn init_logging(verbosity: u8) -> Option<PathBuf> {
    let term_level = terminal_level(verbosity);

    let Some(log_dir) = get_log_directory() else {
        init_terminal_only(term_level);
        return None;
    };

    if let Err(e) = fs::create_dir_all(&log_dir) {
        init_terminal_only(term_level);
        log::warn!("Could not create log directory: {}", e);
        return None;
    }

    let log_path = log_dir.join(LOG_FILE);

    if let Ok(metadata) = fs::metadata(&log_path) {
        if metadata.len() > MAX_LOG_BYTES {
            let _ = fs::rename(&log_path, log_dir.join(format!("{}.old", LOG_FILE)));
        }
    }

    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            init_terminal_only(term_level);
            log::warn!("Could not open log file: {}", e);
            return None;
        }
    };

    let config = log_config();
    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(term_level, config.clone(), TerminalMode::Stderr, ColorChoice::Auto),
        WriteLogger::new(LevelFilter::Debug, config, log_file),
    ];

    if CombinedLogger::init(loggers).is_err() {
        eprintln!("Warning: Logger already initialized");
    }

    log::debug!("=== audio-shrink session started ===");
    log::debug!("Log file: {}", log_path.display());

    Some(log_path)
}

/// Initialize terminal-only logging (fallback if file logging fails)
fn init_terminal_only(level: LevelFilter) {
    let loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        log_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    let _ = CombinedLogger::init(loggers);
}
