//! Logging setup.
//!
//! Log lines look like `2024-05-01 09:30:00,123 INFO: zazu <message>` and go to
//! standard error or to a log file. The level starts at INFO and moves one step
//! per `--verbose` / `--quiet` flag.

use chrono::{DateTime, Local};
use env_logger::{Builder, Env, Logger, Target};
use log::{Level, LevelFilter};
use std::fmt::Display;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ZazuError;

/// Environment variable that can override the computed log filter.
pub const LOG_ENV_VAR: &str = "ZAZU_LOG";

const LEVELS: [LevelFilter; 6] = [
    LevelFilter::Off,
    LevelFilter::Error,
    LevelFilter::Warn,
    LevelFilter::Info,
    LevelFilter::Debug,
    LevelFilter::Trace,
];

const BASE_LEVEL_INDEX: i32 = 3;

/// Computes the log level from the number of `-v` and `-q` flags.
///
/// # Example
///
/// ```rust
/// use log::LevelFilter;
/// use zazu::logging::level_from_verbosity;
///
/// assert_eq!(level_from_verbosity(0, 0), LevelFilter::Info);
/// assert_eq!(level_from_verbosity(1, 0), LevelFilter::Debug);
/// assert_eq!(level_from_verbosity(0, 2), LevelFilter::Error);
/// ```
pub fn level_from_verbosity(verbose: u8, quiet: u8) -> LevelFilter {
    let index = BASE_LEVEL_INDEX + i32::from(verbose) - i32::from(quiet);
    let index = index.clamp(0, LEVELS.len() as i32 - 1) as usize;
    LEVELS[index]
}

/// Level names as they appear in the log. WARN is spelled out.
fn level_label(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// Formats a single log line.
pub fn format_line(timestamp: &DateTime<Local>, level: Level, message: impl Display) -> String {
    format!(
        "{} {}: zazu {}",
        timestamp.format("%Y-%m-%d %H:%M:%S,%3f"),
        level_label(level),
        message
    )
}

/// Installs the global logger.
///
/// # Parameters
///
/// - `logfile`: Write to this file (created or truncated) instead of standard error
/// - `level`: The level computed by [`level_from_verbosity`]
///
/// # Errors
///
/// Returns [`ZazuError::Logging`] if the log file cannot be created or a logger
/// is already installed.
pub fn init_logging(logfile: Option<&Path>, level: LevelFilter) -> Result<(), ZazuError> {
    let logger = build_logger(logfile, level)?;
    let max_level = logger.filter();

    log::set_boxed_logger(Box::new(logger)).map_err(|e| ZazuError::Logging(e.to_string()))?;
    log::set_max_level(max_level);
    Ok(())
}

fn build_logger(logfile: Option<&Path>, level: LevelFilter) -> Result<Logger, ZazuError> {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .filter_module("hyper", level.min(LevelFilter::Info))
        .filter_module("reqwest", level.min(LevelFilter::Info))
        .parse_env(Env::new().filter(LOG_ENV_VAR))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}",
                format_line(&Local::now(), record.level(), record.args())
            )
        });

    match logfile {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                ZazuError::Logging(format!("cannot open log file {}: {}", path.display(), e))
            })?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    Ok(builder.build())
}
