//! Logging System
//!
//! Structured logging via `tracing`. Level, format, and destination come
//! from CLI flags with `ORBIT_LOG*` environment variables taking precedence,
//! so a misbehaving install can be diagnosed without touching scripts.

use crate::error::ApiError;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging options assembled from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct LoggingOptions {
    /// trace, debug, info, warn, error, off
    pub level: Option<String>,
    /// json or text
    pub format: Option<String>,
    /// stderr, stdout, or file
    pub output: Option<String>,
    /// Log file path when output is "file"
    pub file: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
enum Destination {
    Stderr,
    Stdout,
    File,
}

/// Initialize the logging system.
///
/// Precedence, highest first: `ORBIT_LOG` / `ORBIT_LOG_FORMAT` /
/// `ORBIT_LOG_OUTPUT` / `ORBIT_LOG_FILE` env vars, then CLI flags, then
/// defaults (warn, text, stderr).
pub fn init_logging(options: &LoggingOptions) -> Result<(), ApiError> {
    let filter = build_env_filter(options)?;
    let format = resolve_format(options)?;
    let destination = resolve_destination(options)?;

    let base = Registry::default().with(filter);
    match destination {
        Destination::File => {
            let path = resolve_log_file_path(options)?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ApiError::Config(format!("failed to create log directory: {}", e))
                })?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    ApiError::Config(format!("failed to open log file {}: {}", path.display(), e))
                })?;
            if format == "json" {
                base.with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(file),
                )
                .init();
            } else {
                base.with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(false)
                        .with_writer(file),
                )
                .init();
            }
        }
        Destination::Stderr => {
            if format == "json" {
                base.with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stderr),
                )
                .init();
            } else {
                base.with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stderr),
                )
                .init();
            }
        }
        Destination::Stdout => {
            if format == "json" {
                base.with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stdout),
                )
                .init();
            } else {
                base.with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stdout),
                )
                .init();
            }
        }
    }
    Ok(())
}

fn build_env_filter(options: &LoggingOptions) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env("ORBIT_LOG") {
        return Ok(filter);
    }
    let level = options.level.as_deref().unwrap_or("warn");
    EnvFilter::try_new(level)
        .map_err(|e| ApiError::Config(format!("invalid log level \"{}\": {}", level, e)))
}

fn resolve_format(options: &LoggingOptions) -> Result<String, ApiError> {
    let format = std::env::var("ORBIT_LOG_FORMAT")
        .ok()
        .or_else(|| options.format.clone())
        .unwrap_or_else(|| "text".to_string());
    match format.as_str() {
        "json" | "text" => Ok(format),
        other => Err(ApiError::Config(format!(
            "invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

fn resolve_destination(options: &LoggingOptions) -> Result<Destination, ApiError> {
    let output = std::env::var("ORBIT_LOG_OUTPUT")
        .ok()
        .or_else(|| options.output.clone())
        .unwrap_or_else(|| "stderr".to_string());
    match output.as_str() {
        "stderr" => Ok(Destination::Stderr),
        "stdout" => Ok(Destination::Stdout),
        "file" => Ok(Destination::File),
        other => Err(ApiError::Config(format!(
            "invalid log output: {} (must be 'stderr', 'stdout', or 'file')",
            other
        ))),
    }
}

/// File path precedence: `ORBIT_LOG_FILE`, CLI flag, platform state dir.
fn resolve_log_file_path(options: &LoggingOptions) -> Result<PathBuf, ApiError> {
    if let Ok(env_path) = std::env::var("ORBIT_LOG_FILE") {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    if let Some(p) = &options.file {
        if !p.as_os_str().is_empty() {
            return Ok(p.clone());
        }
    }
    let dirs = directories::ProjectDirs::from("", "orbit", "orbit").ok_or_else(|| {
        ApiError::Config("could not determine platform state directory for log file".to_string())
    })?;
    let state_dir = dirs
        .state_dir()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| dirs.data_local_dir().to_path_buf());
    Ok(state_dir.join("orbit.log"))
}
