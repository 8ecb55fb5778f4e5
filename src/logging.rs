//! Logging System
//!
//! Structured logging on top of `tracing`. Level, format and destination come
//! from `LoggingConfig`, with `MEMFS_LOG*` environment variables taking
//! precedence over the config file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub const DEFAULT_LOG_FILE: &str = "output.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log format: {0} (must be 'json' or 'text')")]
    InvalidFormat(String),
    #[error("invalid log output: {0} (must be 'stdout', 'stderr', 'file', 'file+stderr', or 'both')")]
    InvalidOutput(String),
    #[error("invalid log directive: {0}")]
    InvalidDirective(String),
    #[error("failed to open log file {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("logging already initialized: {0}")]
    Init(String),
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr, both
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Per-module levels, e.g. `memfs::fs = "trace"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "file".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            modules: HashMap::new(),
        }
    }
}

/// Resolve the log file path with precedence: CLI, MEMFS_LOG_FILE env, config file, default.
pub fn resolve_log_file_path(cli_file: Option<PathBuf>, config_file: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_file.filter(|p| !p.as_os_str().is_empty()) {
        return p;
    }
    if let Ok(env_path) = std::env::var("MEMFS_LOG_FILE") {
        if !env_path.is_empty() {
            return PathBuf::from(env_path);
        }
    }
    config_file
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

/// Initialize the global subscriber.
///
/// Priority order (highest to lowest):
/// 1. Environment variables (MEMFS_LOG, MEMFS_LOG_FORMAT, MEMFS_LOG_OUTPUT, MEMFS_LOG_FILE)
/// 2. `config`, which already carries the CLI level
/// 3. Defaults
///
/// The log file follows [`resolve_log_file_path`], so `cli_file` beats `MEMFS_LOG_FILE`.
pub fn init_logging(config: &LoggingConfig, cli_file: Option<PathBuf>) -> Result<(), LoggingError> {
    if !config.enabled {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(std::io::sink))
            .try_init()
            .map_err(|e| LoggingError::Init(e.to_string()));
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;
    let writer = make_writer(&output, cli_file, config)?;

    let base_subscriber = Registry::default().with(filter);
    let result = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(!output.file)
                    .with_writer(writer),
            )
            .try_init()
    };
    result.map_err(|e| LoggingError::Init(e.to_string()))
}

fn make_writer(
    output: &OutputDestinations,
    cli_file: Option<PathBuf>,
    config: &LoggingConfig,
) -> Result<BoxMakeWriter, LoggingError> {
    if output.file {
        let path = resolve_log_file_path(cli_file, config.file.clone());
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LoggingError::File { path, source })?;
        let file = Arc::new(file);
        return Ok(if output.stderr {
            BoxMakeWriter::new(file.and(std::io::stderr))
        } else {
            BoxMakeWriter::new(file)
        });
    }
    Ok(match (output.stdout, output.stderr) {
        (true, true) => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
        (false, true) => BoxMakeWriter::new(std::io::stderr),
        _ => BoxMakeWriter::new(std::io::stdout),
    })
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_env("MEMFS_LOG") {
        return Ok(filter);
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&config.level);
    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|_| LoggingError::InvalidDirective(directive.clone()))?,
        );
    }
    Ok(filter)
}

/// Determine output format from config or environment
fn determine_format(config: &LoggingConfig) -> Result<String, LoggingError> {
    if let Ok(format) = std::env::var("MEMFS_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    match config.format.as_str() {
        "json" | "text" => Ok(config.format.clone()),
        other => Err(LoggingError::InvalidFormat(other.to_string())),
    }
}

/// Output destinations
#[derive(Debug)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

/// Determine output destinations from config or environment
fn determine_output(config: &LoggingConfig) -> Result<OutputDestinations, LoggingError> {
    if let Ok(output) = std::env::var("MEMFS_LOG_OUTPUT") {
        return parse_output_destinations(&output);
    }
    parse_output_destinations(&config.output)
}

fn parse_output_destinations(output: &str) -> Result<OutputDestinations, LoggingError> {
    let (stdout, stderr, file) = match output {
        "stdout" => (true, false, false),
        "stderr" => (false, true, false),
        "file" => (false, false, true),
        "file+stderr" => (false, true, true),
        "both" => (true, true, false),
        _ => return Err(LoggingError::InvalidOutput(output.to_string())),
    };
    Ok(OutputDestinations { stdout, stderr, file })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logging_config() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, "text");
        assert_eq!(config.output, "file");
        assert_eq!(config.file, None);
        assert!(config.modules.is_empty());
    }

    #[test]
    fn test_parse_output_destinations() {
        let out = parse_output_destinations("stdout").unwrap();
        assert!(out.stdout);
        assert!(!out.stderr);
        assert!(!out.file);

        let out = parse_output_destinations("file+stderr").unwrap();
        assert!(!out.stdout);
        assert!(out.stderr);
        assert!(out.file);

        assert!(matches!(
            parse_output_destinations("syslog"),
            Err(LoggingError::InvalidOutput(_))
        ));
    }

    #[test]
    fn test_invalid_format_rejected() {
        let config = LoggingConfig {
            format: "xml".to_string(),
            ..LoggingConfig::default()
        };
        if std::env::var("MEMFS_LOG_FORMAT").is_err() {
            assert!(matches!(
                determine_format(&config),
                Err(LoggingError::InvalidFormat(_))
            ));
        }
    }

    #[test]
    fn test_module_directives() {
        let mut config = LoggingConfig::default();
        config.modules.insert("memfs::fs".to_string(), "trace".to_string());
        if std::env::var("MEMFS_LOG").is_err() {
            assert!(build_env_filter(&config).is_ok());
        }
    }

    #[test]
    fn test_file_writer_opens_cli_path_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            file: Some(dir.path().join("config.log")),
            ..LoggingConfig::default()
        };
        let output = parse_output_destinations("file").unwrap();
        make_writer(&output, Some(dir.path().join("cli.log")), &config).unwrap();
        assert!(dir.path().join("cli.log").exists());
        assert!(!dir.path().join("config.log").exists());
    }

    #[test]
    fn test_resolve_log_file_path_cli_wins() {
        let cli = Some(PathBuf::from("/tmp/cli.log"));
        let config = Some(PathBuf::from("/tmp/config.log"));
        assert_eq!(resolve_log_file_path(cli, config), PathBuf::from("/tmp/cli.log"));
    }

    #[test]
    fn test_resolve_log_file_path_env_then_config_then_default() {
        let config = Some(PathBuf::from("/tmp/config.log"));
        std::env::set_var("MEMFS_LOG_FILE", "/env/memfs.log");
        let from_env = resolve_log_file_path(None, config.clone());
        let from_cli = resolve_log_file_path(Some(PathBuf::from("/tmp/cli.log")), config.clone());
        std::env::remove_var("MEMFS_LOG_FILE");
        assert_eq!(from_env, PathBuf::from("/env/memfs.log"));
        assert_eq!(from_cli, PathBuf::from("/tmp/cli.log"));

        assert_eq!(resolve_log_file_path(None, config), PathBuf::from("/tmp/config.log"));
        assert_eq!(resolve_log_file_path(None, None), PathBuf::from(DEFAULT_LOG_FILE));
    }
}
