//! Logging
//!
//! Structured logging through `tracing`. Level, format, and destination come
//! from configuration and may be overridden by `PROMPTSITE_LOG*` variables.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Resolve the log file path: the configured file, else the platform default.
pub fn resolve_log_file_path(config_file: Option<PathBuf>) -> Result<PathBuf, ApiError> {
    match config_file {
        Some(path) if !path.as_os_str().is_empty() => Ok(path),
        _ => default_log_file_path(),
    }
}

fn default_log_file_path() -> Result<PathBuf, ApiError> {
    let project_dirs = directories::ProjectDirs::from("", "promptsite", "promptsite").ok_or_else(|| {
        ApiError::ConfigError("Could not determine platform directories for log file".to_string())
    })?;
    let dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_local_dir())
        .to_path_buf();
    Ok(dir.join("promptsite.log"))
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr, both
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file; None means the platform default
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Colored output (text format on a terminal stream only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Per-module levels, e.g. `promptsite::generation = "debug"`
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
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
            color: default_true(),
            modules: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Fold `PROMPTSITE_LOG*` variables over this configuration.
    ///
    /// CLI flags are applied afterwards, so the full precedence is
    /// CLI, environment, config file, defaults.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = lookup("PROMPTSITE_LOG").filter(|v| !v.trim().is_empty()) {
            self.level = level;
        }
        if let Some(format) = lookup("PROMPTSITE_LOG_FORMAT") {
            if parse_format(&format).is_ok() {
                self.format = format;
            }
        }
        if let Some(output) = lookup("PROMPTSITE_LOG_OUTPUT") {
            self.output = output;
        }
        if let Some(file) = lookup("PROMPTSITE_LOG_FILE").filter(|v| !v.is_empty()) {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(modules) = lookup("PROMPTSITE_LOG_MODULES") {
            for spec in modules.split(',') {
                if let Some((module, level)) = spec.split_once('=') {
                    self.modules
                        .insert(module.trim().to_string(), level.trim().to_string());
                }
            }
        }
        self
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        parse_format(&self.format)?;
        parse_output_destinations(&self.output)?;
        let is_plain_level = matches!(
            self.level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error" | "off"
        );
        // PROMPTSITE_LOG may carry a full filter such as "warn,promptsite=debug".
        if !is_plain_level && (!self.level.contains('=') || EnvFilter::try_new(&self.level).is_err()) {
            return Err(ApiError::ConfigError(format!(
                "Invalid log level: {} (must be trace, debug, info, warn, error, or off)",
                self.level
            )));
        }
        Ok(())
    }
}

/// Initialize the global subscriber from a fully resolved configuration
/// (see [`LoggingConfig::with_env_overrides`]).
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApiError> {
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = parse_format(&config.format)?;
    let output = parse_output_destinations(&config.output)?;
    let writer = build_writer(&output, config)?;
    let use_color = config.color && !output.file;

    let layer = fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(writer);
    let registry = Registry::default().with(filter);

    let result = match format {
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Text => registry.with(layer.with_ansi(use_color)).try_init(),
    };
    result.map_err(|e| ApiError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

fn build_writer(output: &OutputDestinations, config: &LoggingConfig) -> Result<BoxMakeWriter, ApiError> {
    if output.file {
        let file = open_log_file(config)?;
        return Ok(if output.stderr {
            BoxMakeWriter::new(file.and(std::io::stderr))
        } else {
            BoxMakeWriter::new(file)
        });
    }
    Ok(match (output.stdout, output.stderr) {
        (true, true) => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
        (true, false) => BoxMakeWriter::new(std::io::stdout),
        _ => BoxMakeWriter::new(std::io::stderr),
    })
}

fn open_log_file(config: &LoggingConfig) -> Result<std::sync::Arc<std::fs::File>, ApiError> {
    let log_file = resolve_log_file_path(config.file.clone())?;
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ApiError::ConfigError(format!("Failed to create log directory: {}", e)))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| ApiError::ConfigError(format!("Failed to open log file {:?}: {}", log_file, e)))?;
    Ok(std::sync::Arc::new(file))
}

/// Build the filter from the configured level and per-module levels
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ApiError> {
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| ApiError::ConfigError(format!("Invalid log filter '{}': {}", config.level, e)))?;
    for (module, level) in &config.modules {
        let directive = format!("{}={}", module, level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| ApiError::ConfigError(format!("Invalid log directive '{}': {}", directive, e)))?,
        );
    }
    Ok(filter)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Json,
    Text,
}

fn parse_format(format: &str) -> Result<LogFormat, ApiError> {
    match format {
        "json" => Ok(LogFormat::Json),
        "text" => Ok(LogFormat::Text),
        other => Err(ApiError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

/// Output destinations
#[derive(Debug, PartialEq, Eq)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

fn parse_output_destinations(output: &str) -> Result<OutputDestinations, ApiError> {
    let (stdout, stderr, file) = match output {
        "stdout" => (true, false, false),
        "stderr" => (false, true, false),
        "file" => (false, false, true),
        "file+stderr" => (false, true, true),
        "both" => (true, true, false),
        _ => {
            return Err(ApiError::ConfigError(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'file', 'file+stderr', or 'both')",
                output
            )))
        }
    };
    Ok(OutputDestinations { stdout, stderr, file })
}
