//! Error types for promptsite operations.

use thiserror::Error;

/// Errors surfaced by library operations and the CLI.
///
/// Generation failures against the completion endpoint are not reported
/// through this type once they reach the orchestrator; they are converted
/// into a fallback project there. The provider variant only travels between
/// the HTTP client and the orchestrator.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider returned HTTP status {0}")]
    ProviderStatus(u16),

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    #[error("Invalid project: {0}")]
    InvalidProject(String),

    #[error("Preview error: {0}")]
    PreviewError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
