//! Configuration
//!
//! Layered settings for the completion endpoint, logging, and export.
//! Precedence from lowest to highest: built-in defaults, the global file
//! (`$XDG_CONFIG_HOME/promptsite/config.toml`), the workspace file
//! (`promptsite.toml`), then `PROMPTSITE__SECTION__KEY` variables.

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root::{config_home, global_config_path};
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

use crate::error::ApiError;
use crate::export::DEFAULT_ARCHIVE_NAME;
use crate::generation::EndpointConfig;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Archive file name written by export
    #[serde(default = "default_archive_name")]
    pub file_name: String,
}

fn default_archive_name() -> String {
    DEFAULT_ARCHIVE_NAME.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_archive_name(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ApiError> {
        self.endpoint.validate().map_err(ApiError::ConfigError)?;
        self.logging.validate()?;

        let name = &self.export.file_name;
        if name.trim().is_empty() || name.contains('/') || name.contains('\\') {
            return Err(ApiError::ConfigError(format!(
                "Invalid export file name: {}",
                name
            )));
        }
        Ok(())
    }

    /// Render as TOML, as `config show` prints it.
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))
    }
}
