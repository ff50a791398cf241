//! ConfigLoader facade delegating to the merge service.

use super::merge::service::MergeService;
use super::AppConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration for `workspace_root`.
    pub fn load(workspace_root: &Path) -> Result<AppConfig, ApiError> {
        let config = MergeService::load(workspace_root).map_err(into_api_error)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from one explicit file; the global and
    /// workspace files are not read.
    pub fn load_from_file(path: &Path) -> Result<AppConfig, ApiError> {
        if !path.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = MergeService::load_from_file(path).map_err(into_api_error)?;
        config.validate()?;
        Ok(config)
    }
}

fn into_api_error(err: config::ConfigError) -> ApiError {
    ApiError::ConfigError(err.to_string())
}
