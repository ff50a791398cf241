//! Per-user config file under the XDG config home.

use crate::config::paths::xdg_root::global_config_path;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use tracing::debug;

/// Add `$XDG_CONFIG_HOME/promptsite/config.toml` when it can be located.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match global_config_path() {
        Ok(path) => {
            debug!(path = %path.display(), "Global config source");
            Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(false)))
        }
        Err(_) => Ok(builder),
    }
}
