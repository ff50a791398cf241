//! Environment variable source: PROMPTSITE__ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `PROMPTSITE__ENDPOINT__URL` sets `endpoint.url`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("PROMPTSITE")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    ))
}
