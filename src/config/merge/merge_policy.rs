//! Built-in defaults that every merge starts from.

use crate::export::DEFAULT_ARCHIVE_NAME;
use crate::generation::endpoint::{DEFAULT_ENDPOINT_URL, DEFAULT_MODEL};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the default value of every key.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("endpoint.url", DEFAULT_ENDPOINT_URL)?
        .set_default("endpoint.model", DEFAULT_MODEL)?
        .set_default("endpoint.max_tokens", 2000i64)?
        .set_default("endpoint.temperature", 0.7f64)?
        .set_default("endpoint.timeout_secs", 120i64)?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("export.file_name", DEFAULT_ARCHIVE_NAME)
}
