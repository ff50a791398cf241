//! Completion endpoint settings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:1234/v1/completions";
pub const DEFAULT_MODEL: &str = "local-model";

/// Where and how to request completions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Full URL of the completions route.
    #[serde(default = "default_url")]
    pub url: String,

    /// Model identifier sent with each request.
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    DEFAULT_ENDPOINT_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EndpointConfig {
    pub fn url_is_valid(url: &str) -> bool {
        let Some(rest) = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
        else {
            return false;
        };
        if rest.is_empty() || rest.chars().any(char::is_whitespace) {
            return false;
        }
        let authority = rest.split('/').next().unwrap_or_default();
        let host = authority.split(':').next().unwrap_or_default();
        !host.is_empty()
    }

    /// Validate endpoint settings.
    pub fn validate(&self) -> Result<(), String> {
        if !Self::url_is_valid(&self.url) {
            return Err(format!("Invalid endpoint URL: {}", self.url));
        }
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }
        if self.max_tokens == 0 {
            return Err("Max tokens must be positive".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        if self.timeout_secs == 0 {
            return Err("Timeout must be at least one second".to_string());
        }
        Ok(())
    }
}
