//! HTTP client for the completion endpoint.

use super::endpoint::EndpointConfig;
use super::request::{CompletionRequest, CompletionResponse};
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::debug;

/// Anything that can answer one completion request.
///
/// Errors are classified: `ProviderError` for transport failures,
/// `ProviderStatus` for non-success HTTP status, `InvalidResponse` for a body
/// that is not the expected JSON.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, ApiError>;
}

/// `reqwest`-backed client posting JSON to the configured URL.
pub struct HttpCompletionClient {
    client: reqwest::Client,
    url: String,
}

impl HttpCompletionClient {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()
            .map_err(|e| ApiError::ProviderError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: endpoint.url.clone(),
        })
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, ApiError> {
        debug!(url = %self.url, model = %request.model, "Sending completion request");
        let response = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::ProviderError(format!("Request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::ProviderStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::ProviderError(format!("Failed to read response body: {}", e)))?;
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}
