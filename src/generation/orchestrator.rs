//! One-shot generation with atomic fallback.

use super::client::CompletionClient;
use super::endpoint::EndpointConfig;
use super::extract::extract_project;
use super::fallback::{landing_demo, offline_demo};
use super::request::CompletionRequest;
use crate::error::ApiError;
use crate::types::Project;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Why a generation fell back to a demo project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// Endpoint unreachable, timed out, or the body could not be read.
    Network { detail: String },
    /// Endpoint answered with a non-success status.
    Status { code: u16 },
    /// Body was not the expected top-level JSON.
    InvalidBody { detail: String },
    /// Completion text held no usable project.
    InvalidProject { detail: String },
}

impl FailureKind {
    fn from_client_error(err: ApiError) -> Self {
        match err {
            ApiError::ProviderStatus(code) => FailureKind::Status { code },
            ApiError::InvalidResponse(detail) => FailureKind::InvalidBody { detail },
            other => FailureKind::Network {
                detail: other.to_string(),
            },
        }
    }

    /// Whether the endpoint produced a readable answer that just was not a
    /// usable project.
    pub fn answered(&self) -> bool {
        matches!(
            self,
            FailureKind::InvalidBody { .. } | FailureKind::InvalidProject { .. }
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network { detail } => write!(f, "completion endpoint unavailable ({})", detail),
            FailureKind::Status { code } => write!(f, "completion endpoint returned HTTP {}", code),
            FailureKind::InvalidBody { detail } => write!(f, "response body is not valid JSON ({})", detail),
            FailureKind::InvalidProject { detail } => write!(f, "model output is not a valid project ({})", detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum GenerationSource {
    Model,
    Fallback { reason: FailureKind },
}

/// Result of one generation: always carries an installable project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub project: Project,
    #[serde(flatten)]
    pub source: GenerationSource,
}

impl GenerationOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, GenerationSource::Fallback { .. })
    }

    /// Demo project chosen for `reason`: the landing page when the endpoint
    /// answered with unusable output, the offline page when it could not be
    /// used at all.
    pub fn fallback(prompt: &str, reason: FailureKind) -> Self {
        let project = if reason.answered() {
            landing_demo(prompt)
        } else {
            offline_demo()
        };
        Self {
            project,
            source: GenerationSource::Fallback { reason },
        }
    }
}

/// Drives one completion request and turns every failure into a fallback.
pub struct Generator<C: CompletionClient> {
    client: C,
    endpoint: EndpointConfig,
}

impl<C: CompletionClient> Generator<C> {
    pub fn new(client: C, endpoint: EndpointConfig) -> Self {
        Self { client, endpoint }
    }

    pub async fn generate(&self, prompt: &str) -> GenerationOutcome {
        let request = CompletionRequest::for_prompt(&self.endpoint, prompt);
        match self.try_generate(&request).await {
            Ok(project) => {
                info!(files = project.files.len(), entry = %project.entry, "Generated project from model");
                GenerationOutcome {
                    project,
                    source: GenerationSource::Model,
                }
            }
            Err(reason) => {
                warn!(reason = %reason, "Generation failed; installing demo project");
                GenerationOutcome::fallback(prompt, reason)
            }
        }
    }

    async fn try_generate(&self, request: &CompletionRequest) -> Result<Project, FailureKind> {
        let response = self
            .client
            .complete(request)
            .await
            .map_err(FailureKind::from_client_error)?;
        let text = response.first_text().ok_or_else(|| FailureKind::InvalidBody {
            detail: "response has no choices".to_string(),
        })?;
        extract_project(text).map_err(|e| FailureKind::InvalidProject {
            detail: e.to_string(),
        })
    }
}
