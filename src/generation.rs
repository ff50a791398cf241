//! Website Generation
//!
//! Sends one completion request to a local LLM endpoint, extracts the
//! project JSON from the returned text, and substitutes a built-in demo
//! project when any step fails. Callers always receive a well-formed
//! project.

pub mod client;
pub mod endpoint;
pub mod extract;
pub mod fallback;
pub mod orchestrator;
pub mod request;

pub use client::{CompletionClient, HttpCompletionClient};
pub use endpoint::EndpointConfig;
pub use extract::{extract_project, find_object_spans};
pub use orchestrator::{FailureKind, GenerationOutcome, GenerationSource, Generator};
pub use request::{build_instruction, CompletionChoice, CompletionRequest, CompletionResponse};
