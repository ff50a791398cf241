//! Completion request and response wire types.

use super::endpoint::EndpointConfig;
use serde::{Deserialize, Serialize};

/// Wrap the user's prompt in the instruction asking for project JSON.
pub fn build_instruction(prompt: &str) -> String {
    format!(
        concat!(
            "Generate a complete website based on this prompt: \"{}\". ",
            "Return only valid JSON in this format: ",
            r#"{{"files":[{{"path":"index.html","content":"..."}},{{"path":"styles.css","content":"..."}}],"entry":"index.html"}}"#
        ),
        prompt.trim()
    )
}

/// JSON body POSTed to the completions route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub stream: bool,
}

impl CompletionRequest {
    pub fn for_prompt(endpoint: &EndpointConfig, prompt: &str) -> Self {
        Self {
            model: endpoint.model.clone(),
            prompt: build_instruction(prompt),
            max_tokens: endpoint.max_tokens,
            temperature: endpoint.temperature,
            stream: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub text: String,
}

/// Response body: only `choices[].text` is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

impl CompletionResponse {
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().map(|c| c.text.as_str())
    }
}
