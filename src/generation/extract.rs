//! Pulling project JSON out of model output.

use crate::error::ApiError;
use crate::types::Project;

/// Byte ranges of top-level balanced `{...}` spans in `text`, in order.
///
/// Braces inside JSON string literals (including escaped quotes) do not
/// count. An unterminated span ends the scan.
pub fn find_object_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if depth == 0 {
            if ch == '{' {
                depth = 1;
                start = idx;
                in_string = false;
                escaped = false;
            }
            continue;
        }

        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    spans.push((start, idx + 1));
                }
            }
            _ => {}
        }
    }

    spans
}

/// Parse a project from completion text.
///
/// The whole text is tried first; failing that, each balanced `{...}` span
/// in order. The first candidate that deserializes and validates wins.
pub fn extract_project(text: &str) -> Result<Project, ApiError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidProject("completion text is empty".to_string()));
    }

    let mut last_error = match parse_candidate(trimmed) {
        Ok(project) => return Ok(project),
        Err(e) => e,
    };

    for (start, end) in find_object_spans(trimmed) {
        match parse_candidate(&trimmed[start..end]) {
            Ok(project) => return Ok(project),
            Err(e) => last_error = e,
        }
    }

    Err(last_error)
}

fn parse_candidate(candidate: &str) -> Result<Project, ApiError> {
    let project: Project = serde_json::from_str(candidate)
        .map_err(|e| ApiError::InvalidProject(format!("not project JSON: {}", e)))?;
    project.validate()?;
    Ok(project)
}
