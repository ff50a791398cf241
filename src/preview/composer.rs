//! Entry document composition: textual inlining of stylesheets and scripts.
//!
//! Matching is done with regular expressions over the raw markup, not a DOM.
//! Tag and attribute names match case-insensitively; the referenced path
//! must match the file path exactly (case-sensitive, no query string).

use super::placeholder::error_document;
use crate::error::ApiError;
use crate::types::{resolve_content, FileContents, Project};
use regex::{NoExpand, Regex};
use tracing::{debug, warn};

pub const STYLESHEET_EXTENSIONS: &[&str] = &[".css"];
pub const SCRIPT_EXTENSIONS: &[&str] = &[".js", ".mjs"];

fn has_extension(path: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| path.ends_with(ext))
}

fn link_pattern(path: &str) -> Result<Regex, ApiError> {
    let pattern = format!(
        r#"(?i)<link\b[^>]*?\shref\s*=\s*["'](?-i:{})["'][^>]*>"#,
        regex::escape(path)
    );
    Regex::new(&pattern)
        .map_err(|e| ApiError::PreviewError(format!("Invalid link pattern for {}: {}", path, e)))
}

fn script_pattern(path: &str) -> Result<Regex, ApiError> {
    let pattern = format!(
        r#"(?i)<script\b[^>]*?\ssrc\s*=\s*["'](?-i:{})["'][^>]*>\s*</script\s*>"#,
        regex::escape(path)
    );
    Regex::new(&pattern)
        .map_err(|e| ApiError::PreviewError(format!("Invalid script pattern for {}: {}", path, e)))
}

/// Neutralize `</tag` sequences inside inlined content so it cannot close
/// the surrounding element early.
fn escape_closing_tag(content: &str, tag: &str) -> String {
    let needle = format!("</{}", tag);
    // ASCII lowercasing keeps byte offsets identical to `content`.
    let lowered = content.to_ascii_lowercase();
    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    for (idx, _) in lowered.match_indices(&needle) {
        out.push_str(&content[last..idx]);
        out.push_str("<\\/");
        last = idx + 2;
    }
    out.push_str(&content[last..]);
    out
}

/// Compose the entry document with every referenced stylesheet and script
/// inlined.
///
/// The entry content comes from `contents` when present, else from the
/// stored file. Stylesheets are inlined first, then scripts, each in project
/// file order. A script tag is only replaced when its body is empty.
pub fn compose(project: &Project, contents: &FileContents) -> Result<String, ApiError> {
    let entry = resolve_content(project, contents, &project.entry).ok_or_else(|| {
        ApiError::PreviewError(format!("Entry document '{}' not found", project.entry))
    })?;

    let mut html = entry.to_string();

    for file in project
        .files
        .iter()
        .filter(|f| has_extension(&f.path, STYLESHEET_EXTENSIONS))
    {
        let css = resolve_content(project, contents, &file.path).unwrap_or(&file.content);
        let block = format!("<style>{}</style>", escape_closing_tag(css, "style"));
        let pattern = link_pattern(&file.path)?;
        if pattern.is_match(&html) {
            debug!(path = %file.path, "Inlining stylesheet");
            html = pattern.replace_all(&html, NoExpand(&block)).into_owned();
        }
    }

    for file in project
        .files
        .iter()
        .filter(|f| has_extension(&f.path, SCRIPT_EXTENSIONS))
    {
        let js = resolve_content(project, contents, &file.path).unwrap_or(&file.content);
        let block = format!("<script>{}</script>", escape_closing_tag(js, "script"));
        let pattern = script_pattern(&file.path)?;
        if pattern.is_match(&html) {
            debug!(path = %file.path, "Inlining script");
            html = pattern.replace_all(&html, NoExpand(&block)).into_owned();
        }
    }

    Ok(html)
}

/// Compose the preview, substituting the placeholder document on failure.
pub fn render(project: &Project, contents: &FileContents) -> String {
    match compose(project, contents) {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, entry = %project.entry, "Preview composition failed");
            error_document().to_string()
        }
    }
}
