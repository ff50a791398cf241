//! Sandboxed rendering surface for composed previews.

use super::composer::render;
use crate::types::{FileContents, Project};

/// Sandbox tokens for the preview frame. Scripts may run, but without
/// `allow-same-origin` or `allow-top-navigation` they cannot reach the host
/// page or navigate the parent.
pub const SANDBOX_POLICY: &str = "allow-scripts";

/// Isolated surface holding the current preview document.
///
/// Every write replaces the whole document; nothing is patched in place.
#[derive(Debug, Default, Clone)]
pub struct PreviewSurface {
    document: Option<String>,
    revision: u64,
}

impl PreviewSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the surface document wholesale.
    pub fn write(&mut self, html: String) {
        self.document = Some(html);
        self.revision += 1;
    }

    /// Recompose from scratch and write the result.
    pub fn refresh(&mut self, project: &Project, contents: &FileContents) {
        self.write(render(project, contents));
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Number of writes performed so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Standalone host page embedding the current document in a sandboxed
    /// iframe via `srcdoc`.
    pub fn host_page(&self, title: &str) -> String {
        let body = match &self.document {
            Some(doc) => format!(
                r#"<iframe title="Website Preview" sandbox="{}" srcdoc="{}"></iframe>"#,
                SANDBOX_POLICY,
                escape_html(doc)
            ),
            None => "<p class=\"empty\">Generate a website to see preview</p>".to_string(),
        };
        format!(
            concat!(
                "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n",
                "<meta charset=\"UTF-8\">\n<title>{}</title>\n",
                "<style>html,body{{margin:0;height:100%;background:#f8fafc;}}",
                "iframe{{border:0;width:100%;height:100vh;background:#fff;}}",
                ".empty{{font-family:sans-serif;color:#64748b;text-align:center;padding-top:40vh;}}</style>\n",
                "</head>\n<body>\n{}\n</body>\n</html>\n"
            ),
            escape_html(title),
            body
        )
    }
}

/// Escape text for an HTML element body or a double-quoted attribute.
pub(crate) fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
