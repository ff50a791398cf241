//! Human-readable output for CLI commands.

use crate::app::{Notice, NoticeLevel};
use crate::generation::GenerationSource;
use crate::templates::Template;
use crate::tree::{render_text, TreeRow};
use crate::types::{Language, Project};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(header);
    table
}

pub fn format_templates_text(templates: &[Template]) -> String {
    let mut table = new_table(vec!["Name", "Slug", "Description"]);
    for template in templates {
        table.add_row(vec![template.name, template.slug, template.description]);
    }
    format!("{}\n\n{}\n", format_section_heading("Templates"), table)
}

/// Table of project files with language and size, entry marked.
pub fn format_files_table(project: &Project) -> String {
    let mut table = new_table(vec!["Path", "Language", "Bytes"]);
    for file in &project.files {
        let path = if file.path == project.entry {
            format!("{} (entry)", file.path)
        } else {
            file.path.clone()
        };
        table.add_row(vec![
            path,
            Language::from_path(&file.path).to_string(),
            file.content.len().to_string(),
        ]);
    }
    table.to_string()
}

/// Result of `generate`, printed as text or serialized as JSON.
#[derive(Debug, Serialize)]
pub struct GenerationReport {
    pub prompt: String,
    pub project: Project,
    #[serde(flatten)]
    pub source: GenerationSource,
    pub files_written: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<String>,
    pub notices: Vec<Notice>,
}

pub fn format_generation_text(report: &GenerationReport) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Generation"));
    out.push_str(&format!("  Prompt: {}\n", report.prompt));
    match &report.source {
        GenerationSource::Model => out.push_str("  Source: model\n"),
        GenerationSource::Fallback { reason } => {
            out.push_str(&format!("  Source: {} ({})\n", "demo".yellow(), reason));
        }
    }
    out.push_str(&format!("  Entry: {}\n\n", report.project.entry));
    out.push_str(&format_files_table(&report.project));
    out.push('\n');

    if !report.files_written.is_empty() {
        out.push_str(&format!("\n{}\n\n", format_section_heading("Written")));
        for path in &report.files_written {
            out.push_str(&format!("  {}\n", path));
        }
    }
    if let Some(archive) = &report.archive {
        out.push_str(&format!("\n  Archive: {}\n", archive));
    }
    if !report.notices.is_empty() {
        out.push('\n');
        out.push_str(&format_notices(&report.notices));
    }
    out
}

pub fn format_notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|notice| {
            let label = match notice.level {
                NoticeLevel::Success => format!("{}", "ok".green()),
                NoticeLevel::Info => format!("{}", "info".blue()),
                NoticeLevel::Warning => format!("{}", "warn".yellow()),
                NoticeLevel::Error => format!("{}", "error".red()),
            };
            format!("  [{}] {}\n", label, notice.message)
        })
        .collect()
}

/// File browser listing plus the selected file's editor view.
pub fn format_tree_text(rows: &[TreeRow], selected: Option<(&str, &str, Language)>) -> String {
    let selected_path = selected.map(|(path, _, _)| path);
    let mut out = format!("{}\n\n", format_section_heading("Files"));
    out.push_str(&render_text(rows, selected_path));
    if let Some((path, content, language)) = selected {
        out.push_str(&format!(
            "\n{}\n\n",
            format_section_heading(&format!("{} [{}]", path, language))
        ));
        out.push_str(content);
        if !content.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
