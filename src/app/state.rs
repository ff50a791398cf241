//! Session state and its transitions.

use super::notice::{Notice, NoticeLevel};
use crate::error::ApiError;
use crate::export::{write_archive, DEFAULT_ARCHIVE_NAME};
use crate::generation::{FailureKind, GenerationOutcome, GenerationSource};
use crate::preview::PreviewSurface;
use crate::templates::find_template;
use crate::tree::{build_tree, visible_rows, ExpansionState, TreeRow};
use crate::types::{FileContents, Language, Project};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Handle for one submitted generation. Only the most recently issued
/// ticket may install its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket {
    seq: u64,
}

/// What `receive_response` did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Installed,
    /// A newer request was issued; the outcome was discarded.
    Stale,
}

#[derive(Debug, Default)]
pub struct AppState {
    prompt: String,
    project: Option<Project>,
    contents: FileContents,
    selected: Option<String>,
    expansion: ExpansionState,
    generating: bool,
    latest_seq: u64,
    last_source: Option<GenerationSource>,
    last_response: Option<serde_json::Value>,
    notices: Vec<Notice>,
    surface: PreviewSurface,
    archive_name: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `name` instead of the default archive file name on export.
    pub fn with_archive_name(mut self, name: impl Into<String>) -> Self {
        self.archive_name = Some(name.into());
        self
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Replace the prompt with a built-in template's prompt.
    pub fn apply_template(&mut self, key: &str) -> Result<(), ApiError> {
        let template = find_template(key)
            .ok_or_else(|| ApiError::InvalidInput(format!("Unknown template: {}", key)))?;
        self.prompt = template.prompt.to_string();
        Ok(())
    }

    /// Start a generation for the current prompt.
    pub fn submit_prompt(&mut self) -> Result<RequestTicket, ApiError> {
        if self.prompt.trim().is_empty() {
            self.notify(NoticeLevel::Error, "Please enter a prompt");
            return Err(ApiError::InvalidInput("prompt is empty".to_string()));
        }
        self.latest_seq += 1;
        self.generating = true;
        debug!(seq = self.latest_seq, "Submitted prompt");
        Ok(RequestTicket {
            seq: self.latest_seq,
        })
    }

    /// Install the outcome of `ticket` unless a newer request superseded it.
    ///
    /// Installation is all-or-nothing: project, contents, selection, and
    /// preview switch together. An outcome carrying an invalid project is
    /// replaced by a demo project before anything is installed.
    pub fn receive_response(
        &mut self,
        ticket: RequestTicket,
        outcome: GenerationOutcome,
    ) -> Disposition {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "Discarding stale generation response"
            );
            return Disposition::Stale;
        }

        let outcome = match outcome.project.validate() {
            Ok(()) => outcome,
            Err(e) => GenerationOutcome::fallback(
                &self.prompt,
                FailureKind::InvalidProject {
                    detail: e.to_string(),
                },
            ),
        };

        self.generating = false;
        match &outcome.source {
            GenerationSource::Model => {
                self.notify(NoticeLevel::Success, "Website generated successfully!");
            }
            GenerationSource::Fallback { reason } => {
                self.notify(
                    NoticeLevel::Warning,
                    format!("Showing a demo website: {}", reason),
                );
            }
        }
        self.last_source = Some(outcome.source);
        self.install(outcome.project);
        Disposition::Installed
    }

    /// Open an existing project directly, bypassing generation.
    pub fn open_project(&mut self, project: Project) -> Result<(), ApiError> {
        project.validate()?;
        self.install(project);
        Ok(())
    }

    fn install(&mut self, project: Project) {
        self.last_response = serde_json::to_value(&project).ok();
        self.contents = project.contents();
        self.selected = if project.file(&project.entry).is_some() {
            Some(project.entry.clone())
        } else {
            project.files.first().map(|f| f.path.clone())
        };
        self.surface.refresh(&project, &self.contents);
        self.project = Some(project);
    }

    /// Record an edit and write it back into the project.
    pub fn edit_file(&mut self, path: &str, content: &str) -> Result<(), ApiError> {
        let project = self
            .project
            .as_mut()
            .ok_or_else(|| ApiError::InvalidInput("no project loaded".to_string()))?;
        if !project.set_content(path, content) {
            return Err(ApiError::InvalidInput(format!("Unknown file: {}", path)));
        }
        self.contents.insert(path.to_string(), content.to_string());
        self.surface.refresh(project, &self.contents);
        Ok(())
    }

    pub fn select_file(&mut self, path: &str) -> Result<(), ApiError> {
        match &self.project {
            Some(project) if project.file(path).is_some() => {
                self.selected = Some(path.to_string());
                Ok(())
            }
            _ => Err(ApiError::InvalidInput(format!("Unknown file: {}", path))),
        }
    }

    /// Flip a folder's expansion. Returns true when it is now expanded.
    pub fn toggle_folder(&mut self, folder_path: &str) -> bool {
        self.expansion.toggle(folder_path)
    }

    /// Package the project into `dir`. Failures are also recorded as a notice.
    pub fn export_project(&mut self, dir: &Path) -> Result<PathBuf, ApiError> {
        let Some(project) = self.project.as_ref().filter(|p| !p.files.is_empty()) else {
            self.notify(NoticeLevel::Error, "No files to download");
            return Err(ApiError::ExportError("No files to export".to_string()));
        };
        let name = self.archive_name.as_deref().unwrap_or(DEFAULT_ARCHIVE_NAME);
        let result = write_archive(project, &self.contents, dir, name);
        match &result {
            Ok(_) => self.notify(NoticeLevel::Success, "Website downloaded successfully!"),
            Err(e) => self.notify(NoticeLevel::Error, format!("Export failed: {}", e)),
        }
        result
    }

    /// Visible file-browser rows for the current project.
    pub fn tree_rows(&self) -> Vec<TreeRow> {
        match &self.project {
            Some(project) => visible_rows(&build_tree(&project.files), &self.expansion),
            None => Vec::new(),
        }
    }

    /// Current composed preview document, if a project is loaded.
    pub fn preview(&self) -> Option<&str> {
        self.surface.document()
    }

    pub fn surface(&self) -> &PreviewSurface {
        &self.surface
    }

    /// Last installed project as pretty-printed JSON.
    pub fn last_response_json(&self) -> Option<String> {
        self.last_response
            .as_ref()
            .and_then(|value| serde_json::to_string_pretty(value).ok())
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn contents(&self) -> &FileContents {
        &self.contents
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Content and language of the selected file.
    pub fn selected_view(&self) -> Option<(&str, Language)> {
        let path = self.selected.as_deref()?;
        let content = self.contents.get(path)?;
        Some((content.as_str(), Language::from_path(path)))
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn expansion_mut(&mut self) -> &mut ExpansionState {
        &mut self.expansion
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn last_source(&self) -> Option<&GenerationSource> {
        self.last_source.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice::new(level, message));
    }
}
