//! Reading projects from directories or JSON files and writing them back.

use crate::error::ApiError;
use crate::generation::GenerationOutcome;
use crate::types::{resolve_content, FileContents, Project, ProjectFile};
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Entry document assumed for directories when none is given.
pub const DEFAULT_ENTRY: &str = "index.html";

/// JSON shapes accepted by [`load_project`]: a bare project or a saved
/// generation outcome.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectDocument {
    Project(Project),
    Outcome(GenerationOutcome),
}

/// Load a project from `path`.
///
/// A directory is walked recursively; every UTF-8 file becomes a project file
/// keyed by its `/`-separated path relative to the root, ordered by path.
/// Hidden entries are skipped. Any other path is read as project JSON. `entry` overrides the
/// entry document in both cases.
pub fn load_project(path: &Path, entry: Option<&str>) -> Result<Project, ApiError> {
    let mut project = if path.is_dir() {
        load_directory(path, entry.unwrap_or(DEFAULT_ENTRY))?
    } else {
        load_json(path)?
    };

    if let Some(entry) = entry {
        project.entry = entry.to_string();
    }
    project.validate()?;
    info!(path = %path.display(), files = project.files.len(), entry = %project.entry, "Loaded project");
    Ok(project)
}

fn load_json(path: &Path) -> Result<Project, ApiError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        ApiError::InvalidInput(format!("Failed to read project {}: {}", path.display(), e))
    })?;
    let document: ProjectDocument = serde_json::from_str(&raw).map_err(|e| {
        ApiError::InvalidProject(format!("{} is not project JSON: {}", path.display(), e))
    })?;
    Ok(match document {
        ProjectDocument::Project(project) => project,
        ProjectDocument::Outcome(outcome) => outcome.project,
    })
}

fn load_directory(root: &Path, entry: &str) -> Result<Project, ApiError> {
    let root = dunce::canonicalize(root)?;
    let mut files = Vec::new();

    let walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    for item in walker {
        let item = item.map_err(|e| ApiError::InvalidInput(format!("Failed to walk {}: {}", root.display(), e)))?;
        if !item.file_type().is_file() {
            continue;
        }
        let relative = match relative_path(&root, item.path()) {
            Some(relative) => relative,
            None => continue,
        };
        match fs::read_to_string(item.path()) {
            Ok(content) => files.push(ProjectFile::new(relative, content)),
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                debug!(path = %relative, "Skipping non-text file");
            }
            Err(e) => return Err(e.into()),
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    if files.is_empty() {
        return Err(ApiError::InvalidProject(format!(
            "{} contains no text files",
            root.display()
        )));
    }
    Ok(Project::new(files, entry))
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().map(|s| s.starts_with('.')).unwrap_or(false)
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();
    let parts = parts?;
    (!parts.is_empty()).then(|| parts.join("/"))
}

/// Destination for a project path under `dir`, or `None` when the path would
/// escape it.
fn safe_destination(dir: &Path, path: &str) -> Option<PathBuf> {
    let mut dest = dir.to_path_buf();
    let mut pushed = false;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if segment == "." || segment == ".." || segment.contains('\\') || segment.contains(':') {
            return None;
        }
        dest.push(segment);
        pushed = true;
    }
    pushed.then_some(dest)
}

/// Write every project file under `dir` using its current content.
///
/// Paths that would land outside `dir` are skipped with a warning. Returns
/// the written paths in project order.
pub fn save_project(
    project: &Project,
    contents: &FileContents,
    dir: &Path,
) -> Result<Vec<PathBuf>, ApiError> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(project.files.len());

    for file in &project.files {
        let Some(dest) = safe_destination(dir, &file.path) else {
            warn!(path = %file.path, "Refusing to write file outside output directory");
            continue;
        };
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = resolve_content(project, contents, &file.path).unwrap_or_default();
        fs::write(&dest, content)?;
        written.push(dest);
    }

    info!(dir = %dir.display(), files = written.len(), "Saved project");
    Ok(written)
}
