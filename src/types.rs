//! Core types: generated files, projects, and the editable contents map.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Editable contents keyed by file path. Diverges from the project's stored
/// content after an edit until written back.
pub type FileContents = BTreeMap<String, String>;

/// One generated file: slash-separated path plus its text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub path: String,
    pub content: String,
}

impl ProjectFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// A generated website: ordered file set plus the entry HTML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub files: Vec<ProjectFile>,
    pub entry: String,
}

impl Project {
    pub fn new(files: Vec<ProjectFile>, entry: impl Into<String>) -> Self {
        Self {
            files,
            entry: entry.into(),
        }
    }

    /// Check that the project can be installed: at least one file, unique
    /// paths, and an entry that names one of the files.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.files.is_empty() {
            return Err(ApiError::InvalidProject(
                "project has no files".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if file.path.trim().is_empty() {
                return Err(ApiError::InvalidProject(
                    "file path cannot be empty".to_string(),
                ));
            }
            if !seen.insert(file.path.as_str()) {
                return Err(ApiError::InvalidProject(format!(
                    "duplicate file path: {}",
                    file.path
                )));
            }
        }

        if !seen.contains(self.entry.as_str()) {
            return Err(ApiError::InvalidProject(format!(
                "entry '{}' does not match any file",
                self.entry
            )));
        }

        Ok(())
    }

    pub fn file(&self, path: &str) -> Option<&ProjectFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    /// Contents map primed verbatim from the stored file contents.
    pub fn contents(&self) -> FileContents {
        self.files
            .iter()
            .map(|f| (f.path.clone(), f.content.clone()))
            .collect()
    }

    /// Write edited content back into the stored file. Returns false when no
    /// file has that path.
    pub fn set_content(&mut self, path: &str, content: &str) -> bool {
        match self.files.iter_mut().find(|f| f.path == path) {
            Some(file) => {
                file.content = content.to_string();
                true
            }
            None => false,
        }
    }
}

/// Current content for `path`: the edited value when present, else the
/// project's stored content.
pub fn resolve_content<'a>(
    project: &'a Project,
    contents: &'a FileContents,
    path: &str,
) -> Option<&'a str> {
    contents
        .get(path)
        .map(String::as_str)
        .or_else(|| project.file(path).map(|f| f.content.as_str()))
}

/// Editor language inferred from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Html,
    Css,
    Javascript,
    Json,
    Plaintext,
}

impl Language {
    pub fn from_path(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path);
        let ext = match name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return Language::Plaintext,
        };
        match ext.as_str() {
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            "js" | "mjs" => Language::Javascript,
            "json" => Language::Json,
            _ => Language::Plaintext,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Html => "html",
            Language::Css => "css",
            Language::Javascript => "javascript",
            Language::Json => "json",
            Language::Plaintext => "plaintext",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
