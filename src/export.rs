//! Zip export of the current project.

use crate::error::ApiError;
use crate::types::{resolve_content, FileContents, Project};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const DEFAULT_ARCHIVE_NAME: &str = "generated-website.zip";

/// Pack every project file at its declared path, with edited content taking
/// precedence over stored content.
pub fn build_archive(project: &Project, contents: &FileContents) -> Result<Vec<u8>, ApiError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for file in &project.files {
        let content = resolve_content(project, contents, &file.path).unwrap_or(&file.content);
        writer
            .start_file(file.path.as_str(), options)
            .map_err(|e| ApiError::ExportError(format!("Failed to add {}: {}", file.path, e)))?;
        writer
            .write_all(content.as_bytes())
            .map_err(|e| ApiError::ExportError(format!("Failed to write {}: {}", file.path, e)))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| ApiError::ExportError(format!("Failed to finish archive: {}", e)))?;
    Ok(cursor.into_inner())
}

/// Write the archive into `dir` under `file_name`.
pub fn write_archive(
    project: &Project,
    contents: &FileContents,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, ApiError> {
    if project.files.is_empty() {
        return Err(ApiError::ExportError("No files to export".to_string()));
    }
    if file_name.is_empty() || file_name.contains('/') || file_name.contains('\\') {
        return Err(ApiError::ExportError(format!(
            "Invalid archive file name: {}",
            file_name
        )));
    }

    let bytes = build_archive(project, contents)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, &bytes)?;
    info!(path = %path.display(), files = project.files.len(), bytes = bytes.len(), "Exported project archive");
    Ok(path)
}
