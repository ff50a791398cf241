//! Flat file list to nested tree conversion.

use super::node::TreeNode;
use crate::types::ProjectFile;
use tracing::warn;

/// Build the display forest for `files`.
///
/// Each path is split on `/`; every segment but the last becomes a folder
/// level and the last becomes a leaf carrying the original path. Siblings
/// keep first-seen order. Empty segments (leading, trailing, or doubled
/// slashes) are collapsed, so `a//b.css` files under `a`. A path that is all
/// slashes is ignored.
///
/// A repeated path replaces the existing leaf in place. When one path needs
/// a folder where another already put a file (or the reverse), the earlier
/// node wins and the later path is skipped.
pub fn build_tree(files: &[ProjectFile]) -> Vec<(String, TreeNode)> {
    let mut root = Vec::new();
    for file in files {
        let segments: Vec<&str> = file.path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            warn!(path = %file.path, "Skipping file with no path segments");
            continue;
        }
        if !insert(&mut root, &segments, &file.path) {
            warn!(path = %file.path, "Skipping file that collides with an existing tree entry");
        }
    }
    root
}

fn insert(level: &mut Vec<(String, TreeNode)>, segments: &[&str], path: &str) -> bool {
    let (name, rest) = match segments.split_first() {
        Some(split) => split,
        None => return false,
    };
    let existing = level.iter().position(|(n, _)| n == name);

    if rest.is_empty() {
        return match existing {
            Some(idx) => match &mut level[idx].1 {
                TreeNode::File { path: leaf } => {
                    *leaf = path.to_string();
                    true
                }
                TreeNode::Folder { .. } => false,
            },
            None => {
                level.push((
                    name.to_string(),
                    TreeNode::File {
                        path: path.to_string(),
                    },
                ));
                true
            }
        };
    }

    let idx = match existing {
        Some(idx) => idx,
        None => {
            level.push((name.to_string(), TreeNode::folder()));
            level.len() - 1
        }
    };
    match &mut level[idx].1 {
        TreeNode::Folder { children } => insert(children, rest, path),
        TreeNode::File { .. } => false,
    }
}
