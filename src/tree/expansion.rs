//! Folder expansion state and the depth-first visible-row walk.

use super::node::{join_path, TreeNode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Folder paths currently shown expanded.
///
/// Only user toggles mutate it; it is never reset, so it accumulates for the
/// session even across regenerated projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionState {
    expanded: BTreeSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a folder's expansion. Returns true when it is now expanded.
    pub fn toggle(&mut self, folder_path: &str) -> bool {
        if self.expanded.remove(folder_path) {
            false
        } else {
            self.expanded.insert(folder_path.to_string());
            true
        }
    }

    pub fn expand(&mut self, folder_path: &str) {
        self.expanded.insert(folder_path.to_string());
    }

    pub fn is_expanded(&self, folder_path: &str) -> bool {
        self.expanded.contains(folder_path)
    }

    /// Expand every folder in `tree`.
    pub fn expand_all(&mut self, tree: &[(String, TreeNode)]) {
        fn walk(state: &mut ExpansionState, level: &[(String, TreeNode)], parent: &str) {
            for (name, node) in level {
                if let TreeNode::Folder { children } = node {
                    let path = join_path(parent, name);
                    walk(state, children, &path);
                    state.expanded.insert(path);
                }
            }
        }
        walk(self, tree, "");
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    File,
    Folder { expanded: bool },
}

/// One rendered line of the file browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeRow {
    pub name: String,
    /// Display path (parent path joined with the name).
    pub path: String,
    /// Original file path for leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    pub depth: usize,
    pub kind: RowKind,
}

/// Depth-first walk of `tree`; a folder's children are emitted only when its
/// path is expanded.
pub fn visible_rows(tree: &[(String, TreeNode)], expansion: &ExpansionState) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    walk_rows(tree, "", 0, expansion, &mut rows);
    rows
}

fn walk_rows(
    level: &[(String, TreeNode)],
    parent: &str,
    depth: usize,
    expansion: &ExpansionState,
    rows: &mut Vec<TreeRow>,
) {
    for (name, node) in level {
        let path = join_path(parent, name);
        match node {
            TreeNode::File { path: file_path } => rows.push(TreeRow {
                name: name.clone(),
                path,
                file_path: Some(file_path.clone()),
                depth,
                kind: RowKind::File,
            }),
            TreeNode::Folder { children } => {
                let expanded = expansion.is_expanded(&path);
                rows.push(TreeRow {
                    name: name.clone(),
                    path: path.clone(),
                    file_path: None,
                    depth,
                    kind: RowKind::Folder { expanded },
                });
                if expanded {
                    walk_rows(children, &path, depth + 1, expansion, rows);
                }
            }
        }
    }
}

/// Indented plain-text rendering of `rows`, marking the selected file.
pub fn render_text(rows: &[TreeRow], selected: Option<&str>) -> String {
    let mut out = String::new();
    for row in rows {
        let indent = "  ".repeat(row.depth);
        let marker = match row.kind {
            RowKind::Folder { expanded: true } => "▾ ",
            RowKind::Folder { expanded: false } => "▸ ",
            RowKind::File => "  ",
        };
        let is_selected = selected.is_some() && row.file_path.as_deref() == selected;
        let cursor = if is_selected { "> " } else { "  " };
        let suffix = if row.kind == RowKind::File { "" } else { "/" };
        out.push_str(&format!("{}{}{}{}{}\n", cursor, indent, marker, row.name, suffix));
    }
    out
}
