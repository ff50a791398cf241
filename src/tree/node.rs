//! Tree node types for the file browser.

/// Node in the display tree.
///
/// Folder children keep first-seen insertion order; sibling names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    File { path: String },
    Folder { children: Vec<(String, TreeNode)> },
}

impl TreeNode {
    pub fn folder() -> Self {
        TreeNode::Folder {
            children: Vec::new(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder { .. })
    }

    /// Original file path carried by a leaf.
    pub fn file_path(&self) -> Option<&str> {
        match self {
            TreeNode::File { path } => Some(path),
            TreeNode::Folder { .. } => None,
        }
    }

    pub fn children(&self) -> &[(String, TreeNode)] {
        match self {
            TreeNode::Folder { children } => children,
            TreeNode::File { .. } => &[],
        }
    }
}

/// Display path of a child: `parent/name`, or `name` alone at the root.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
