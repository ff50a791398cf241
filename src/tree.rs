//! File Tree
//!
//! Turns a flat list of generated files into a nested folder/file structure
//! for display, and walks it depth-first honoring per-folder expansion state.

pub mod builder;
pub mod expansion;
pub mod node;

pub use builder::build_tree;
pub use expansion::{render_text, visible_rows, ExpansionState, RowKind, TreeRow};
pub use node::{join_path, TreeNode};
