//! Project workspaces on disk: loading, saving, and the live preview watcher.

mod loader;
mod watch;

pub use loader::{load_project, save_project, DEFAULT_ENTRY};
pub use watch::{PreviewWatcher, WatchConfig};
