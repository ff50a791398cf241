//! Live preview: filesystem events, batching, and the watch loop.

mod events;
mod runtime;

pub use events::{ChangeEvent, WatchConfig};
pub use runtime::PreviewWatcher;
