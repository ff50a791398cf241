//! Watch events, debouncing, and configuration.

use notify::{Event, EventKind};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Live preview configuration
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Project directory being watched
    pub project_root: PathBuf,
    /// Entry document override
    pub entry: Option<String>,
    /// Where the composed preview is written
    pub output: PathBuf,
    /// Wrap the preview in a sandboxed host page
    pub host_page: bool,
    /// Quiet period before a batch of changes triggers a refresh
    pub debounce_ms: u64,
    /// Directory names whose contents never trigger a refresh
    pub ignored_dirs: Vec<String>,
    /// File name suffixes that never trigger a refresh
    pub ignored_suffixes: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            entry: None,
            output: PathBuf::from("preview.html"),
            host_page: false,
            debounce_ms: 150,
            ignored_dirs: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
            ],
            ignored_suffixes: vec![
                "~".to_string(),
                ".swp".to_string(),
                ".tmp".to_string(),
                ".DS_Store".to_string(),
            ],
        }
    }
}

/// Filesystem change event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeEvent {
    Created(PathBuf),
    Modified(PathBuf),
    Removed(PathBuf),
    Renamed { from: PathBuf, to: PathBuf },
}

impl ChangeEvent {
    /// Map a raw notify event; access and metadata-only events are dropped.
    pub fn from_notify(event: Event) -> Option<Self> {
        let mut paths = event.paths.into_iter();
        match event.kind {
            EventKind::Create(_) => paths.next().map(ChangeEvent::Created),
            EventKind::Modify(notify::event::ModifyKind::Name(_)) => {
                match (paths.next(), paths.next()) {
                    (Some(from), Some(to)) => Some(ChangeEvent::Renamed { from, to }),
                    (Some(path), None) => Some(ChangeEvent::Modified(path)),
                    _ => None,
                }
            }
            EventKind::Modify(notify::event::ModifyKind::Metadata(_)) => None,
            EventKind::Modify(_) => paths.next().map(ChangeEvent::Modified),
            EventKind::Remove(_) => paths.next().map(ChangeEvent::Removed),
            _ => None,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ChangeEvent::Created(p) | ChangeEvent::Modified(p) | ChangeEvent::Removed(p) => p,
            ChangeEvent::Renamed { to, .. } => to,
        }
    }
}

/// Collects change events until the debounce window has been quiet.
pub(crate) struct EventBatcher {
    config: WatchConfig,
    output: Option<PathBuf>,
    pending: Vec<ChangeEvent>,
    last_event: Option<Instant>,
}

impl EventBatcher {
    pub(crate) fn new(config: WatchConfig) -> Self {
        Self {
            config,
            output: None,
            pending: Vec::new(),
            last_event: None,
        }
    }

    /// Never treat writes to `path` as project changes.
    pub(crate) fn ignore_output(&mut self, path: PathBuf) {
        self.output = Some(path);
    }

    /// Queue `event` unless ignored. Returns whether it was queued.
    pub(crate) fn add_event(&mut self, event: ChangeEvent, now: Instant) -> bool {
        if self.should_ignore(event.path()) {
            return false;
        }
        self.pending.push(event);
        self.last_event = Some(now);
        true
    }

    /// Pending events exist and nothing arrived for a full debounce window.
    pub(crate) fn is_ready(&self, now: Instant) -> bool {
        match self.last_event {
            Some(last) if !self.pending.is_empty() => {
                now.duration_since(last) >= Duration::from_millis(self.config.debounce_ms)
            }
            _ => false,
        }
    }

    pub(crate) fn take_batch(&mut self) -> Vec<ChangeEvent> {
        self.last_event = None;
        std::mem::take(&mut self.pending)
    }

    fn should_ignore(&self, path: &Path) -> bool {
        if self.output.as_deref() == Some(path) {
            return true;
        }
        let in_ignored_dir = path.components().any(|c| {
            c.as_os_str()
                .to_str()
                .map(|name| self.config.ignored_dirs.iter().any(|d| d == name))
                .unwrap_or(false)
        });
        if in_ignored_dir {
            return true;
        }
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        self.config
            .ignored_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
    }
}
