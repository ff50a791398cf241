//! Watch loop that recomposes the preview whenever project files change.

use super::events::{ChangeEvent, EventBatcher, WatchConfig};
use crate::error::ApiError;
use crate::preview::PreviewSurface;
use crate::workspace::loader::load_project;
use notify::{RecursiveMode, Watcher};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Keeps a preview file in sync with a project directory.
pub struct PreviewWatcher {
    config: WatchConfig,
    root: PathBuf,
    surface: PreviewSurface,
    running: Arc<AtomicBool>,
}

impl PreviewWatcher {
    pub fn new(config: WatchConfig) -> Result<Self, ApiError> {
        if !config.project_root.is_dir() {
            return Err(ApiError::InvalidInput(format!(
                "Live preview needs a project directory, got {}",
                config.project_root.display()
            )));
        }
        let root = dunce::canonicalize(&config.project_root)?;
        Ok(Self {
            config,
            root,
            surface: PreviewSurface::new(),
            running: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Flag that ends [`PreviewWatcher::run`] when cleared. Clearing it
    /// before `run` starts makes `run` return after the initial preview.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn surface(&self) -> &PreviewSurface {
        &self.surface
    }

    /// Reload the project and rewrite the preview from scratch.
    ///
    /// A project that no longer loads leaves the previous preview in place
    /// and returns `Ok(false)`.
    pub fn refresh(&mut self) -> Result<bool, ApiError> {
        let mut project = match load_project(&self.root, self.config.entry.as_deref()) {
            Ok(project) => project,
            Err(e) => {
                warn!(error = %e, "Project failed to load; keeping previous preview");
                return Ok(false);
            }
        };
        if let Some(own) = self.output_relative_path() {
            project.files.retain(|f| f.path != own);
        }

        let contents = project.contents();
        self.surface.refresh(&project, &contents);
        let html = if self.config.host_page {
            self.surface.host_page("Website Preview")
        } else {
            self.surface.document().unwrap_or_default().to_string()
        };

        if let Some(parent) = self.config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config.output, html)?;
        info!(
            output = %self.config.output.display(),
            revision = self.surface.revision(),
            "Preview refreshed"
        );
        Ok(true)
    }

    fn output_relative_path(&self) -> Option<String> {
        let output = canonical_output(&self.config.output)?;
        let relative = output.strip_prefix(&self.root).ok()?;
        relative.to_str().map(|s| s.replace('\\', "/"))
    }

    /// Write the initial preview, then refresh on every debounced batch of
    /// changes until stopped.
    pub fn run(&mut self) -> Result<(), ApiError> {
        self.refresh()?;

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            if let Err(e) = tx.send(res) {
                error!("Error sending watch event: {}", e);
            }
        })
        .map_err(|e| ApiError::PreviewError(format!("Failed to create watcher: {}", e)))?;

        watcher
            .watch(&self.root, RecursiveMode::Recursive)
            .map_err(|e| ApiError::PreviewError(format!("Failed to watch directory: {}", e)))?;

        info!(project = %self.root.display(), "Watching project for changes");

        let mut batcher = EventBatcher::new(self.config.clone());
        if let Some(output) = canonical_output(&self.config.output) {
            batcher.ignore_output(output);
        }

        while self.running.load(Ordering::SeqCst) {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(Ok(event)) => {
                    if let Some(change) = ChangeEvent::from_notify(event) {
                        if batcher.add_event(change.clone(), Instant::now()) {
                            debug!(path = %change.path().display(), "Queued change");
                        }
                    }
                }
                Ok(Err(e)) => warn!("Watch error: {}", e),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    error!("Watcher channel disconnected");
                    break;
                }
            }

            if batcher.is_ready(Instant::now()) {
                let batch = batcher.take_batch();
                info!(event_count = batch.len(), "Processing change events");
                self.refresh()?;
            }
        }

        info!(project = %self.root.display(), "Stopped watching");
        Ok(())
    }
}

fn canonical_output(output: &Path) -> Option<PathBuf> {
    dunce::canonicalize(output).ok()
}
