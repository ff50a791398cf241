//! CLI Tooling
//!
//! Command-line interface for generating, previewing, browsing, and exporting
//! projects. Every command returns its output as a string for the binary to
//! print.

use super::format::{
    format_generation_text, format_section_heading, format_templates_text, format_tree_text,
    GenerationReport,
};
use crate::app::AppState;
use crate::config::{AppConfig, ConfigLoader};
use crate::error::ApiError;
use crate::generation::{GenerationOutcome, Generator, HttpCompletionClient};
use crate::logging::LoggingConfig;
use crate::templates::TEMPLATES;
use crate::tree::build_tree;
use crate::workspace::{load_project, save_project, PreviewWatcher, WatchConfig};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// promptsite - generate small websites from a prompt with a local LLM
#[derive(Parser)]
#[command(name = "promptsite")]
#[command(about = "Generate small websites from a prompt, preview them sandboxed, export as zip")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (replaces the global and workspace files)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// `base` with the logging flags applied on top.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if self.verbose {
            config.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate a website from a prompt or template
    Generate {
        /// What the website should be
        prompt: Option<String>,
        /// Use a built-in template's prompt (slug or name)
        #[arg(long, conflicts_with = "prompt")]
        template: Option<String>,
        /// Write the generated files into this directory
        #[arg(long)]
        out: Option<PathBuf>,
        /// Also write a zip archive (into --out, or the workspace)
        #[arg(long)]
        export: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Compose a project into one self-contained HTML document
    Preview {
        /// Project directory or JSON file
        project: PathBuf,
        /// Entry document override
        #[arg(long)]
        entry: Option<String>,
        /// Output file
        #[arg(long, default_value = "preview.html")]
        out: PathBuf,
        /// Wrap the preview in a sandboxed host page
        #[arg(long)]
        host_page: bool,
        /// Keep running and recompose on every change (directories only)
        #[arg(long)]
        watch: bool,
        /// Quiet period before recomposing, in milliseconds
        #[arg(long, default_value = "150")]
        debounce_ms: u64,
    },
    /// Show the project's file browser
    Tree {
        /// Project directory or JSON file
        project: PathBuf,
        /// Entry document override
        #[arg(long)]
        entry: Option<String>,
        /// Expand a folder by its display path (repeatable)
        #[arg(long = "expand")]
        expand: Vec<String>,
        /// Expand every folder
        #[arg(long)]
        all: bool,
        /// Show this file's content
        #[arg(long)]
        select: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Package a project as a zip archive
    Export {
        /// Project directory or JSON file
        project: PathBuf,
        /// Entry document override
        #[arg(long)]
        entry: Option<String>,
        /// Directory to write the archive into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// List built-in prompt templates
    Templates {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
}

/// Resolved configuration plus the workspace it applies to.
pub struct CliContext {
    workspace_root: PathBuf,
    config: AppConfig,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: AppConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Relative paths resolve against the workspace root.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Generate {
                prompt,
                template,
                out,
                export,
                format,
            } => self.handle_generate(
                prompt.as_deref(),
                template.as_deref(),
                out.as_deref(),
                *export,
                format,
            ),
            Commands::Preview {
                project,
                entry,
                out,
                host_page,
                watch,
                debounce_ms,
            } => self.handle_preview(project, entry.as_deref(), out, *host_page, *watch, *debounce_ms),
            Commands::Tree {
                project,
                entry,
                expand,
                all,
                select,
                format,
            } => self.handle_tree(project, entry.as_deref(), expand, *all, select.as_deref(), format),
            Commands::Export { project, entry, out } => {
                self.handle_export(project, entry.as_deref(), out)
            }
            Commands::Templates { format } => {
                if format == "json" {
                    to_json(&TEMPLATES)
                } else {
                    Ok(format_templates_text(TEMPLATES))
                }
            }
            Commands::Config {
                command: ConfigCommands::Show,
            } => self.config.to_toml(),
        }
    }

    fn handle_generate(
        &self,
        prompt: Option<&str>,
        template: Option<&str>,
        out: Option<&Path>,
        export: bool,
        format: &str,
    ) -> Result<String, ApiError> {
        check_format(format)?;
        let mut state = AppState::new().with_archive_name(self.config.export.file_name.clone());
        match (prompt, template) {
            (_, Some(template)) => state.apply_template(template)?,
            (Some(prompt), None) => state.set_prompt(prompt),
            (None, None) => state.set_prompt(prompt_interactive()?),
        }

        let ticket = state.submit_prompt()?;
        let outcome = self.run_generation(state.prompt())?;
        state.receive_response(ticket, outcome);

        let (project, source) = match (state.project(), state.last_source()) {
            (Some(project), Some(source)) => (project.clone(), source.clone()),
            _ => {
                return Err(ApiError::InvalidProject(
                    "generation produced no project".to_string(),
                ))
            }
        };

        let out = out.map(|dir| self.resolve(dir));
        let mut files_written = Vec::new();
        if let Some(dir) = &out {
            files_written = save_project(&project, state.contents(), dir)?
                .iter()
                .map(|p| p.display().to_string())
                .collect();
        }
        // A failed export is already an error notice on the state.
        let archive = if export {
            let dir = out.clone().unwrap_or_else(|| self.workspace_root.clone());
            match state.export_project(&dir) {
                Ok(path) => Some(path.display().to_string()),
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Export failed; report kept");
                    None
                }
            }
        } else {
            None
        };

        let report = GenerationReport {
            prompt: state.prompt().to_string(),
            project,
            source,
            files_written,
            archive,
            notices: state.notices().to_vec(),
        };
        if format == "json" {
            to_json(&report)
        } else {
            Ok(format_generation_text(&report))
        }
    }

    /// Drive one completion request on a fresh runtime.
    fn run_generation(&self, prompt: &str) -> Result<GenerationOutcome, ApiError> {
        let client = HttpCompletionClient::new(&self.config.endpoint)?;
        let generator = Generator::new(client, self.config.endpoint.clone());
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::ProviderError(format!("Failed to create runtime: {}", e)))?;
        info!(url = %self.config.endpoint.url, model = %self.config.endpoint.model, "Requesting generation");
        Ok(rt.block_on(generator.generate(prompt)))
    }

    fn handle_preview(
        &self,
        project: &Path,
        entry: Option<&str>,
        out: &Path,
        host_page: bool,
        watch: bool,
        debounce_ms: u64,
    ) -> Result<String, ApiError> {
        let project_path = self.resolve(project);
        let output = self.resolve(out);

        if watch {
            let mut watcher = PreviewWatcher::new(WatchConfig {
                project_root: project_path,
                entry: entry.map(str::to_string),
                output: output.clone(),
                host_page,
                debounce_ms,
                ..WatchConfig::default()
            })?;
            stop_on_interrupt(watcher.stop_handle());
            watcher.run()?;
            return Ok(format!(
                "Stopped watching after {} refreshes of {}",
                watcher.surface().revision(),
                output.display()
            ));
        }

        let mut state = AppState::new();
        state.open_project(load_project(&project_path, entry)?)?;
        let html = if host_page {
            state.surface().host_page("Website Preview")
        } else {
            state.preview().unwrap_or_default().to_string()
        };
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&output, &html)?;
        Ok(format!(
            "Preview written to {} ({} bytes)",
            output.display(),
            html.len()
        ))
    }

    fn handle_tree(
        &self,
        project: &Path,
        entry: Option<&str>,
        expand: &[String],
        all: bool,
        select: Option<&str>,
        format: &str,
    ) -> Result<String, ApiError> {
        check_format(format)?;
        let mut state = AppState::new();
        state.open_project(load_project(&self.resolve(project), entry)?)?;

        if all {
            if let Some(project) = state.project() {
                let tree = build_tree(&project.files);
                state.expansion_mut().expand_all(&tree);
            }
        }
        for folder in expand {
            state.expansion_mut().expand(folder.trim_matches('/'));
        }
        if let Some(path) = select {
            state.select_file(path)?;
        }

        let rows = state.tree_rows();
        if format == "json" {
            return to_json(&serde_json::json!({
                "rows": rows,
                "selected": state.selected(),
            }));
        }

        let selected = match (state.selected(), state.selected_view()) {
            (Some(path), Some((content, language))) if select.is_some() => {
                Some((path, content, language))
            }
            _ => None,
        };
        Ok(format_tree_text(&rows, selected))
    }

    fn handle_export(
        &self,
        project: &Path,
        entry: Option<&str>,
        out: &Path,
    ) -> Result<String, ApiError> {
        let mut state = AppState::new().with_archive_name(self.config.export.file_name.clone());
        state.open_project(load_project(&self.resolve(project), entry)?)?;
        let path = state.export_project(&self.resolve(out))?;
        let files = state.project().map(|p| p.files.len()).unwrap_or_default();
        Ok(format!(
            "{}\n\n  Archive: {}\n  Files: {}\n",
            format_section_heading("Export"),
            path.display(),
            files
        ))
    }
}

fn check_format(format: &str) -> Result<(), ApiError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(ApiError::InvalidInput(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InvalidInput(format!("Failed to serialize output: {}", e)))
}

/// Clear `running` on Ctrl-C so the watch loop can exit cleanly.
fn stop_on_interrupt(running: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt,
            Err(e) => {
                warn!(error = %e, "Interrupt handler unavailable; stop live preview with a signal");
                return;
            }
        };
        if rt.block_on(tokio::signal::ctrl_c()).is_ok() {
            info!("Interrupt received; stopping live preview");
            running.store(false, Ordering::SeqCst);
        }
    });
}

/// Ask for a template or a custom prompt.
fn prompt_interactive() -> Result<String, ApiError> {
    use dialoguer::{Input, Select};

    let mut items: Vec<String> = TEMPLATES
        .iter()
        .map(|t| format!("{} - {}", t.name, t.description))
        .collect();
    items.push("Custom prompt".to_string());

    let choice = Select::new()
        .with_prompt("What should the website be?")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| ApiError::InvalidInput(format!("Failed to get user input: {}", e)))?;

    match TEMPLATES.get(choice) {
        Some(template) => Ok(template.prompt.to_string()),
        None => Input::new()
            .with_prompt("Describe your website")
            .interact_text()
            .map_err(|e| ApiError::InvalidInput(format!("Failed to get user input: {}", e))),
    }
}
