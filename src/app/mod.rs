//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, Prompt, PromptKind, ToastLevel};
pub use update::{Message, Motion, update};

use std::path::PathBuf;

use crate::theme::Theme;
use crate::workspace::Workspace;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    files: Vec<PathBuf>,
    preview_visible: bool,
    theme: Theme,
    settings_path: Option<PathBuf>,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application opening `files`, one tab each.
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            preview_visible: true,
            theme: Theme::default(),
            settings_path: None,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Set initial preview visibility.
    pub fn with_preview_visible(mut self, visible: bool) -> Self {
        self.preview_visible = visible;
        self
    }

    /// Use a theme built for the terminal background.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Persist the last used folder to this file.
    pub fn with_settings_path(mut self, path: Option<PathBuf>) -> Self {
        self.settings_path = path;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// Build the starting model: settings loaded, command-line files opened.
    ///
    /// Files that don't exist yet open as empty tabs bound to their path.
    pub fn initial_model(&self, size: (u16, u16)) -> Model {
        let mut model = Model::new(Workspace::new(), self.theme.clone(), size);
        model.preview_visible = self.preview_visible;
        model.settings_path.clone_from(&self.settings_path);
        model.settings = self
            .settings_path
            .as_deref()
            .map(crate::config::load_settings)
            .unwrap_or_default();
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        for path in &self.files {
            if path.exists() {
                effects::open_path(&mut model, path.clone());
            } else {
                // Saving creates it
                model.workspace.open_document(path.clone(), "");
                model.refresh_preview();
            }
        }
        if self.files.len() > 1 {
            model.workspace.select(0);
            model.refresh_preview();
        }
        model
    }
}
