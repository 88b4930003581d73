use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::text::Line;

use crate::config::Settings;
use crate::markdown::{self, PreviewNode};
use crate::theme::Theme;
use crate::workspace::{Tab, Workspace};

/// Severity of a footer notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// What the footer prompt is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Open,
    SaveAs,
    Rename,
}

impl PromptKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::SaveAs => "Save as",
            Self::Rename => "Rename tab",
        }
    }
}

/// A one-line text prompt shown above the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Open tabs
    pub workspace: Workspace,
    /// Colors, fixed for the session
    pub theme: Theme,
    /// Preview nodes for the active tab
    pub preview: Vec<PreviewNode>,
    /// Styled preview lines, rebuilt with `preview`
    pub preview_lines: Vec<Line<'static>>,
    /// Whether the preview pane is shown
    pub preview_visible: bool,
    /// First visible preview line
    pub preview_scroll: usize,
    /// Active footer prompt
    pub prompt: Option<Prompt>,
    /// State remembered between runs
    pub settings: Settings,
    /// Where `settings` is stored; `None` disables persistence
    pub settings_path: Option<PathBuf>,
    /// Terminal width in cells
    pub width: u16,
    /// Terminal height in cells
    pub height: u16,
    /// Global config file path, shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override config path, shown in help
    pub config_local_path: Option<PathBuf>,
    pub help_visible: bool,
    pub should_quit: bool,
    /// A quit was refused once because of unsaved tabs
    pub quit_confirmed: bool,
    /// A close was refused once because the tab is unsaved
    pub close_confirmed: bool,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("tabs", &self.workspace.len())
            .field("active", &self.workspace.active_index())
            .field("preview_nodes", &self.preview.len())
            .field("preview_visible", &self.preview_visible)
            .field("preview_scroll", &self.preview_scroll)
            .field("prompt", &self.prompt)
            .field("size", &(self.width, self.height))
            .field("help_visible", &self.help_visible)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model for a workspace and terminal size.
    pub fn new(workspace: Workspace, theme: Theme, size: (u16, u16)) -> Self {
        let mut model = Self {
            workspace,
            theme,
            preview: Vec::new(),
            preview_lines: Vec::new(),
            preview_visible: true,
            preview_scroll: 0,
            prompt: None,
            settings: Settings::default(),
            settings_path: None,
            width: size.0,
            height: size.1,
            config_global_path: None,
            config_local_path: None,
            help_visible: false,
            should_quit: false,
            quit_confirmed: false,
            close_confirmed: false,
            toast: None,
        };
        model.refresh_preview();
        model
    }

    pub fn active_tab(&self) -> &Tab {
        self.workspace.active()
    }

    pub(super) fn active_tab_mut(&mut self) -> &mut Tab {
        self.workspace.active_mut()
    }

    /// Re-render the preview for the active tab and clamp its scroll.
    pub(super) fn refresh_preview(&mut self) {
        let _scope = crate::perf::scope("app.refresh_preview");
        let text = self.workspace.active().buffer.text();
        self.preview = markdown::render(&text);
        self.preview_lines = crate::ui::preview_lines(&self.preview, &self.theme);
        self.clamp_preview_scroll();
    }

    /// Highlight and preview again after the active buffer changed.
    pub(super) fn after_edit(&mut self) {
        self.active_tab_mut().rehighlight();
        self.refresh_preview();
        self.ensure_cursor_visible();
    }

    pub(super) fn clamp_preview_scroll(&mut self) {
        let max = self.layout().preview.map_or(0, |area| {
            // One column goes to the pane border
            let width = area.width.saturating_sub(1);
            let rows = crate::ui::wrapped_row_count(&self.preview_lines, width);
            rows.saturating_sub(usize::from(area.height))
        });
        self.preview_scroll = self.preview_scroll.min(max);
    }

    /// Screen regions for the current size and visible bars.
    pub fn layout(&self) -> crate::ui::ScreenLayout {
        crate::ui::compute_layout(
            Rect::new(0, 0, self.width, self.height),
            self.preview_visible,
            self.prompt.is_some(),
            self.toast.is_some(),
        )
    }

    /// Rows of text the editor pane can show.
    pub fn editor_rows(&self) -> usize {
        self.layout().editor.height as usize
    }

    /// Columns available for text in the editor pane, after the gutter.
    pub fn editor_text_columns(&self) -> usize {
        let gutter = crate::ui::gutter_width(self.active_tab().buffer.line_count());
        self.layout().editor.width.saturating_sub(gutter) as usize
    }

    /// Scroll the active tab so the cursor stays on screen.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let rows = self.editor_rows().max(1);
        let columns = self.editor_text_columns().max(1);
        let tab = self.workspace.active_mut();
        let cursor = tab.buffer.cursor();

        if cursor.line < tab.scroll_offset {
            tab.scroll_offset = cursor.line;
        } else if cursor.line >= tab.scroll_offset + rows {
            tab.scroll_offset = cursor.line + 1 - rows;
        }

        let line = tab.buffer.line_at(cursor.line).unwrap_or_default();
        let prefix = line.get(..cursor.col).unwrap_or(&line);
        let cursor_x = crate::ui::display_width(prefix);
        if cursor_x < tab.h_scroll {
            tab.h_scroll = cursor_x;
        } else if cursor_x >= tab.h_scroll + columns {
            tab.h_scroll = cursor_x + 1 - columns;
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Prompt pre-fill: the last used folder with a trailing separator.
    pub(super) fn folder_prefill(&self) -> String {
        self.settings
            .last_folder
            .as_ref()
            .map(|dir| {
                let mut text = dir.display().to_string();
                if !text.ends_with(std::path::MAIN_SEPARATOR) {
                    text.push(std::path::MAIN_SEPARATOR);
                }
                text
            })
            .unwrap_or_default()
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            workspace: Workspace::default(),
            theme: Theme::default(),
            preview: Vec::new(),
            preview_lines: Vec::new(),
            preview_visible: true,
            preview_scroll: 0,
            prompt: None,
            settings: Settings::default(),
            settings_path: None,
            width: 80,
            height: 24,
            config_global_path: None,
            config_local_path: None,
            help_visible: false,
            should_quit: false,
            quit_confirmed: false,
            close_confirmed: false,
            toast: None,
        }
    }
}
