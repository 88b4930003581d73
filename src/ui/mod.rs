//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`compute_layout`]: Screen regions shared by rendering and mouse input
//! - [`style`]: Theme to terminal style conversion
//! - preview line building with syntax-colored code blocks

pub mod style;

mod overlays;
mod preview;
mod render;
mod status;

pub use preview::{preview_lines, wrapped_row_count};
pub use render::render;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::editor::FormatCommand;
use crate::workspace::Workspace;

pub const EDITOR_WIDTH_PERCENT: u16 = 35;
pub const PREVIEW_WIDTH_PERCENT: u16 = 65;

/// Display columns a tab character advances in the editor.
pub const TAB_WIDTH: usize = 4;

/// Regions of the screen for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub toolbar: Rect,
    pub tabs: Rect,
    pub editor: Rect,
    /// Present while the preview is visible
    pub preview: Option<Rect>,
    pub prompt: Option<Rect>,
    pub toast: Option<Rect>,
    pub status: Rect,
}

/// Split the screen: toolbar and tab bar on top, footer rows at the bottom,
/// editor and preview side by side in between.
pub fn compute_layout(
    area: Rect,
    preview_visible: bool,
    prompt_active: bool,
    toast_active: bool,
) -> ScreenLayout {
    let footer_rows = 1 + u16::from(prompt_active) + u16::from(toast_active);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(footer_rows),
        ])
        .split(area);
    let (toolbar, tabs, body, footer) = (rows[0], rows[1], rows[2], rows[3]);

    let (editor, preview) = if preview_visible {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(EDITOR_WIDTH_PERCENT),
                Constraint::Percentage(PREVIEW_WIDTH_PERCENT),
            ])
            .split(body);
        (columns[0], Some(columns[1]))
    } else {
        (body, None)
    };

    let row = |offset: u16| Rect {
        y: footer.y + offset,
        height: 1,
        ..footer
    };
    let prompt = prompt_active.then(|| row(0));
    let toast = toast_active.then(|| row(u16::from(prompt_active)));
    let status = row(footer.height.saturating_sub(1));

    ScreenLayout {
        toolbar,
        tabs,
        editor,
        preview,
        prompt,
        toast,
        status,
    }
}

/// A clickable toolbar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarButton {
    New,
    Open,
    Save,
    Format(FormatCommand),
    Preview,
}

impl ToolbarButton {
    const ALL: [Self; 8] = [
        Self::New,
        Self::Open,
        Self::Save,
        Self::Format(FormatCommand::Bold),
        Self::Format(FormatCommand::Italic),
        Self::Format(FormatCommand::Code),
        Self::Format(FormatCommand::Link),
        Self::Preview,
    ];

    pub const fn label(self, preview_visible: bool) -> &'static str {
        match self {
            Self::New => "+ NEW",
            Self::Open => "OPEN",
            Self::Save => "SAVE",
            Self::Format(command) => command.label(),
            Self::Preview if preview_visible => "PREVIEW \u{25bc}",
            Self::Preview => "PREVIEW \u{25b6}",
        }
    }
}

/// Toolbar buttons and the cells each occupies, left to right.
///
/// Buttons are drawn as ` LABEL ` with one column between them; buttons
/// that don't fit are dropped.
pub fn toolbar_buttons(area: Rect, preview_visible: bool) -> Vec<(Rect, ToolbarButton)> {
    let labels = ToolbarButton::ALL.map(|button| (button, button.label(preview_visible)));
    layout_strip(area, labels.iter().map(|(_, label)| label.width() + 2))
        .into_iter()
        .zip(labels)
        .map(|(rect, (button, _))| (rect, button))
        .collect()
}

/// Cells of each tab title in the tab bar, in tab order.
pub fn tab_hit_boxes(area: Rect, workspace: &Workspace) -> Vec<Rect> {
    layout_strip(
        area,
        workspace
            .tabs()
            .iter()
            .map(|tab| tab.display_title().width() + 2),
    )
}

fn layout_strip(area: Rect, widths: impl Iterator<Item = usize>) -> Vec<Rect> {
    let mut rects = Vec::new();
    let mut x = area.x;
    let right = area.x + area.width;
    for width in widths {
        let width = u16::try_from(width).unwrap_or(u16::MAX);
        if x >= right || width > right - x {
            break;
        }
        rects.push(Rect::new(x, area.y, width, 1));
        x = x.saturating_add(width + 1);
    }
    rects
}

/// Width of the line number gutter, including its trailing space.
pub fn gutter_width(total_lines: usize) -> u16 {
    let digits = total_lines.max(1).ilog10() + 1;
    u16::try_from(digits).unwrap_or(u16::MAX).max(3) + 1
}

/// Display width of editor text; tabs count as [`TAB_WIDTH`].
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Byte index of the character drawn at display `column`, or the line end.
pub fn byte_at_column(text: &str, column: usize) -> usize {
    let mut x = 0;
    for (idx, ch) in text.char_indices() {
        let width = char_width(ch);
        if column < x + width.max(1) {
            return idx;
        }
        x += width;
    }
    text.len()
}

pub(crate) fn char_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        ch.width().unwrap_or(0)
    }
}
