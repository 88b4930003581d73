use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::display_width;
use super::style::color;
use crate::app::{Model, ToastLevel};

pub fn render_prompt_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(prompt) = model.prompt.as_ref() else {
        return;
    };
    let label = format!(" {}: ", prompt.kind.label());
    let line = Line::from(vec![
        Span::styled(label.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(prompt.input.clone()),
    ]);
    let bar = Paragraph::new(line).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(bar, area);

    let offset = display_width(&label) + display_width(&prompt.input);
    let x = area
        .x
        .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
        .min(area.right().saturating_sub(1));
    frame.set_cursor_position(Position::new(x, area.y));
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let tab = model.active_tab();
    let cursor = tab.buffer.cursor();
    let line_text = tab.buffer.line_at(cursor.line).unwrap_or_default();
    let column = line_text
        .get(..cursor.col)
        .map_or(cursor.col, |prefix| prefix.chars().count());

    let modified = if tab.is_dirty() { " [modified]" } else { "" };
    let status = format!(
        " {}{}  Ln {}, Col {}  Tab {}/{}  F1:help",
        tab.title(),
        modified,
        cursor.line + 1,
        column + 1,
        model.workspace.active_index() + 1,
        model.workspace.len(),
    );

    let style = Style::default()
        .bg(color(model.theme.bar_bg))
        .fg(color(model.theme.bar_fg));
    frame.render_widget(Paragraph::new(status).style(style), area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
