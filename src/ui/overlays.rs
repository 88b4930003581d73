use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

type Section = (&'static str, &'static [(&'static str, &'static str)]);

const LEFT_SECTIONS: &[Section] = &[
    (
        "Tabs",
        &[
            ("Ctrl-n / Ctrl-t", "New tab"),
            ("Ctrl-w", "Close tab"),
            ("Ctrl-r", "Rename tab"),
            ("Alt+Left/Right", "Prev / next tab"),
            ("Ctrl+PgUp/PgDn", "Prev / next tab"),
            ("Alt+1..9", "Select tab"),
        ],
    ),
    (
        "Files",
        &[
            ("Ctrl-o", "Open file"),
            ("Ctrl-s", "Save"),
            ("Alt-s", "Save as"),
        ],
    ),
    ("Other", &[("Ctrl-q / Ctrl-c", "Quit"), ("F1", "Toggle help")]),
];

const RIGHT_SECTIONS: &[Section] = &[
    (
        "Editing",
        &[
            ("Arrows, Home/End", "Move cursor"),
            ("Shift+movement", "Extend selection"),
            ("Ctrl+Left/Right", "Word movement"),
            ("Ctrl+Home/End", "Top / bottom"),
            ("Ctrl-a", "Select all"),
            ("Ctrl-b", "Bold"),
            ("Ctrl-i / Alt-i", "Italic"),
            ("Ctrl-e", "Inline code"),
            ("Ctrl-k", "Link"),
        ],
    ),
    (
        "View",
        &[
            ("Ctrl-p", "Toggle preview"),
            ("Alt+Up/Down", "Scroll preview"),
            ("Mouse wheel", "Scroll pane"),
        ],
    ),
];

fn section_lines(sections: &[Section], section_style: Style) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, (title, bindings)) in sections.iter().enumerate() {
        if index > 0 {
            lines.push(Line::raw(""));
        }
        lines.push(Line::styled(*title, section_style));
        for (keys, action) in *bindings {
            lines.push(Line::raw(format!("  {keys:<17}{action}")));
        }
    }
    lines
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(4).max(48);
    let popup_height = area.height.saturating_sub(2).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let left = section_lines(LEFT_SECTIONS, section_style);
    let right = section_lines(RIGHT_SECTIONS, section_style);
    let config = vec![
        Line::styled("Config", section_style),
        Line::raw(format!("  Global: {global_cfg}")),
        Line::raw(format!("  Local override: {local_cfg}")),
    ];

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let columns_height = u16::try_from(left.len().max(right.len())).unwrap_or(u16::MAX);
    let [columns_area, config_area, footer_area] = Layout::vertical([
        Constraint::Length(columns_height),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);
    let [left_area, right_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(columns_area);

    frame.render_widget(Paragraph::new(left), left_area);
    frame.render_widget(Paragraph::new(right), right_area);
    frame.render_widget(Paragraph::new(config), config_area);

    let footer = Line::styled("Any key closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
