use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::Model;
use crate::markdown::StyleTag;
use crate::theme::Theme;
use crate::workspace::Tab;

use super::style::{color, tag_style};
use super::{TAB_WIDTH, char_width, compute_layout, gutter_width, overlays, preview, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let _scope = crate::perf::scope("ui.render");
    let area = frame.area();
    let layout = compute_layout(
        area,
        model.preview_visible,
        model.prompt.is_some(),
        model.active_toast().is_some(),
    );

    render_toolbar(model, frame, layout.toolbar);
    render_tab_bar(model, frame, layout.tabs);
    render_editor(model, frame, layout.editor);
    if let Some(preview_area) = layout.preview {
        render_preview(model, frame, preview_area);
    }

    if let Some(prompt_area) = layout.prompt {
        status::render_prompt_bar(model, frame, prompt_area);
    }
    if let Some(toast_area) = layout.toast {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, layout.status);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn bar_style(theme: &Theme) -> Style {
    Style::default()
        .bg(color(theme.bar_bg))
        .fg(color(theme.bar_fg))
}

fn render_toolbar(model: &Model, frame: &mut Frame, area: Rect) {
    let style = bar_style(&model.theme);
    frame.render_widget(Paragraph::new("").style(style), area);
    for (rect, button) in super::toolbar_buttons(area, model.preview_visible) {
        let label = format!(" {} ", button.label(model.preview_visible));
        frame.render_widget(
            Paragraph::new(label).style(style.add_modifier(Modifier::BOLD)),
            rect,
        );
    }
}

fn render_tab_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = &model.theme;
    let style = bar_style(theme);
    frame.render_widget(Paragraph::new("").style(style), area);
    let active = model.workspace.active_index();
    for (index, (rect, tab)) in super::tab_hit_boxes(area, &model.workspace)
        .into_iter()
        .zip(model.workspace.tabs())
        .enumerate()
    {
        let tab_style = if index == active {
            style
                .bg(color(theme.active_tab_bg))
                .add_modifier(Modifier::BOLD)
        } else {
            style
        };
        frame.render_widget(
            Paragraph::new(format!(" {} ", tab.display_title())).style(tab_style),
            rect,
        );
    }
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = &model.theme;
    let tab = model.active_tab();
    let buffer = &tab.buffer;
    let gutter = gutter_width(buffer.line_count());
    let text_width = usize::from(area.width.saturating_sub(gutter));
    let cursor_line = buffer.cursor().line;

    let gutter_style = Style::default().fg(color(theme.gutter_fg));
    let start = tab.scroll_offset;
    let end = (start + usize::from(area.height)).min(buffer.line_count());
    let content = (start..end)
        .map(|line_idx| {
            let number_style = if line_idx == cursor_line {
                gutter_style.add_modifier(Modifier::BOLD)
            } else {
                gutter_style
            };
            let number = format!(
                "{:>width$} ",
                line_idx + 1,
                width = usize::from(gutter.saturating_sub(1))
            );
            let mut spans = vec![Span::styled(number, number_style)];
            spans.extend(editor_line_spans(tab, line_idx, theme, text_width));
            Line::from(spans)
        })
        .collect::<Vec<_>>();

    let background = Style::default()
        .bg(color(theme.editor_bg))
        .fg(color(theme.text_fg()));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content).style(background), area);
}

/// Spans for one buffer line: annotation styles, selection and cursor,
/// clipped to the horizontal scroll window.
pub(super) fn editor_line_spans(
    tab: &Tab,
    line_idx: usize,
    theme: &Theme,
    width: usize,
) -> Vec<Span<'static>> {
    let buffer = &tab.buffer;
    let text = buffer.line_at(line_idx).unwrap_or_default();
    let line_start = buffer.line_start_byte(line_idx);
    let line_end = line_start + text.len();

    let mut tags = vec![StyleTag::Plain; text.len()];
    for annotation in tab.annotations() {
        let span = annotation.span;
        if span.start < line_end && span.end > line_start {
            let from = span.start.max(line_start) - line_start;
            let to = span.end.min(line_end) - line_start;
            tags[from..to].fill(annotation.tag);
        }
    }

    let selection = buffer.selection_bytes();
    let cursor = buffer.cursor();
    let cursor_col = (cursor.line == line_idx).then_some(cursor.col);
    let cell_style = |byte: usize| {
        let mut style = tag_style(theme.tag(tags.get(byte).copied().unwrap_or(StyleTag::Plain)));
        if selection
            .as_ref()
            .is_some_and(|range| range.contains(&(line_start + byte)))
        {
            style = style.bg(color(theme.selection_bg));
        }
        if cursor_col == Some(byte) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    };

    let h_scroll = tab.h_scroll;
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    let mut x = 0;
    for (idx, ch) in text.char_indices() {
        let char_cols = char_width(ch);
        if x < h_scroll {
            x += char_cols;
            continue;
        }
        if x - h_scroll + char_cols > width {
            break;
        }
        let style = cell_style(idx);
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        if ch == '\t' {
            run.push_str(&" ".repeat(TAB_WIDTH));
        } else {
            run.push(ch);
        }
        x += char_cols;
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }

    // Cursor past the last character
    if cursor_col == Some(text.len()) && x >= h_scroll && x - h_scroll < width {
        spans.push(Span::styled(
            " ",
            tag_style(theme.plain).add_modifier(Modifier::REVERSED),
        ));
    }
    spans
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = &model.theme;
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(color(theme.gutter_fg)));
    let inner = block.inner(area);

    let rows = preview::wrapped_row_count(&model.preview_lines, inner.width);
    let max_scroll = rows.saturating_sub(usize::from(inner.height));
    let scroll = u16::try_from(model.preview_scroll.min(max_scroll)).unwrap_or(u16::MAX);

    let background = Style::default()
        .bg(color(theme.editor_bg))
        .fg(color(theme.text_fg()));
    let paragraph = Paragraph::new(model.preview_lines.clone())
        .block(block)
        .style(background)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
