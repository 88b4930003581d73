//! Styled lines for the preview pane.

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use super::style::{color, tag_style};
use crate::markdown::{PreviewNode, StyleTag};
use crate::syntax::highlight_code;
use crate::theme::Theme;

const RULE_WIDTH: usize = 40;

/// Turn preview nodes into terminal lines.
///
/// Runs of code block lines that share a fence language are colored with
/// syntect; unknown languages keep the theme's code block style.
pub fn preview_lines(nodes: &[PreviewNode], theme: &Theme) -> Vec<Line<'static>> {
    let _scope = crate::perf::scope("ui.preview_lines");
    let rows = split_rows(nodes);
    let mut lines = Vec::with_capacity(rows.len());
    let mut i = 0;
    while i < rows.len() {
        if let Some(language) = code_row_language(&rows[i]) {
            let end = rows[i..]
                .iter()
                .position(|row| code_row_language(row) != Some(language))
                .map_or(rows.len(), |offset| i + offset);
            let code = rows[i..end]
                .iter()
                .map(|row| row[0].text)
                .collect::<Vec<_>>()
                .join("\n");
            lines.extend(code_block_lines(language, &code, end - i, theme));
            i = end;
        } else {
            lines.push(text_line(&rows[i], theme));
            i += 1;
        }
    }
    lines
}

/// Rows the lines take when wrapped at `width` columns.
///
/// Counts character wrapping, so it can undercount word-wrapped paragraphs
/// slightly; it bounds scrolling, not layout.
pub fn wrapped_row_count(lines: &[Line<'_>], width: u16) -> usize {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}

/// A node fragment on a single preview row.
struct RowNode<'a> {
    text: &'a str,
    tag: StyleTag,
    language: Option<&'a str>,
}

fn split_rows(nodes: &[PreviewNode]) -> Vec<Vec<RowNode<'_>>> {
    let mut rows = vec![Vec::new()];
    for node in nodes {
        for (index, piece) in node.text.split('\n').enumerate() {
            if index > 0 {
                rows.push(Vec::new());
            }
            let piece = piece.strip_suffix('\r').unwrap_or(piece);
            if piece.is_empty() && node.tag == StyleTag::Plain {
                continue;
            }
            if let Some(row) = rows.last_mut() {
                row.push(RowNode {
                    text: piece,
                    tag: node.tag,
                    language: node.language.as_deref(),
                });
            }
        }
    }
    rows
}

/// Language key of a row that is a single code block line.
///
/// `Some("")` marks code without a language.
fn code_row_language<'a>(row: &[RowNode<'a>]) -> Option<&'a str> {
    match row {
        [node] if node.tag == StyleTag::CodeBlock => Some(node.language.unwrap_or("")),
        _ => None,
    }
}

fn text_line(row: &[RowNode<'_>], theme: &Theme) -> Line<'static> {
    let plain = tag_style(theme.plain);
    let spans = row
        .iter()
        .enumerate()
        .map(|(index, node)| match node.tag {
            StyleTag::Rule => Span::styled("\u{2500}".repeat(RULE_WIDTH), tag_style(theme.rule)),
            StyleTag::BlockQuote if index == 0 => Span::styled(
                format!("\u{2502} {}", node.text),
                tag_style(theme.tag(StyleTag::BlockQuote)),
            ),
            StyleTag::Image => Span::styled(
                format!("[image: {}]", node.text),
                tag_style(theme.tag(StyleTag::Image)),
            ),
            StyleTag::Plain => Span::styled(node.text.to_string(), plain),
            tag => Span::styled(node.text.to_string(), tag_style(theme.tag(tag))),
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

fn code_block_lines(
    language: &str,
    code: &str,
    row_count: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let base = tag_style(theme.code_block);
    let language = (!language.is_empty()).then_some(language);
    let mut highlighted = highlight_code(language, code, theme.background);
    // `str::lines` drops a trailing empty line; keep one row per source line
    highlighted.resize_with(row_count, Vec::new);

    highlighted
        .into_iter()
        .map(|runs| {
            let mut spans = vec![Span::styled(" ", base)];
            for run in runs {
                let style = run.fg.map_or(base, |fg| base.fg(color(fg)));
                spans.push(Span::styled(run.text, style));
            }
            let used = spans.iter().map(|span| span.content.width()).sum::<usize>();
            if used < RULE_WIDTH {
                spans.push(Span::styled(" ".repeat(RULE_WIDTH - used), base));
            }
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::render;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_one_line_per_source_line() {
        let lines = preview_lines(&render("# Title\n\nSome **bold** text"), &Theme::dark());
        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[0]), "Title");
        assert_eq!(line_text(&lines[1]), "");
        assert_eq!(line_text(&lines[2]), "Some bold text");
    }

    #[test]
    fn test_fence_lines_are_dropped_and_code_kept() {
        let text = "```rust\nfn main() {}\n```\nafter";
        let lines = preview_lines(&render(text), &Theme::dark());
        assert_eq!(lines.len(), 2);
        assert!(line_text(&lines[0]).contains("fn main() {}"));
        assert_eq!(line_text(&lines[1]), "after");
    }

    #[test]
    fn test_known_language_gets_several_colors() {
        let text = "```rust\nlet x = \"s\";\n```";
        let lines = preview_lines(&render(text), &Theme::dark());
        let colors: std::collections::HashSet<_> =
            lines[0].spans.iter().filter_map(|span| span.style.fg).collect();
        assert!(colors.len() > 1);
    }

    #[test]
    fn test_unknown_language_keeps_code_block_style() {
        let text = "```nosuchlang\nplain code\n```";
        let theme = Theme::dark();
        let lines = preview_lines(&render(text), &theme);
        let expected = tag_style(theme.code_block).fg;
        assert!(lines[0].spans.iter().all(|span| span.style.fg == expected));
    }

    #[test]
    fn test_blank_line_inside_code_is_kept() {
        let text = "```\na\n\nb\n```";
        let lines = preview_lines(&render(text), &Theme::dark());
        assert_eq!(lines.len(), 3);
        assert!(line_text(&lines[2]).contains('b'));
    }

    #[test]
    fn test_rule_and_quote_decorations() {
        let lines = preview_lines(&render("---\n> quoted"), &Theme::dark());
        assert!(line_text(&lines[0]).starts_with('\u{2500}'));
        assert_eq!(line_text(&lines[1]), "\u{2502} quoted");
    }

    #[test]
    fn test_quote_bar_drawn_once_per_row() {
        let lines = preview_lines(&render("> a **b** c"), &Theme::dark());
        assert_eq!(line_text(&lines[0]), "\u{2502} a b c");
    }

    #[test]
    fn test_crlf_text_has_no_carriage_returns() {
        let lines = preview_lines(&render("one\r\n```\r\ncode\r\n```\r\ntwo"), &Theme::dark());
        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[0]), "one");
        assert!(line_text(&lines[1]).contains("code"));
        assert_eq!(line_text(&lines[2]), "two");
        assert!(lines.iter().all(|line| !line_text(line).contains('\r')));
    }

    #[test]
    fn test_wrapped_row_count() {
        let lines = vec![Line::raw("x".repeat(25)), Line::raw("")];
        assert_eq!(wrapped_row_count(&lines, 10), 4);
    }
}
