//! Syntax coloring for fenced code in the preview.
//!
//! Uses syntect with the bundled Sublime Text syntax definitions. Languages
//! syntect doesn't know fall back to uncolored runs, which the preview then
//! draws in the theme's code block style.

use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme as SyntectTheme, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::theme::{Background, Rgb};

/// A run of code text with an optional foreground color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRun {
    pub text: String,
    pub fg: Option<Rgb>,
}

impl CodeRun {
    fn uncolored(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fg: None,
        }
    }
}

/// Color `code` as `language`, one vector of runs per line.
///
/// Line terminators are not included in the runs.
pub fn highlight_code(
    language: Option<&str>,
    code: &str,
    background: Background,
) -> Vec<Vec<CodeRun>> {
    let syntax_set = syntax_set();
    let Some(syntax) = language.and_then(find_syntax) else {
        return code.lines().map(|line| vec![CodeRun::uncolored(line)]).collect();
    };

    let _scope = crate::perf::scope("syntax.highlight_code");
    let mut highlighter = HighlightLines::new(syntax, theme(background));
    let mut lines = Vec::new();
    for line in code.lines() {
        // Newline-aware syntaxes need the terminator to close line comments
        let with_newline = format!("{line}\n");
        let ranges = match highlighter.highlight_line(&with_newline, syntax_set) {
            Ok(ranges) => ranges,
            Err(err) => {
                tracing::debug!(%err, "syntect failed on line; leaving uncolored");
                lines.push(vec![CodeRun::uncolored(line)]);
                continue;
            }
        };
        let runs = ranges
            .into_iter()
            .filter_map(|(style, text)| {
                let text = text.trim_end_matches('\n');
                if text.is_empty() {
                    return None;
                }
                let fg = Rgb::new(style.foreground.r, style.foreground.g, style.foreground.b);
                Some(CodeRun {
                    text: text.to_string(),
                    fg: Some(adjust_fg_for_background(fg, background)),
                })
            })
            .collect();
        lines.push(runs);
    }
    lines
}

fn find_syntax(language: &str) -> Option<&'static syntect::parsing::SyntaxReference> {
    let syntax_set = syntax_set();
    syntax_set
        .find_syntax_by_token(language)
        .or_else(|| syntax_set.find_syntax_by_name(language))
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _scope = crate::perf::scope("syntax.syntax_set.load_defaults");
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme(background: Background) -> &'static SyntectTheme {
    static DARK: OnceLock<SyntectTheme> = OnceLock::new();
    static LIGHT: OnceLock<SyntectTheme> = OnceLock::new();
    let (cell, preferred) = match background {
        Background::Dark => (
            &DARK,
            [
                "Monokai Extended",
                "Monokai Extended Bright",
                "Solarized (dark)",
                "base16-ocean.dark",
            ]
            .as_slice(),
        ),
        Background::Light => (
            &LIGHT,
            ["InspiredGitHub", "Solarized (light)", "base16-ocean.light"].as_slice(),
        ),
    };
    cell.get_or_init(|| {
        let _scope = crate::perf::scope("syntax.theme.load_defaults");
        let theme_set = ThemeSet::load_defaults();
        for name in preferred {
            if let Some(theme) = theme_set.themes.get(*name) {
                return theme.clone();
            }
        }
        theme_set
            .themes
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    })
}

/// Darken bright syntax colors so they stay readable on light backgrounds.
fn adjust_fg_for_background(color: Rgb, background: Background) -> Rgb {
    match background {
        Background::Dark => color,
        Background::Light => {
            if color.luma() < 155.0 {
                return color;
            }
            Rgb::new(darken(color.r), darken(color.g), darken(color.b))
        }
    }
}

// 0.42 * 255 stays in range
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn darken(v: u8) -> u8 {
    (f32::from(v) * 0.42).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_rust_produces_colored_runs() {
        let code = "fn main() {\n    let x = 1;\n}\n";
        let lines = highlight_code(Some("rust"), code, Background::Dark);

        assert_eq!(lines.len(), 3);
        assert!(lines.iter().flatten().any(|run| run.fg.is_some()));
    }

    #[test]
    fn test_runs_reassemble_each_line() {
        let code = "let a = \"x\"; // note\nlet b = 2;";
        let lines = highlight_code(Some("rs"), code, Background::Dark);
        let rebuilt: Vec<String> = lines
            .iter()
            .map(|runs| runs.iter().map(|run| run.text.as_str()).collect())
            .collect();
        assert_eq!(rebuilt, vec!["let a = \"x\"; // note", "let b = 2;"]);
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain() {
        let lines = highlight_code(Some("nope"), "just text", Background::Dark);
        assert_eq!(lines, vec![vec![CodeRun::uncolored("just text")]]);
    }

    #[test]
    fn test_no_language_is_uncolored() {
        let lines = highlight_code(None, "a\nb", Background::Light);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().flatten().all(|run| run.fg.is_none()));
    }

    #[test]
    fn test_light_mode_darkens_bright_fg() {
        let bright = Rgb::new(240, 230, 120);
        let adjusted = adjust_fg_for_background(bright, Background::Light);
        assert!(adjusted.r < bright.r);
        assert!(adjusted.g < bright.g);
        assert!(adjusted.b < bright.b);
        assert!(adjusted.luma() < 120.0, "still too bright: {}", adjusted.luma());
    }

    #[test]
    fn test_dark_mode_keeps_colors() {
        let color = Rgb::new(240, 230, 120);
        assert_eq!(adjust_fg_for_background(color, Background::Dark), color);
    }
}
