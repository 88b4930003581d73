//! Conversion from theme colors to terminal styles.
//!
//! Colors are emitted as 24-bit RGB when the terminal advertises truecolor
//! and mapped onto the xterm 256-color cube otherwise.

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};

use crate::theme::{Rgb, TagStyle};

/// Terminal style for a theme tag style.
pub fn tag_style(tag: TagStyle) -> Style {
    let mut style = Style::default();
    if let Some(fg) = tag.fg {
        style = style.fg(color(fg));
    }
    if let Some(bg) = tag.bg {
        style = style.bg(color(bg));
    }
    if tag.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if tag.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if tag.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Terminal color for an RGB value.
pub fn color(rgb: Rgb) -> Color {
    if supports_truecolor() {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    } else {
        Color::Indexed(rgb_to_xterm_256(rgb.r, rgb.g, rgb.b))
    }
}

fn supports_truecolor() -> bool {
    static TRUECOLOR: OnceLock<bool> = OnceLock::new();
    *TRUECOLOR.get_or_init(|| {
        if let Ok(force) = std::env::var("MARKPAD_TRUECOLOR") {
            let value = force.to_ascii_lowercase();
            return matches!(value.as_str(), "1" | "true" | "yes" | "on");
        }
        supports_truecolor_from_env(
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
        )
    })
}

fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    if let Some(ct) = colorterm {
        let lower = ct.to_ascii_lowercase();
        if lower.contains("truecolor") || lower.contains("24bit") {
            return true;
        }
    }
    if let Some(t) = term {
        let lower = t.to_ascii_lowercase();
        if lower.contains("direct") || lower.contains("truecolor") {
            return true;
        }
    }
    false
}

fn rgb_to_xterm_256(r: u8, g: u8, b: u8) -> u8 {
    // Result is always 0-5, fits in u8
    #[allow(clippy::cast_possible_truncation)]
    let to_cube = |v: u8| ((u16::from(v) * 5) / 255) as u8;
    let ri = to_cube(r);
    let gi = to_cube(g);
    let bi = to_cube(b);
    16 + (36 * ri) + (6 * gi) + bi
}
