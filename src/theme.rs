//! Color theme for the editor and preview.
//!
//! A [`Theme`] is built once at startup for the terminal background and then
//! only read. Every [`StyleTag`] maps to one [`TagStyle`]; the UI converts
//! those to terminal styles.

use crate::markdown::StyleTag;

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness, 0-255.
    pub fn luma(self) -> f32 {
        0.0722f32.mul_add(
            f32::from(self.b),
            0.2126f32.mul_add(f32::from(self.r), 0.7152 * f32::from(self.g)),
        )
    }
}

/// Whether the terminal draws on a dark or a light background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Dark,
    Light,
}

impl Background {
    /// Guess from the `COLORFGBG` environment variable; dark when unknown.
    pub fn detect() -> Self {
        Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }

    /// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); a background
    /// palette index of 7 or more means a light terminal.
    pub fn from_colorfgbg(colorfgbg: Option<&str>) -> Self {
        let Some(value) = colorfgbg else {
            return Self::Dark;
        };
        let bg_str = value.rsplit(';').next().unwrap_or(value);
        let Ok(bg) = bg_str.parse::<u8>() else {
            return Self::Dark;
        };
        if bg >= 7 { Self::Light } else { Self::Dark }
    }
}

/// Display attributes for one style tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TagStyle {
    const fn fg(color: Rgb) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    const fn on(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }
}

/// Styles for every tag plus the editor chrome.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background this theme was built for
    pub background: Background,
    /// Heading levels 1-6
    pub headings: [TagStyle; 6],
    pub bold: TagStyle,
    pub italic: TagStyle,
    pub bold_italic: TagStyle,
    /// Inline code
    pub code: TagStyle,
    /// Fenced and indented code lines
    pub code_block: TagStyle,
    pub link: TagStyle,
    pub image: TagStyle,
    /// List bullets and numbers
    pub list_marker: TagStyle,
    pub quote: TagStyle,
    /// Horizontal rule
    pub rule: TagStyle,
    /// Unstyled text
    pub plain: TagStyle,
    /// Editor and preview background
    pub editor_bg: Rgb,
    /// Line number gutter text
    pub gutter_fg: Rgb,
    /// Selected text background
    pub selection_bg: Rgb,
    /// Toolbar and tab bar background
    pub bar_bg: Rgb,
    /// Toolbar and tab bar text
    pub bar_fg: Rgb,
    /// Active tab highlight
    pub active_tab_bg: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Build the theme for a background.
    pub fn for_background(background: Background) -> Self {
        match background {
            Background::Dark => Self::dark(),
            Background::Light => Self::light(),
        }
    }

    /// Colors for dark terminals.
    pub fn dark() -> Self {
        let heading = TagStyle::fg(Rgb::new(0x89, 0xb4, 0xfa)).bold();
        let fg = Rgb::new(0xd4, 0xd4, 0xd4);
        Self {
            background: Background::Dark,
            headings: [heading.underline(), heading, heading, heading, heading, heading],
            bold: TagStyle::fg(Rgb::new(0xfa, 0xb3, 0x87)).bold(),
            italic: TagStyle::fg(Rgb::new(0x94, 0xe2, 0xd5)).italic(),
            bold_italic: TagStyle::fg(Rgb::new(0xfa, 0xb3, 0x87)).bold().italic(),
            code: TagStyle::fg(Rgb::new(0xf3, 0x8b, 0xa8)).on(Rgb::new(0x2b, 0x2b, 0x2b)),
            code_block: TagStyle::fg(Rgb::new(0xf3, 0x8b, 0xa8)).on(Rgb::new(0x2b, 0x2b, 0x2b)),
            link: TagStyle::fg(Rgb::new(0x89, 0xb4, 0xfa)).underline(),
            image: TagStyle::fg(Rgb::new(0xcb, 0xa6, 0xf7)).italic(),
            list_marker: TagStyle::fg(Rgb::new(0xf9, 0xe2, 0xaf)),
            quote: TagStyle::fg(Rgb::new(0xa6, 0xad, 0xc8)).italic(),
            rule: TagStyle::fg(Rgb::new(0x58, 0x5b, 0x70)),
            plain: TagStyle::fg(fg),
            editor_bg: Rgb::new(0x1e, 0x1e, 0x1e),
            gutter_fg: Rgb::new(0x6c, 0x70, 0x86),
            selection_bg: Rgb::new(0x26, 0x4f, 0x78),
            bar_bg: Rgb::new(0x2d, 0x2d, 0x2d),
            bar_fg: fg,
            active_tab_bg: Rgb::new(0x44, 0x47, 0x5a),
        }
    }

    /// Colors for light terminals.
    pub fn light() -> Self {
        let heading = TagStyle::fg(Rgb::new(0x1e, 0x66, 0xf5)).bold();
        let fg = Rgb::new(0x2b, 0x2b, 0x2b);
        Self {
            background: Background::Light,
            headings: [heading.underline(), heading, heading, heading, heading, heading],
            bold: TagStyle::fg(Rgb::new(0xc0, 0x4a, 0x00)).bold(),
            italic: TagStyle::fg(Rgb::new(0x17, 0x92, 0x99)).italic(),
            bold_italic: TagStyle::fg(Rgb::new(0xc0, 0x4a, 0x00)).bold().italic(),
            code: TagStyle::fg(Rgb::new(0xa3, 0x15, 0x15)).on(Rgb::new(0xee, 0xee, 0xee)),
            code_block: TagStyle::fg(Rgb::new(0xa3, 0x15, 0x15)).on(Rgb::new(0xee, 0xee, 0xee)),
            link: TagStyle::fg(Rgb::new(0x1e, 0x66, 0xf5)).underline(),
            image: TagStyle::fg(Rgb::new(0x88, 0x39, 0xef)).italic(),
            list_marker: TagStyle::fg(Rgb::new(0x8a, 0x6d, 0x00)),
            quote: TagStyle::fg(Rgb::new(0x5c, 0x5f, 0x77)).italic(),
            rule: TagStyle::fg(Rgb::new(0x9c, 0xa0, 0xb0)),
            plain: TagStyle::fg(fg),
            editor_bg: Rgb::new(0xfa, 0xfa, 0xfa),
            gutter_fg: Rgb::new(0x9c, 0xa0, 0xb0),
            selection_bg: Rgb::new(0xad, 0xd6, 0xff),
            bar_bg: Rgb::new(0xe6, 0xe6, 0xe6),
            bar_fg: fg,
            active_tab_bg: Rgb::new(0xcc, 0xd0, 0xda),
        }
    }

    /// Style for a tag.
    pub const fn tag(&self, tag: StyleTag) -> TagStyle {
        match tag {
            StyleTag::Heading(level) => {
                let index = if level == 0 { 0 } else { level as usize - 1 };
                self.headings[if index > 5 { 5 } else { index }]
            }
            StyleTag::Bold => self.bold,
            StyleTag::Italic => self.italic,
            StyleTag::BoldItalic => self.bold_italic,
            StyleTag::Code => self.code,
            StyleTag::CodeBlock => self.code_block,
            StyleTag::Link => self.link,
            StyleTag::Image => self.image,
            StyleTag::ListMarker => self.list_marker,
            StyleTag::BlockQuote => self.quote,
            StyleTag::Rule => self.rule,
            StyleTag::Plain => self.plain,
        }
    }

    /// Default text color.
    pub fn text_fg(&self) -> Rgb {
        self.plain.fg.unwrap_or(self.bar_fg)
    }
}
