//! Core highlighting and preview types.

use std::ops::Range;

/// A byte range into a buffer's text.
///
/// `start < end <= text.len()`, both on UTF-8 char boundaries. Spans are
/// recomputed on every scan and never stored beyond one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// First byte covered
    pub start: usize,
    /// One past the last byte covered
    pub end: usize,
}

impl Span {
    /// Create a span covering `start..end`.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered.
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the span covers nothing.
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The span as a `Range<usize>`, for slicing the source text.
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Shift both ends right by `offset` bytes.
    pub(crate) const fn offset(self, offset: usize) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    /// Returns true if the two spans share at least one byte.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Display category for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// ATX heading with level (1-6)
    Heading(u8),
    /// `**strong**` or `__strong__`
    Bold,
    /// `*emphasis*` or `_emphasis_`
    Italic,
    /// `***both***` or `___both___`
    BoldItalic,
    /// Inline code span
    Code,
    /// Fenced or indented code block line
    CodeBlock,
    /// `[text](url)`
    Link,
    /// `![alt](src)`
    Image,
    /// Bullet or number that starts a list item
    ListMarker,
    /// Block quote line
    BlockQuote,
    /// Horizontal rule
    Rule,
    /// Unstyled text
    Plain,
}

impl StyleTag {
    /// Every tag, in a stable order. Used to build complete theme tables.
    pub const ALL: [Self; 17] = [
        Self::Heading(1),
        Self::Heading(2),
        Self::Heading(3),
        Self::Heading(4),
        Self::Heading(5),
        Self::Heading(6),
        Self::Bold,
        Self::Italic,
        Self::BoldItalic,
        Self::Code,
        Self::CodeBlock,
        Self::Link,
        Self::Image,
        Self::ListMarker,
        Self::BlockQuote,
        Self::Rule,
        Self::Plain,
    ];
}

/// A span of source text paired with the style it should be drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    pub span: Span,
    pub tag: StyleTag,
}

impl Annotation {
    pub const fn new(span: Span, tag: StyleTag) -> Self {
        Self { span, tag }
    }
}

/// A transformed, styled run of text for the preview pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewNode {
    /// Display text with markup delimiters removed
    pub text: String,
    /// Style for the whole run
    pub tag: StyleTag,
    /// Target of a link or source of an image
    pub url: Option<String>,
    /// Info-string language of a fenced code block
    pub language: Option<String>,
}

impl PreviewNode {
    /// Create a node with no metadata.
    pub fn new(text: impl Into<String>, tag: StyleTag) -> Self {
        Self {
            text: text.into(),
            tag,
            url: None,
            language: None,
        }
    }

    /// Create an unstyled text node.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, StyleTag::Plain)
    }

    /// Attach a link target or image source.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach a code block language.
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }
}
