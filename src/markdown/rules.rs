//! Rule definitions shared by the highlighter and the preview renderer.
//!
//! Block constructs are recognized per line by [`LineClassifier`]; paired
//! inline delimiters are found by [`scan_inline`]. Neither ever fails: text
//! that matches no rule is simply left alone.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use super::types::StyleTag;

fn re_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))?(?:[ \t]+#+)?[ \t]*$")
            .expect("valid heading regex")
    })
}

fn re_blockquote() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}> ?").expect("valid blockquote regex"))
}

fn re_horizontal_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // No backreferences in `regex`, so one alternative per rule character.
    RE.get_or_init(|| {
        Regex::new(r"^ {0,3}(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$")
            .expect("valid rule regex")
    })
}

fn re_list_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([ \t]*)([-*+]|\d{1,9}[.)])[ \t]+").expect("valid list regex")
    })
}

fn re_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^ {0,3}(`{3,}|~{3,})[ \t]*(.*?)[ \t]*$").expect("valid fence regex")
    })
}

/// How a list item is introduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMarker {
    /// `-`, `*` or `+`
    Bullet,
    /// `1.` or `1)`, kept as written
    Ordered(String),
}

/// Block-level classification of one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Whitespace only
    Blank,
    /// Opening fence line, with the first word of the info string
    FenceOpen { language: Option<String> },
    /// Closing fence line
    FenceClose,
    /// Line inside a fenced block
    FencedCode,
    /// Indented code line; content begins at `content_start`
    IndentedCode { content_start: usize },
    /// ATX heading; `content` excludes the `#` markers
    Heading { level: u8, content: Range<usize> },
    /// Block quote; content begins after `>` and one optional space
    BlockQuote { content_start: usize },
    /// Thematic break
    Rule,
    /// List item; `content_start` is where the item text begins
    ListItem {
        indent: usize,
        marker: ListMarker,
        content_start: usize,
    },
    /// Anything else
    Paragraph,
}

impl Block {
    /// Tag used when the rule styles the whole line, if it does.
    pub const fn line_tag(&self) -> Option<StyleTag> {
        match self {
            Self::FenceOpen { .. }
            | Self::FenceClose
            | Self::FencedCode
            | Self::IndentedCode { .. } => Some(StyleTag::CodeBlock),
            Self::Heading { level, .. } => Some(StyleTag::Heading(*level)),
            Self::BlockQuote { .. } => Some(StyleTag::BlockQuote),
            Self::Rule => Some(StyleTag::Rule),
            Self::Blank | Self::ListItem { .. } | Self::Paragraph => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Fence {
    ch: u8,
    len: usize,
}

/// Classifies lines top to bottom.
///
/// Carries only what one scan needs (open fence, previous line kind); a fresh
/// classifier is created for every call to `highlight` or `render`.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    fence: Option<Fence>,
    prev_blank: bool,
    prev_code: bool,
    in_list: bool,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LineClassifier {
    pub const fn new() -> Self {
        Self {
            fence: None,
            prev_blank: true,
            prev_code: false,
            in_list: false,
        }
    }

    /// Classify the next line. `line` must not contain the line terminator.
    pub fn classify(&mut self, line: &str) -> Block {
        let block = self.classify_inner(line);
        self.prev_blank = block == Block::Blank;
        self.prev_code = matches!(block, Block::IndentedCode { .. });
        match &block {
            Block::ListItem { .. } => self.in_list = true,
            Block::Blank => {}
            Block::Paragraph if starts_indented(line) => {}
            _ => self.in_list = false,
        }
        block
    }

    fn classify_inner(&mut self, line: &str) -> Block {
        if let Some(fence) = &self.fence {
            if is_fence_close(line, fence) {
                self.fence = None;
                return Block::FenceClose;
            }
            return Block::FencedCode;
        }

        if line.trim().is_empty() {
            return Block::Blank;
        }

        if let Some((fence, language)) = fence_open(line) {
            self.fence = Some(fence);
            return Block::FenceOpen { language };
        }

        if (self.prev_blank || self.prev_code) && !self.in_list {
            if let Some(content_start) = code_indent(line) {
                return Block::IndentedCode { content_start };
            }
        }

        if let Some(caps) = re_heading().captures(line) {
            let level = caps.get(1).map_or(1, |m| m.len());
            let content = caps
                .get(2)
                .map_or(line.len()..line.len(), |m| m.range());
            return Block::Heading {
                level: u8::try_from(level).unwrap_or(6),
                content,
            };
        }

        if let Some(m) = re_blockquote().find(line) {
            return Block::BlockQuote {
                content_start: m.end(),
            };
        }

        if re_horizontal_rule().is_match(line) {
            return Block::Rule;
        }

        if let Some(caps) = re_list_item().captures(line) {
            let indent = caps.get(1).map_or(0, |m| m.len());
            let token = caps.get(2).map_or("", |m| m.as_str());
            let marker = if token.len() == 1 {
                ListMarker::Bullet
            } else {
                ListMarker::Ordered(token.to_string())
            };
            let content_start = caps.get(0).map_or(line.len(), |m| m.end());
            return Block::ListItem {
                indent,
                marker,
                content_start,
            };
        }

        Block::Paragraph
    }
}

fn starts_indented(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}

/// Byte offset after one level of code indentation, if the line has one.
fn code_indent(line: &str) -> Option<usize> {
    if line.starts_with('\t') {
        Some(1)
    } else if line.starts_with("    ") {
        Some(4)
    } else {
        None
    }
}

fn fence_open(line: &str) -> Option<(Fence, Option<String>)> {
    let caps = re_fence().captures(line)?;
    let marker = caps.get(1)?.as_str();
    let info = caps.get(2).map_or("", |m| m.as_str());
    let ch = marker.as_bytes()[0];
    // ```` ```x``` ```` on one line is inline code, not a fence
    if ch == b'`' && info.contains('`') {
        return None;
    }
    let language = info
        .split_whitespace()
        .next()
        .map(|word| word.trim_start_matches('{').trim_start_matches('.'))
        .map(|word| word.trim_end_matches('}'))
        .filter(|word| !word.is_empty())
        .map(str::to_string);
    Some((
        Fence {
            ch,
            len: marker.len(),
        },
        language,
    ))
}

fn is_fence_close(line: &str, fence: &Fence) -> bool {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return false;
    }
    let rest = line[indent..].trim_end();
    rest.len() >= fence.len && rest.bytes().all(|b| b == fence.ch)
}

/// One source line as produced by [`lines_with_offsets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// Byte offset of the line in the scanned text
    pub start: usize,
    /// Line body, without the terminator
    pub text: &'a str,
    /// `"\n"`, `"\r\n"`, or whatever trails the last line (`""` or a lone `"\r"`)
    pub ending: &'a str,
}

/// Splits text into lines with the byte offset each line starts at.
///
/// Lines are split on `\n`; a trailing `\r` is left out of the body and kept
/// in [`SourceLine::ending`]. Text ending in `\n` yields a final empty line, so
/// the number of lines is always one more than the number of line feeds.
pub fn lines_with_offsets(text: &str) -> impl Iterator<Item = SourceLine<'_>> {
    let mut offset = 0;
    text.split('\n').map(move |raw| {
        let start = offset;
        offset += raw.len() + 1;
        let body = raw.strip_suffix('\r').unwrap_or(raw);
        let ending_end = (start + raw.len() + 1).min(text.len());
        SourceLine {
            start,
            text: body,
            ending: &text[start + body.len()..ending_end],
        }
    })
}

/// One paired inline construct found by [`scan_inline`].
///
/// Ranges are byte offsets into the scanned segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMatch {
    pub tag: StyleTag,
    /// Delimiters included
    pub outer: Range<usize>,
    /// Text between the delimiters (link label, image alt)
    pub inner: Range<usize>,
    /// Link target or image source
    pub url: Option<Range<usize>>,
}

/// Find paired inline constructs in one line segment, left to right.
///
/// Returned matches are sorted and never overlap. An opener without a
/// matching closer is skipped and scanning continues after it.
pub fn scan_inline(segment: &str) -> Vec<InlineMatch> {
    let bytes = segment.as_bytes();
    let mut matches = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let found = match bytes[i] {
            b'\\' => {
                // Escaped character never opens anything
                i += 1 + segment[i + 1..].chars().next().map_or(0, char::len_utf8);
                continue;
            }
            b'*' | b'_' => emphasis_at(segment, i),
            b'`' => code_at(segment, i),
            b'!' if bytes.get(i + 1) == Some(&b'[') => link_at(segment, i + 1)
                .map(|(inner, url, end)| InlineMatch {
                    tag: StyleTag::Image,
                    outer: i..end,
                    inner,
                    url: Some(url),
                }),
            b'[' => link_at(segment, i)
                .filter(|(inner, _, _)| !inner.is_empty())
                .map(|(inner, url, end)| InlineMatch {
                    tag: StyleTag::Link,
                    outer: i..end,
                    inner,
                    url: Some(url),
                }),
            _ => None,
        };

        match found {
            Some(m) => {
                i = m.outer.end;
                matches.push(m);
            }
            None => {
                // Skip a whole delimiter run so its tail can't open a match
                let ch = bytes[i];
                if matches!(ch, b'*' | b'_' | b'`') {
                    i += run_length(bytes, i, ch);
                } else {
                    i += segment[i..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }
    }

    matches
}

fn run_length(bytes: &[u8], start: usize, ch: u8) -> usize {
    bytes[start..].iter().take_while(|&&b| b == ch).count()
}

fn is_escaped(bytes: &[u8], pos: usize) -> bool {
    let backslashes = bytes[..pos].iter().rev().take_while(|&&b| b == b'\\').count();
    backslashes % 2 == 1
}

fn prev_char(segment: &str, pos: usize) -> Option<char> {
    segment[..pos].chars().next_back()
}

fn next_char(segment: &str, pos: usize) -> Option<char> {
    segment[pos..].chars().next()
}

/// Emphasis opened by the delimiter run starting at `start`.
///
/// The run length picks the tag: 3 is bold-italic, 2 bold, 1 italic. The
/// closer is the nearest run of the same character and exactly that length
/// which is not preceded by whitespace. There is no fallback to a shorter
/// tag when only a different-length closer exists.
fn emphasis_at(segment: &str, start: usize) -> Option<InlineMatch> {
    let bytes = segment.as_bytes();
    let ch = bytes[start];
    let len = run_length(bytes, start, ch);
    let tag = match len {
        1 => StyleTag::Italic,
        2 => StyleTag::Bold,
        3 => StyleTag::BoldItalic,
        _ => return None,
    };

    if start > 0 && bytes[start - 1] == ch {
        return None;
    }
    let after_open = start + len;
    if next_char(segment, after_open).is_none_or(char::is_whitespace) {
        return None;
    }
    if ch == b'_' && prev_char(segment, start).is_some_and(char::is_alphanumeric) {
        return None;
    }

    let mut pos = after_open;
    while pos < bytes.len() {
        if bytes[pos] != ch || is_escaped(bytes, pos) {
            pos += 1;
            continue;
        }
        let run = run_length(bytes, pos, ch);
        let closes = run == len
            && pos > after_open
            && !prev_char(segment, pos).is_some_and(char::is_whitespace)
            && !(ch == b'_' && next_char(segment, pos + run).is_some_and(char::is_alphanumeric));
        if closes {
            return Some(InlineMatch {
                tag,
                outer: start..pos + run,
                inner: after_open..pos,
                url: None,
            });
        }
        pos += run;
    }
    None
}

/// Code span opened by the backtick run at `start`, closed by the next run
/// of the same length.
fn code_at(segment: &str, start: usize) -> Option<InlineMatch> {
    let bytes = segment.as_bytes();
    let len = run_length(bytes, start, b'`');
    let after_open = start + len;
    let mut pos = after_open;
    while pos < bytes.len() {
        if bytes[pos] != b'`' {
            pos += 1;
            continue;
        }
        let run = run_length(bytes, pos, b'`');
        if run == len {
            if pos == after_open {
                return None;
            }
            return Some(InlineMatch {
                tag: StyleTag::Code,
                outer: start..pos + run,
                inner: after_open..pos,
                url: None,
            });
        }
        pos += run;
    }
    None
}

/// `[label](target)` starting at the `[` at `open`.
///
/// Returns the label range, the target range, and the end of the construct.
/// The target must be non-empty; an optional quoted title after it is
/// ignored.
fn link_at(segment: &str, open: usize) -> Option<(Range<usize>, Range<usize>, usize)> {
    let bytes = segment.as_bytes();
    let mut depth = 0usize;
    let mut close_bracket = None;
    for (offset, &b) in bytes[open + 1..].iter().enumerate() {
        let pos = open + 1 + offset;
        match b {
            b'[' if !is_escaped(bytes, pos) => depth += 1,
            b']' if !is_escaped(bytes, pos) => {
                if depth == 0 {
                    close_bracket = Some(pos);
                    break;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    let close_bracket = close_bracket?;
    if bytes.get(close_bracket + 1) != Some(&b'(') {
        return None;
    }

    let paren_open = close_bracket + 1;
    let mut depth = 0usize;
    let mut close_paren = None;
    for (offset, &b) in bytes[paren_open + 1..].iter().enumerate() {
        let pos = paren_open + 1 + offset;
        match b {
            b'(' => depth += 1,
            b')' => {
                if depth == 0 {
                    close_paren = Some(pos);
                    break;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    let close_paren = close_paren?;

    let target = &segment[paren_open + 1..close_paren];
    let lead = target.len() - target.trim_start().len();
    let url_start = paren_open + 1 + lead;
    let url_len = target
        .trim_start()
        .split_whitespace()
        .next()
        .map_or(0, str::len);
    if url_len == 0 {
        return None;
    }

    Some((
        open + 1..close_bracket,
        url_start..url_start + url_len,
        close_paren + 1,
    ))
}
