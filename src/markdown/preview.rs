//! Preview rendering: transformed, styled runs for the read-only pane.

use super::rules::{Block, InlineMatch, LineClassifier, ListMarker, lines_with_offsets, scan_inline};
use super::types::{PreviewNode, StyleTag};

/// Render the buffer text into preview nodes.
///
/// Uses the same line and inline rules as [`super::highlight`], but strips
/// markup: heading markers, quote markers, fence lines and inline delimiters
/// disappear, link targets move into [`PreviewNode::url`]. Each rendered line
/// is followed by its original terminator (`"\n"` or `"\r\n"`) in a plain
/// node and adjacent plain runs are merged, so text with no markup comes back
/// as a single plain node equal to the input.
pub fn render(text: &str) -> Vec<PreviewNode> {
    let _scope = crate::perf::scope("markdown.render");
    let mut classifier = LineClassifier::new();
    let mut nodes = Vec::new();
    let mut language: Option<String> = None;
    let mut separator: Option<&str> = None;

    for source in lines_with_offsets(text) {
        let line = source.text;
        let block = classifier.classify(line);
        let mut line_nodes = Vec::new();

        match block {
            Block::FenceOpen { language: info } => {
                language = info;
                continue;
            }
            Block::FenceClose => {
                language = None;
                continue;
            }
            Block::FencedCode => {
                line_nodes.push(
                    PreviewNode::new(line, StyleTag::CodeBlock).with_language(language.clone()),
                );
            }
            Block::IndentedCode { content_start } => {
                line_nodes.push(PreviewNode::new(&line[content_start..], StyleTag::CodeBlock));
            }
            Block::Heading { level, content } => {
                push_block_inline(&mut line_nodes, &line[content], StyleTag::Heading(level));
            }
            Block::BlockQuote { content_start } => {
                push_block_inline(&mut line_nodes, &line[content_start..], StyleTag::BlockQuote);
            }
            Block::Rule => line_nodes.push(PreviewNode::new("", StyleTag::Rule)),
            Block::ListItem {
                indent,
                marker,
                content_start,
            } => {
                let bullet = match &marker {
                    ListMarker::Bullet => "•",
                    ListMarker::Ordered(token) => token.as_str(),
                };
                line_nodes.push(PreviewNode::new(
                    format!("{}{bullet} ", " ".repeat(indent)),
                    StyleTag::ListMarker,
                ));
                push_inline(&mut line_nodes, &line[content_start..]);
            }
            Block::Blank | Block::Paragraph => push_inline(&mut line_nodes, line),
        }

        // Skipped fence lines take their terminator with them
        if let Some(ending) = separator.replace(source.ending) {
            push_plain(&mut nodes, ending);
        }
        for node in line_nodes {
            if node.tag == StyleTag::Plain {
                push_plain(&mut nodes, &node.text);
            } else {
                nodes.push(node);
            }
        }
        if !source.ending.ends_with('\n') {
            push_plain(&mut nodes, source.ending);
        }
    }

    tracing::trace!(bytes = text.len(), nodes = nodes.len(), "rendered preview");
    nodes
}

fn push_plain(nodes: &mut Vec<PreviewNode>, text: &str) {
    if text.is_empty() {
        return;
    }
    match nodes.last_mut() {
        Some(last) if last.tag == StyleTag::Plain => last.text.push_str(text),
        _ => nodes.push(PreviewNode::plain(text)),
    }
}

fn push_inline(nodes: &mut Vec<PreviewNode>, segment: &str) {
    let mut cursor = 0;
    for found in scan_inline(segment) {
        push_plain(nodes, &segment[cursor..found.outer.start]);
        cursor = found.outer.end;
        nodes.push(inline_node(segment, found));
    }
    push_plain(nodes, &segment[cursor..]);
}

/// Inline nodes for the content of a heading or quote line.
///
/// Text outside inline constructs carries `tag`. The first node always
/// carries it too, empty if the content opens with a construct, so every
/// such line starts with exactly one node of its block style.
fn push_block_inline(nodes: &mut Vec<PreviewNode>, segment: &str, tag: StyleTag) {
    let matches = scan_inline(segment);
    let lead = matches.first().map_or(segment.len(), |found| found.outer.start);
    nodes.push(PreviewNode::new(&segment[..lead], tag));
    let mut cursor = lead;
    for found in matches {
        if cursor < found.outer.start {
            nodes.push(PreviewNode::new(&segment[cursor..found.outer.start], tag));
        }
        cursor = found.outer.end;
        nodes.push(inline_node(segment, found));
    }
    if cursor < segment.len() {
        nodes.push(PreviewNode::new(&segment[cursor..], tag));
    }
}

fn inline_node(segment: &str, found: InlineMatch) -> PreviewNode {
    let inner = &segment[found.inner];
    let node = match found.tag {
        StyleTag::Code => PreviewNode::new(strip_code_padding(inner), StyleTag::Code),
        tag => PreviewNode::new(inner, tag),
    };
    match found.url {
        Some(url) => node.with_url(&segment[url]),
        None => node,
    }
}

/// One leading and trailing space are dropped when both are present and the
/// span isn't all spaces, so `` ` `` `` can show a backtick.
fn strip_code_padding(code: &str) -> &str {
    if code.len() >= 2
        && code.starts_with(' ')
        && code.ends_with(' ')
        && !code.bytes().all(|b| b == b' ')
    {
        &code[1..code.len() - 1]
    } else {
        code
    }
}
