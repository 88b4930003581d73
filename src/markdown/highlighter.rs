//! Source highlighting: style annotations over the raw buffer text.

use super::rules::{Block, LineClassifier, lines_with_offsets, scan_inline};
use super::types::{Annotation, Span, StyleTag};

/// Compute style annotations for the whole buffer text.
///
/// Annotations come out line by line, left to right, and never overlap.
/// Lines claimed by a whole-line block rule get one annotation and no inline
/// scan; list items tag their marker and scan the rest. Malformed markup just
/// produces fewer annotations.
pub fn highlight(text: &str) -> Vec<Annotation> {
    let _scope = crate::perf::scope("markdown.highlight");
    let mut classifier = LineClassifier::new();
    let mut annotations = Vec::new();

    for source in lines_with_offsets(text) {
        let (line_start, line) = (source.start, source.text);
        let block = classifier.classify(line);

        if let Some(tag) = block.line_tag() {
            push(
                &mut annotations,
                Span::new(line_start, line_start + line.len()),
                tag,
            );
            continue;
        }

        match block {
            Block::Blank => {}
            Block::ListItem { content_start, .. } => {
                push(
                    &mut annotations,
                    Span::new(line_start, line_start + content_start),
                    StyleTag::ListMarker,
                );
                push_inline(
                    &mut annotations,
                    &line[content_start..],
                    line_start + content_start,
                );
            }
            _ => push_inline(&mut annotations, line, line_start),
        }
    }

    tracing::trace!(
        bytes = text.len(),
        annotations = annotations.len(),
        "highlighted buffer"
    );
    annotations
}

fn push(annotations: &mut Vec<Annotation>, span: Span, tag: StyleTag) {
    if !span.is_empty() {
        annotations.push(Annotation::new(span, tag));
    }
}

fn push_inline(annotations: &mut Vec<Annotation>, segment: &str, offset: usize) {
    for found in scan_inline(segment) {
        push(
            annotations,
            Span::from(found.outer).offset(offset),
            found.tag,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spans(text: &str) -> Vec<(StyleTag, &str)> {
        highlight(text)
            .into_iter()
            .map(|a| (a.tag, &text[a.span.range()]))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(highlight("").is_empty());
    }

    #[test]
    fn test_heading_covers_whole_line() {
        assert_eq!(
            highlight("# Title"),
            vec![Annotation::new(Span::new(0, 7), StyleTag::Heading(1))]
        );
    }

    #[test]
    fn test_bold_and_italic_offsets() {
        assert_eq!(
            highlight("**bold** and *italic*"),
            vec![
                Annotation::new(Span::new(0, 8), StyleTag::Bold),
                Annotation::new(Span::new(13, 21), StyleTag::Italic),
            ]
        );
    }

    #[test]
    fn test_unterminated_yields_nothing() {
        assert!(highlight("*unterminated").is_empty());
    }

    #[test]
    fn test_heading_suppresses_inline_rules() {
        assert_eq!(
            spans("## A **bold** heading"),
            vec![(StyleTag::Heading(2), "## A **bold** heading")]
        );
    }

    #[test]
    fn test_list_marker_then_inline() {
        assert_eq!(
            spans("- a `b` c\n2. [x](y)"),
            vec![
                (StyleTag::ListMarker, "- "),
                (StyleTag::Code, "`b`"),
                (StyleTag::ListMarker, "2. "),
                (StyleTag::Link, "[x](y)"),
            ]
        );
    }

    #[test]
    fn test_offsets_account_for_previous_lines() {
        let text = "plain\n> quote\n***x***";
        assert_eq!(
            highlight(text),
            vec![
                Annotation::new(Span::new(6, 13), StyleTag::BlockQuote),
                Annotation::new(Span::new(14, 21), StyleTag::BoldItalic),
            ]
        );
    }

    #[test]
    fn test_crlf_line_endings_exclude_carriage_return() {
        assert_eq!(
            spans("# A\r\n*b*\r\n"),
            vec![(StyleTag::Heading(1), "# A"), (StyleTag::Italic, "*b*")]
        );
    }

    #[test]
    fn test_crlf_offsets_count_carriage_returns() {
        let text = "a\r\n**b**\r\n";
        assert_eq!(
            highlight(text),
            vec![Annotation::new(Span::new(3, 8), StyleTag::Bold)]
        );
    }

    #[test]
    fn test_fenced_block_lines() {
        let text = "```\n*x*\n\n```\n*y*";
        assert_eq!(
            spans(text),
            vec![
                (StyleTag::CodeBlock, "```"),
                (StyleTag::CodeBlock, "*x*"),
                (StyleTag::CodeBlock, "```"),
                (StyleTag::Italic, "*y*"),
            ]
        );
    }

    #[test]
    fn test_rule_and_image() {
        assert_eq!(
            spans("---\n![alt](a.png)"),
            vec![(StyleTag::Rule, "---"), (StyleTag::Image, "![alt](a.png)")]
        );
    }

    #[test]
    fn test_idempotent() {
        let text = "# H\n\n- **a** _b_\n\n```rs\nfn x() {}\n```\n[l](u)";
        assert_eq!(highlight(text), highlight(text));
    }

    proptest! {
        #[test]
        fn prop_spans_in_bounds_on_char_boundaries(text in "\\PC{0,200}") {
            for annotation in highlight(&text) {
                let span = annotation.span;
                prop_assert!(span.start < span.end);
                prop_assert!(span.end <= text.len());
                prop_assert!(text.is_char_boundary(span.start));
                prop_assert!(text.is_char_boundary(span.end));
            }
        }

        #[test]
        fn prop_annotations_never_overlap(text in "[-#>*_`\\[\\]()!a-z 0-9.\n]{0,200}") {
            let annotations = highlight(&text);
            for pair in annotations.windows(2) {
                prop_assert!(!pair[0].span.overlaps(&pair[1].span), "{:?}", pair);
                prop_assert!(pair[0].span.end <= pair[1].span.start, "{:?}", pair);
            }
        }

        #[test]
        fn prop_highlight_is_idempotent(text in "[-#>*_`\\[\\]()!a-z \n]{0,120}") {
            prop_assert_eq!(highlight(&text), highlight(&text));
        }
    }
}
