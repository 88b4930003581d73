//! Formatting insertions for the toolbar and shortcuts.

use super::buffer::{Direction, EditorBuffer};

/// An inline formatting command.
///
/// With a selection, the selection is wrapped in the markup. Without one, an
/// empty delimiter pair is inserted and the cursor placed inside it (a link
/// inserts a `[text](url)` template instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Code,
    Link,
}

impl FormatCommand {
    /// Toolbar label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "BOLD",
            Self::Italic => "ITALIC",
            Self::Code => "CODE",
            Self::Link => "LINK",
        }
    }

    /// Apply the command to the buffer.
    pub fn apply(self, buffer: &mut EditorBuffer) {
        let (open, close) = self.delimiters();
        if let Some(selected) = buffer.selected_text() {
            buffer.insert_str(&format!("{open}{selected}{close}"));
            return;
        }

        match self {
            Self::Link => buffer.insert_str("[text](url)"),
            _ => {
                buffer.insert_str(&format!("{open}{close}"));
                for _ in 0..close.chars().count() {
                    buffer.move_cursor(Direction::Left);
                }
            }
        }
    }

    const fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Self::Bold => ("**", "**"),
            Self::Italic => ("*", "*"),
            Self::Code => ("`", "`"),
            Self::Link => ("[", "](url)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Cursor;

    fn selected(text: &str, start: usize, end: usize) -> EditorBuffer {
        let mut buf = EditorBuffer::from_text(text);
        buf.move_to(0, start);
        buf.extend_selection(true);
        buf.move_to(0, end);
        buf
    }

    #[test]
    fn test_bold_wraps_selection() {
        let mut buf = selected("make this loud", 5, 9);
        FormatCommand::Bold.apply(&mut buf);
        assert_eq!(buf.text(), "make **this** loud");
        assert_eq!(buf.cursor(), Cursor::at(0, 13));
        assert!(buf.selection().is_none());
    }

    #[test]
    fn test_bold_without_selection_places_cursor_inside() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.move_to(0, 1);
        FormatCommand::Bold.apply(&mut buf);
        assert_eq!(buf.text(), "a****b");
        assert_eq!(buf.cursor().col, 3);
        buf.insert_char('x');
        assert_eq!(buf.text(), "a**x**b");
    }

    #[test]
    fn test_italic_and_code_without_selection() {
        let mut buf = EditorBuffer::empty();
        FormatCommand::Italic.apply(&mut buf);
        assert_eq!(buf.text(), "**");
        assert_eq!(buf.cursor().col, 1);

        let mut buf = EditorBuffer::empty();
        FormatCommand::Code.apply(&mut buf);
        assert_eq!(buf.text(), "``");
        assert_eq!(buf.cursor().col, 1);
    }

    #[test]
    fn test_italic_and_code_wrap_selection() {
        let mut buf = selected("x y", 2, 3);
        FormatCommand::Italic.apply(&mut buf);
        assert_eq!(buf.text(), "x *y*");

        let mut buf = selected("run ls now", 4, 6);
        FormatCommand::Code.apply(&mut buf);
        assert_eq!(buf.text(), "run `ls` now");
    }

    #[test]
    fn test_link_wraps_selection() {
        let mut buf = selected("see docs", 4, 8);
        FormatCommand::Link.apply(&mut buf);
        assert_eq!(buf.text(), "see [docs](url)");
    }

    #[test]
    fn test_link_without_selection_inserts_template() {
        let mut buf = EditorBuffer::empty();
        FormatCommand::Link.apply(&mut buf);
        assert_eq!(buf.text(), "[text](url)");
        assert_eq!(buf.cursor().col, 11);
    }

    #[test]
    fn test_formatting_marks_dirty_and_highlights() {
        let mut buf = selected("word", 0, 4);
        FormatCommand::Bold.apply(&mut buf);
        assert!(buf.is_dirty());
        let annotations = crate::markdown::highlight(&buf.text());
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].tag, crate::markdown::StyleTag::Bold);
    }

    #[test]
    fn test_labels() {
        assert_eq!(FormatCommand::Code.label(), "CODE");
    }
}
