use ropey::Rope;

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    /// Update column and reset column memory to match.
    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }

    const fn position(self) -> (usize, usize) {
        (self.line, self.col)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A text buffer backed by a rope data structure.
///
/// Holds the text of one tab together with its cursor and an optional
/// selection anchor. The selection runs between the anchor and the cursor;
/// typing or deleting while it is non-empty replaces it.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    anchor: Option<Cursor>,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            anchor: None,
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// True when the buffer holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        let s = s.strip_suffix('\n').unwrap_or(&s);
        Some(s.strip_suffix('\r').unwrap_or(s).to_string())
    }

    /// Length of a line in bytes (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// Byte offset of the first byte of a line in the full text.
    pub fn line_start_byte(&self, line_idx: usize) -> usize {
        self.rope.line_to_byte(line_idx.min(self.rope.len_lines()))
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    // --- Selection ---

    /// Start a selection at the cursor (when `extend` is set and none is
    /// active) or drop the current one. Call before a movement.
    pub fn extend_selection(&mut self, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
    }

    /// Drop the selection, keeping the cursor where it is.
    pub const fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Select the whole buffer, leaving the cursor at the end.
    pub fn select_all(&mut self) {
        self.anchor = Some(Cursor::new());
        self.move_to_end();
    }

    /// Ordered `(start, end)` of a non-empty selection.
    pub fn selection(&self) -> Option<(Cursor, Cursor)> {
        let anchor = self.anchor?;
        match anchor.position().cmp(&self.cursor.position()) {
            std::cmp::Ordering::Less => Some((anchor, self.cursor)),
            std::cmp::Ordering::Greater => Some((self.cursor, anchor)),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Byte range of the selection within the full text.
    pub fn selection_bytes(&self) -> Option<std::ops::Range<usize>> {
        let (start, end) = self.selection()?;
        Some(self.byte_offset(start)..self.byte_offset(end))
    }

    /// Text covered by the selection.
    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection()?;
        let range = self.char_idx(start)..self.char_idx(end);
        Some(self.rope.slice(range).to_string())
    }

    /// Delete the selected text and collapse the cursor to its start.
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection() else {
            self.anchor = None;
            return false;
        };
        self.rope.remove(self.char_idx(start)..self.char_idx(end));
        self.anchor = None;
        self.cursor = Cursor::at(start.line, start.col);
        self.dirty = true;
        true
    }

    // --- Editing ---

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.delete_selection();
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        self.cursor.set_col(self.cursor.col + ch.len_utf8());
        self.dirty = true;
    }

    /// Insert a string at the cursor position, replacing any selection.
    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        if s.is_empty() {
            return;
        }
        let byte = self.byte_offset(self.cursor);
        let char_idx = self.cursor_char_idx();
        self.rope.insert(char_idx, s);
        self.cursor = self.cursor_at_byte(byte + s.len());
        self.dirty = true;
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        self.delete_selection();
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
        self.dirty = true;
    }

    /// Delete the selection, or the character before the cursor (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }

        if self.cursor.col == 0 {
            // Join with previous line, removing its whole terminator
            let prev = self.cursor.line - 1;
            let prev_len = self.line_len(prev);
            let from = self.char_idx(Cursor::at(prev, prev_len));
            let to = self.cursor_char_idx();
            self.rope.remove(from..to);
            self.cursor.line = prev;
            self.cursor.set_col(prev_len);
        } else {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let prev_char_len = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            let char_idx = self.cursor_char_idx();
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        }
        self.dirty = true;
        true
    }

    /// Delete the selection, or the character at the cursor (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let line_len = self.line_len(self.cursor.line);
        let at_line_end = self.cursor.col >= line_len;
        if at_line_end && self.cursor.line + 1 >= self.line_count() {
            return false;
        }

        let char_idx = self.cursor_char_idx();
        if at_line_end {
            let next_start = self.rope.line_to_char(self.cursor.line + 1);
            self.rope.remove(char_idx..next_start);
        } else {
            self.rope.remove(char_idx..=char_idx);
        }
        self.dirty = true;
        true
    }

    // --- Movement ---

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let trimmed = line[..self.cursor.col].trim_end();
        let pos = trimmed
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map_or(0, |i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8));
        self.cursor.set_col(pos);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let after = &line[self.cursor.col..];

        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());
        let rest = &after[word_end..];
        let space_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());

        self.cursor.set_col(self.cursor.col + word_end + space_end);
    }

    /// Move up by `rows` lines (Page Up), keeping the sticky column.
    pub fn move_page_up(&mut self, rows: usize) {
        for _ in 0..rows.max(1) {
            if self.cursor.line == 0 {
                self.cursor.set_col(0);
                break;
            }
            self.move_up();
        }
    }

    /// Move down by `rows` lines (Page Down), keeping the sticky column.
    pub fn move_page_down(&mut self, rows: usize) {
        for _ in 0..rows.max(1) {
            if self.cursor.line + 1 >= self.line_count() {
                self.move_end();
                break;
            }
            self.move_down();
        }
    }

    /// Move cursor to a specific line and column.
    ///
    /// Out-of-range positions are clamped and a column inside a multi-byte
    /// character snaps back to its start.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let text = self.line_at(self.cursor.line).unwrap_or_default();
        let mut col = col.min(text.len());
        while !text.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor.set_col(col);
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    // --- Private helpers ---

    fn byte_offset(&self, cursor: Cursor) -> usize {
        self.line_start_byte(cursor.line) + cursor.col.min(self.line_len(cursor.line))
    }

    fn char_idx(&self, cursor: Cursor) -> usize {
        self.rope
            .byte_to_char(self.byte_offset(cursor).min(self.rope.len_bytes()))
    }

    /// Convert cursor position to a ropey char index.
    fn cursor_char_idx(&self) -> usize {
        self.char_idx(self.cursor)
    }

    fn cursor_at_byte(&self, byte: usize) -> Cursor {
        let byte = byte.min(self.rope.len_bytes());
        let line = self.rope.byte_to_line(byte);
        let col = (byte - self.rope.line_to_byte(line)).min(self.line_len(line));
        Cursor::at(line, col)
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let prev_char_len = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.col = self.clamp_col(self.cursor.line, self.cursor.col_memory);
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.col = self.clamp_col(self.cursor.line, self.cursor.col_memory);
        }
    }

    fn clamp_col(&self, line: usize, col: usize) -> usize {
        let text = self.line_at(line).unwrap_or_default();
        let mut col = col.min(text.len());
        while !text.is_char_boundary(col) {
            col -= 1;
        }
        col
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = EditorBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some("world".to_string()));
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_from_text_trailing_newline() {
        let buf = EditorBuffer::from_text("hello\n");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(1), Some(String::new()));
    }

    #[test]
    fn test_line_at_strips_crlf_and_rejects_out_of_bounds() {
        let buf = EditorBuffer::from_text("a\r\nb");
        assert_eq!(buf.line_at(0), Some("a".to_string()));
        assert_eq!(buf.line_at(2), None);
    }

    #[test]
    fn test_line_start_byte() {
        let buf = EditorBuffer::from_text("ab\ncde\nf");
        assert_eq!(buf.line_start_byte(0), 0);
        assert_eq!(buf.line_start_byte(1), 3);
        assert_eq!(buf.line_start_byte(2), 7);
    }

    #[test]
    fn test_text_roundtrip() {
        let content = "line one\nline two\nline three";
        assert_eq!(EditorBuffer::from_text(content).text(), content);
    }

    // --- Insertion ---

    #[test]
    fn test_insert_char_advances_cursor_and_marks_dirty() {
        let mut buf = EditorBuffer::from_text("ac");
        buf.move_to(0, 1);
        buf.insert_char('b');
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_insert_multibyte_char() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.move_to(0, 1);
        buf.insert_char('é');
        assert_eq!(buf.text(), "aéb");
        assert_eq!(buf.cursor().col, 3);
    }

    #[test]
    fn test_insert_str_multiline_moves_cursor_to_end() {
        let mut buf = EditorBuffer::from_text("start end");
        buf.move_to(0, 6);
        buf.insert_str("one\ntwo\nthree ");
        assert_eq!(buf.text(), "start one\ntwo\nthree end");
        assert_eq!(buf.cursor(), Cursor::at(2, 6));
    }

    #[test]
    fn test_insert_empty_str_is_noop() {
        let mut buf = EditorBuffer::from_text("x");
        buf.insert_str("");
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_split_line() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_to(0, 5);
        buf.split_line();
        assert_eq!(buf.text(), "hello\n world");
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    // --- Deletion ---

    #[test]
    fn test_delete_back_at_start_does_nothing() {
        let mut buf = EditorBuffer::from_text("abc");
        assert!(!buf.delete_back());
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_delete_back_removes_multibyte_char() {
        let mut buf = EditorBuffer::from_text("aéb");
        buf.move_to(0, 3);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "ab");
        assert_eq!(buf.cursor().col, 1);
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        buf.delete_back();
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_delete_back_joins_crlf_lines() {
        let mut buf = EditorBuffer::from_text("ab\r\ncd");
        buf.move_to(1, 0);
        buf.delete_back();
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn test_delete_forward() {
        let mut buf = EditorBuffer::from_text("abc");
        buf.move_to(0, 1);
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "ac");
        buf.move_end();
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = EditorBuffer::from_text("ab\r\ncd");
        buf.move_to(0, 2);
        buf.delete_forward();
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    // --- Selection ---

    #[test]
    fn test_shift_movement_selects() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.extend_selection(true);
        buf.move_word_right();
        assert_eq!(buf.selected_text().as_deref(), Some("hello "));
        assert_eq!(buf.selection_bytes(), Some(0..6));
    }

    #[test]
    fn test_backward_selection_is_ordered() {
        let mut buf = EditorBuffer::from_text("abc\ndef");
        buf.move_to(1, 2);
        buf.extend_selection(true);
        buf.move_cursor(Direction::Up);
        let (start, end) = buf.selection().unwrap();
        assert_eq!((start.line, start.col), (0, 2));
        assert_eq!((end.line, end.col), (1, 2));
        assert_eq!(buf.selected_text().as_deref(), Some("c\nde"));
    }

    #[test]
    fn test_plain_movement_clears_selection() {
        let mut buf = EditorBuffer::from_text("abc");
        buf.extend_selection(true);
        buf.move_end();
        buf.extend_selection(false);
        buf.move_home();
        assert!(buf.selection().is_none());
    }

    #[test]
    fn test_empty_selection_is_none() {
        let mut buf = EditorBuffer::from_text("abc");
        buf.extend_selection(true);
        assert!(buf.selection().is_none());
        assert!(buf.selected_text().is_none());
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_to(0, 6);
        buf.extend_selection(true);
        buf.move_end();
        buf.insert_char('!');
        assert_eq!(buf.text(), "hello !");
        assert!(buf.selection().is_none());
    }

    #[test]
    fn test_backspace_deletes_multiline_selection() {
        let mut buf = EditorBuffer::from_text("one\ntwo\nthree");
        buf.move_to(0, 1);
        buf.extend_selection(true);
        buf.move_to(2, 2);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "oree");
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn test_select_all() {
        let mut buf = EditorBuffer::from_text("a\nbc");
        buf.select_all();
        assert_eq!(buf.selected_text().as_deref(), Some("a\nbc"));
        buf.clear_selection();
        assert!(buf.selection().is_none());
    }

    // --- Cursor movement ---

    #[test]
    fn test_move_left_right_wraps_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_vertical_movement_keeps_sticky_column() {
        let mut buf = EditorBuffer::from_text("long line\nab\nanother line");
        buf.move_to(0, 7);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 7);
    }

    #[test]
    fn test_vertical_movement_lands_on_char_boundary() {
        let mut buf = EditorBuffer::from_text("abc\néé");
        buf.move_to(0, 3);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
    }

    #[test]
    fn test_word_movement() {
        let mut buf = EditorBuffer::from_text("foo bar_baz qux");
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 4);
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 12);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 4);
    }

    #[test]
    fn test_word_left_after_multibyte_separator() {
        let mut buf = EditorBuffer::from_text("a—bc");
        buf.move_end();
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 4);
    }

    #[test]
    fn test_page_movement() {
        let mut buf = EditorBuffer::from_text("1\n2\n3\n4\n5");
        buf.move_page_down(3);
        assert_eq!(buf.cursor().line, 3);
        buf.move_page_down(3);
        assert_eq!(buf.cursor(), Cursor::at(4, 1));
        buf.move_page_up(10);
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_move_to_clamps() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(9, 9);
        assert_eq!(buf.cursor(), Cursor::at(1, 2));
    }

    #[test]
    fn test_move_to_snaps_inside_multibyte_char() {
        let mut buf = EditorBuffer::from_text("é");
        buf.move_to(0, 1);
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_start_and_end() {
        let mut buf = EditorBuffer::from_text("ab\ncde");
        buf.move_to_end();
        assert_eq!(buf.cursor(), Cursor::at(1, 3));
        buf.move_to_start();
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_mark_clean() {
        let mut buf = EditorBuffer::empty();
        buf.insert_char('x');
        buf.mark_clean();
        assert!(!buf.is_dirty());
    }
}
