//! Open documents and tab management.
//!
//! A [`Workspace`] always holds at least one [`Tab`]. Each tab owns its
//! buffer and the highlight annotations computed for it.

pub mod files;

use std::path::{Path, PathBuf};

use crate::editor::EditorBuffer;
use crate::markdown::{self, Annotation};

/// One open document.
#[derive(Debug)]
pub struct Tab {
    title: String,
    path: Option<PathBuf>,
    /// Text and cursor
    pub buffer: EditorBuffer,
    annotations: Vec<Annotation>,
    /// First visible buffer line
    pub scroll_offset: usize,
    /// Horizontal scroll in display columns
    pub h_scroll: usize,
}

impl Tab {
    fn new(title: String, text: &str, path: Option<PathBuf>) -> Self {
        let mut tab = Self {
            title,
            path,
            buffer: EditorBuffer::from_text(text),
            annotations: Vec::new(),
            scroll_offset: 0,
            h_scroll: 0,
        };
        tab.rehighlight();
        tab
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title as shown in the tab bar, `*`-prefixed while unsaved.
    pub fn display_title(&self) -> String {
        if self.buffer.is_dirty() {
            format!("*{}", self.title)
        } else {
            self.title.clone()
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Attach the tab to a file and retitle it after the file name.
    pub fn set_path(&mut self, path: PathBuf) {
        let path = files::absolute_path(path);
        self.title = files::display_name(&path);
        self.path = Some(path);
    }

    /// Change the title without touching the path.
    pub fn rename(&mut self, title: &str) {
        let title = title.trim();
        if !title.is_empty() {
            self.title = title.to_string();
        }
    }

    /// Highlight annotations for the current text.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Recompute annotations from scratch, replacing the previous set.
    pub fn rehighlight(&mut self) {
        self.annotations = markdown::highlight(&self.buffer.text());
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Never edited, never saved, no file: safe to reuse for an open.
    pub fn is_untouched(&self) -> bool {
        self.path.is_none() && self.buffer.is_empty() && !self.buffer.is_dirty()
    }
}

/// Ordered tabs plus the active index.
#[derive(Debug)]
pub struct Workspace {
    tabs: Vec<Tab>,
    active: usize,
    untitled_count: usize,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// A workspace with one empty `Untitled 1` tab.
    pub fn new() -> Self {
        let mut workspace = Self {
            tabs: Vec::new(),
            active: 0,
            untitled_count: 0,
        };
        workspace.new_tab();
        workspace
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Number of open tabs.
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub const fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Tab {
        &self.tabs[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active]
    }

    /// Add an empty `Untitled N` tab and make it active.
    pub fn new_tab(&mut self) -> usize {
        self.untitled_count += 1;
        let title = format!("Untitled {}", self.untitled_count);
        self.tabs.push(Tab::new(title, "", None));
        self.active = self.tabs.len() - 1;
        self.active
    }

    /// Show a loaded document and make its tab active.
    ///
    /// A file that is already open is just selected. Otherwise the active
    /// tab is reused when untouched, or a new tab is added.
    pub fn open_document(&mut self, path: PathBuf, text: &str) -> usize {
        let path = files::absolute_path(path);
        if let Some(index) = self.find_by_path(&path) {
            self.active = index;
            return index;
        }
        let title = files::display_name(&path);
        let tab = Tab::new(title, text, Some(path));
        if self.active().is_untouched() {
            self.tabs[self.active] = tab;
        } else {
            self.tabs.push(tab);
            self.active = self.tabs.len() - 1;
        }
        self.active
    }

    /// Index of the tab showing `path`. Relative paths are taken against
    /// the working directory.
    pub fn find_by_path(&self, path: &Path) -> Option<usize> {
        let path = files::absolute_path(path.to_path_buf());
        self.tabs
            .iter()
            .position(|tab| tab.path() == Some(path.as_path()))
    }

    /// Close the active tab. The last remaining tab can't be closed.
    pub fn close_active(&mut self) -> bool {
        if self.tabs.len() <= 1 {
            return false;
        }
        self.tabs.remove(self.active);
        if self.active >= self.tabs.len() {
            self.active = self.tabs.len() - 1;
        }
        true
    }

    /// Make the tab at `index` active; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tabs.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    /// Activate the next tab, wrapping around.
    pub fn next(&mut self) {
        self.active = (self.active + 1) % self.tabs.len();
    }

    /// Activate the previous tab, wrapping around.
    pub fn prev(&mut self) {
        self.active = (self.active + self.tabs.len() - 1) % self.tabs.len();
    }

    /// Titles of tabs with unsaved changes.
    pub fn unsaved_titles(&self) -> Vec<String> {
        self.tabs
            .iter()
            .filter(|tab| tab.is_dirty())
            .map(|tab| tab.title().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::StyleTag;

    #[test]
    fn test_new_workspace_has_one_untitled_tab() {
        let ws = Workspace::new();
        assert_eq!(ws.len(), 1);
        assert_eq!(ws.active().title(), "Untitled 1");
        assert!(ws.active().is_untouched());
    }

    #[test]
    fn test_new_tabs_are_numbered_and_active() {
        let mut ws = Workspace::new();
        assert_eq!(ws.new_tab(), 1);
        assert_eq!(ws.active().title(), "Untitled 2");
        ws.close_active();
        ws.new_tab();
        assert_eq!(ws.active().title(), "Untitled 3");
    }

    #[test]
    fn test_display_title_marks_unsaved() {
        let mut ws = Workspace::new();
        ws.active_mut().buffer.insert_char('x');
        assert_eq!(ws.active().display_title(), "*Untitled 1");
        ws.active_mut().buffer.mark_clean();
        assert_eq!(ws.active().display_title(), "Untitled 1");
    }

    #[test]
    fn test_open_reuses_untouched_tab() {
        let mut ws = Workspace::new();
        let index = ws.open_document(PathBuf::from("/d/readme.md"), "# Hi");
        assert_eq!(index, 0);
        assert_eq!(ws.len(), 1);
        assert_eq!(ws.active().title(), "readme.md");
        assert_eq!(ws.active().buffer.text(), "# Hi");
        assert_eq!(ws.active().annotations()[0].tag, StyleTag::Heading(1));
    }

    #[test]
    fn test_open_adds_tab_when_active_is_in_use() {
        let mut ws = Workspace::new();
        ws.active_mut().buffer.insert_str("draft");
        let index = ws.open_document(PathBuf::from("b.md"), "");
        assert_eq!(index, 1);
        assert_eq!(ws.len(), 2);
        assert_eq!(ws.tabs()[0].buffer.text(), "draft");
    }

    #[test]
    fn test_open_selects_already_open_file() {
        let mut ws = Workspace::new();
        ws.open_document(PathBuf::from("a.md"), "a");
        ws.new_tab();
        assert_eq!(ws.open_document(PathBuf::from("a.md"), "changed"), 0);
        assert_eq!(ws.len(), 2);
        assert_eq!(ws.active().buffer.text(), "a");
    }

    #[test]
    fn test_relative_and_absolute_spellings_share_a_tab() {
        let mut ws = Workspace::new();
        ws.open_document(PathBuf::from("notes.md"), "n");
        ws.new_tab();
        let absolute = std::env::current_dir().unwrap().join("notes.md");
        assert_eq!(ws.find_by_path(&absolute), Some(0));
        assert_eq!(ws.open_document(absolute.clone(), ""), 0);
        assert_eq!(ws.len(), 2);
        assert_eq!(ws.tabs()[0].path(), Some(absolute.as_path()));
    }

    #[test]
    fn test_last_tab_cannot_close() {
        let mut ws = Workspace::new();
        assert!(!ws.close_active());
        assert_eq!(ws.len(), 1);
    }

    #[test]
    fn test_close_moves_to_neighbor() {
        let mut ws = Workspace::new();
        ws.new_tab();
        ws.new_tab();
        assert!(ws.close_active());
        assert_eq!(ws.active_index(), 1);
        assert_eq!(ws.active().title(), "Untitled 2");
        ws.select(0);
        assert!(ws.close_active());
        assert_eq!(ws.active().title(), "Untitled 2");
    }

    #[test]
    fn test_next_prev_wrap() {
        let mut ws = Workspace::new();
        ws.new_tab();
        ws.new_tab();
        ws.next();
        assert_eq!(ws.active_index(), 0);
        ws.prev();
        assert_eq!(ws.active_index(), 2);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut ws = Workspace::new();
        assert!(!ws.select(3));
        assert_eq!(ws.active_index(), 0);
    }

    #[test]
    fn test_rename_and_set_path() {
        let mut ws = Workspace::new();
        ws.active_mut().rename("  Ideas ");
        assert_eq!(ws.active().title(), "Ideas");
        ws.active_mut().rename("   ");
        assert_eq!(ws.active().title(), "Ideas");
        ws.active_mut().set_path(PathBuf::from("/x/ideas.md"));
        assert_eq!(ws.active().title(), "ideas.md");
        assert_eq!(ws.active().path(), Some(Path::new("/x/ideas.md")));
    }

    #[test]
    fn test_unsaved_titles() {
        let mut ws = Workspace::new();
        ws.new_tab();
        ws.active_mut().buffer.insert_char('a');
        assert_eq!(ws.unsaved_titles(), vec!["Untitled 2".to_string()]);
    }

    #[test]
    fn test_rehighlight_replaces_annotations() {
        let mut ws = Workspace::new();
        let tab = ws.active_mut();
        tab.buffer.insert_str("**a**");
        tab.rehighlight();
        assert_eq!(tab.annotations().len(), 1);
        tab.buffer.select_all();
        tab.buffer.insert_str("plain");
        tab.rehighlight();
        assert!(tab.annotations().is_empty());
    }
}
