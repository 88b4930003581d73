use crate::app::Model;
use crate::app::model::{Prompt, PromptKind, ToastLevel};
use crate::editor::{Direction, FormatCommand};

/// Cursor movements available from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
    BufferStart,
    BufferEnd,
}

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Tabs
    /// Open an empty `Untitled N` tab
    NewTab,
    /// Close the active tab (asks again when unsaved)
    CloseTab,
    /// Activate the tab to the right, wrapping
    NextTab,
    /// Activate the tab to the left, wrapping
    PrevTab,
    /// Activate a tab by index
    SelectTab(usize),

    // Files
    /// Ask for a path to open
    StartOpen,
    /// Open the path typed into the prompt
    OpenPath(String),
    /// Save the active tab, asking for a path when it has none
    Save,
    /// Ask for a path to save the active tab to
    StartSaveAs,
    /// Save the active tab to the path typed into the prompt
    SaveAsPath(String),
    /// Ask for a new title for the active tab
    StartRename,
    /// Retitle the active tab
    RenameTab(String),

    // Prompt
    /// Replace the prompt input
    PromptInput(String),
    /// Close the prompt without acting
    CancelPrompt,

    // Editor
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Split line at cursor (Enter)
    EditorSplitLine,
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Move the cursor, extending the selection when `select` is set
    EditorMove { motion: Motion, select: bool },
    /// Move cursor to absolute position (line, byte column), dropping the selection
    EditorMoveTo(usize, usize),
    /// Extend the selection to (line, byte column), e.g. from a mouse drag
    EditorDragTo(usize, usize),
    /// Select the whole buffer
    EditorSelectAll,
    /// Drop the selection
    EditorClearSelection,
    /// Scroll editor viewport up by n lines
    EditorScrollUp(usize),
    /// Scroll editor viewport down by n lines
    EditorScrollDown(usize),
    /// Apply a formatting command to the selection or cursor
    Format(FormatCommand),

    // Preview
    /// Show or hide the preview pane
    TogglePreview,
    /// Scroll the preview up by n lines
    PreviewScrollUp(usize),
    /// Scroll the preview down by n lines
    PreviewScrollDown(usize),

    // Window
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application (asks again when tabs are unsaved)
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// File I/O for `Save`, `SaveAsPath` and `OpenPath` happens afterwards in
/// the event loop's side-effect handler.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset confirmation flags on any action other than the confirmed one.
    // Saving preserves the quit flag so Ctrl+S can settle a pending quit.
    if !matches!(msg, Message::Quit | Message::Save | Message::SaveAsPath(_)) {
        model.quit_confirmed = false;
    }
    if !matches!(msg, Message::CloseTab) {
        model.close_confirmed = false;
    }

    match msg {
        // Tabs
        Message::NewTab => {
            model.workspace.new_tab();
            model.preview_scroll = 0;
            model.refresh_preview();
        }
        Message::CloseTab => close_tab(&mut model),
        Message::NextTab => {
            model.workspace.next();
            tab_switched(&mut model);
        }
        Message::PrevTab => {
            model.workspace.prev();
            tab_switched(&mut model);
        }
        Message::SelectTab(index) => {
            if index != model.workspace.active_index() && model.workspace.select(index) {
                tab_switched(&mut model);
            }
        }

        // Files
        Message::StartOpen => {
            model.prompt = Some(Prompt {
                kind: PromptKind::Open,
                input: model.folder_prefill(),
            });
        }
        Message::Save => {
            if model.active_tab().path().is_none() {
                model.prompt = Some(Prompt {
                    kind: PromptKind::SaveAs,
                    input: model.folder_prefill(),
                });
            }
        }
        Message::StartSaveAs => {
            let input = model.active_tab().path().map_or_else(
                || model.folder_prefill(),
                |path| path.display().to_string(),
            );
            model.prompt = Some(Prompt {
                kind: PromptKind::SaveAs,
                input,
            });
        }
        Message::OpenPath(_) | Message::SaveAsPath(_) => {
            model.prompt = None;
        }
        Message::StartRename => {
            model.prompt = Some(Prompt {
                kind: PromptKind::Rename,
                input: model.active_tab().title().to_string(),
            });
        }
        Message::RenameTab(title) => {
            model.prompt = None;
            if title.trim().is_empty() {
                model.show_toast(ToastLevel::Warning, "Tab name cannot be empty");
            } else {
                model.active_tab_mut().rename(&title);
            }
        }

        // Prompt
        Message::PromptInput(input) => {
            if let Some(prompt) = model.prompt.as_mut() {
                prompt.input = input;
            }
        }
        Message::CancelPrompt => {
            model.prompt = None;
        }

        // Editor
        Message::EditorInsertChar(ch) => {
            model.active_tab_mut().buffer.insert_char(ch);
            model.after_edit();
        }
        Message::EditorSplitLine => {
            model.active_tab_mut().buffer.split_line();
            model.after_edit();
        }
        Message::EditorDeleteBack => {
            if model.active_tab_mut().buffer.delete_back() {
                model.after_edit();
            }
        }
        Message::EditorDeleteForward => {
            if model.active_tab_mut().buffer.delete_forward() {
                model.after_edit();
            }
        }
        Message::EditorMove { motion, select } => {
            let rows = model.editor_rows().max(1);
            let buffer = &mut model.active_tab_mut().buffer;
            buffer.extend_selection(select);
            match motion {
                Motion::Left => buffer.move_cursor(Direction::Left),
                Motion::Right => buffer.move_cursor(Direction::Right),
                Motion::Up => buffer.move_cursor(Direction::Up),
                Motion::Down => buffer.move_cursor(Direction::Down),
                Motion::WordLeft => buffer.move_word_left(),
                Motion::WordRight => buffer.move_word_right(),
                Motion::LineStart => buffer.move_home(),
                Motion::LineEnd => buffer.move_end(),
                Motion::PageUp => buffer.move_page_up(rows),
                Motion::PageDown => buffer.move_page_down(rows),
                Motion::BufferStart => buffer.move_to_start(),
                Motion::BufferEnd => buffer.move_to_end(),
            }
            model.ensure_cursor_visible();
        }
        Message::EditorMoveTo(line, col) => {
            let buffer = &mut model.active_tab_mut().buffer;
            buffer.extend_selection(false);
            buffer.move_to(line, col);
            model.ensure_cursor_visible();
        }
        Message::EditorDragTo(line, col) => {
            let buffer = &mut model.active_tab_mut().buffer;
            buffer.extend_selection(true);
            buffer.move_to(line, col);
            model.ensure_cursor_visible();
        }
        Message::EditorSelectAll => {
            model.active_tab_mut().buffer.select_all();
            model.ensure_cursor_visible();
        }
        Message::EditorClearSelection => {
            model.active_tab_mut().buffer.clear_selection();
        }
        Message::EditorScrollUp(n) => {
            let tab = model.active_tab_mut();
            tab.scroll_offset = tab.scroll_offset.saturating_sub(n);
        }
        Message::EditorScrollDown(n) => {
            let tab = model.active_tab_mut();
            let max = tab.buffer.line_count().saturating_sub(1);
            tab.scroll_offset = (tab.scroll_offset + n).min(max);
        }
        Message::Format(command) => {
            command.apply(&mut model.active_tab_mut().buffer);
            model.after_edit();
        }

        // Preview
        Message::TogglePreview => {
            model.preview_visible = !model.preview_visible;
            model.ensure_cursor_visible();
        }
        Message::PreviewScrollUp(n) => {
            model.preview_scroll = model.preview_scroll.saturating_sub(n);
        }
        Message::PreviewScrollDown(n) => {
            model.preview_scroll += n;
            model.clamp_preview_scroll();
        }

        // Window
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
            model.ensure_cursor_visible();
        }
        Message::Redraw => {}

        // Application
        Message::Quit => {
            let unsaved = model.workspace.unsaved_titles();
            if !unsaved.is_empty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    format!(
                        "Unsaved changes in {}! Press Ctrl+Q again to quit, or Ctrl+S to save",
                        unsaved.join(", ")
                    ),
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

fn close_tab(model: &mut Model) {
    if model.workspace.len() <= 1 {
        model.show_toast(ToastLevel::Info, "The last tab can't be closed");
        return;
    }
    if model.active_tab().is_dirty() && !model.close_confirmed {
        let title = model.active_tab().title().to_string();
        model.show_toast(
            ToastLevel::Warning,
            format!("Close '{title}'? Unsaved changes will be lost. Press Ctrl+W again"),
        );
        model.close_confirmed = true;
        return;
    }
    model.workspace.close_active();
    model.close_confirmed = false;
    tab_switched(model);
}

fn tab_switched(model: &mut Model) {
    model.preview_scroll = 0;
    model.refresh_preview();
    model.ensure_cursor_visible();
}
