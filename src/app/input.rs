use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model, Motion, PromptKind};
use crate::editor::FormatCommand;
use crate::ui::{ToolbarButton, byte_at_column};

use super::event_loop::ResizeDebouncer;

/// Lines moved per mouse wheel notch and per Alt+Up/Down.
const SCROLL_STEP: usize = 3;

impl App {
    pub(super) fn handle_event(
        &self,
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(*key, model),
            Event::Mouse(mouse) => self.handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "queue resize");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(&self, key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if let Some(prompt) = model.prompt.as_ref() {
            return match key.code {
                KeyCode::Esc => Some(Message::CancelPrompt),
                KeyCode::Enter => {
                    let input = prompt.input.clone();
                    Some(match prompt.kind {
                        PromptKind::Open => Message::OpenPath(input),
                        PromptKind::SaveAs => Message::SaveAsPath(input),
                        PromptKind::Rename => Message::RenameTab(input),
                    })
                }
                KeyCode::Backspace => {
                    let mut next = prompt.input.clone();
                    next.pop();
                    Some(Message::PromptInput(next))
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    let mut next = prompt.input.clone();
                    next.push(c);
                    Some(Message::PromptInput(next))
                }
                _ => None,
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let select = key.modifiers.contains(KeyModifiers::SHIFT);
        let motion = |motion| Some(Message::EditorMove { motion, select });

        if ctrl {
            return match key.code {
                KeyCode::Char('n' | 't') => Some(Message::NewTab),
                KeyCode::Char('o') => Some(Message::StartOpen),
                KeyCode::Char('s') => Some(Message::Save),
                KeyCode::Char('w') => Some(Message::CloseTab),
                KeyCode::Char('r') => Some(Message::StartRename),
                KeyCode::Char('b') => Some(Message::Format(FormatCommand::Bold)),
                KeyCode::Char('i') => Some(Message::Format(FormatCommand::Italic)),
                KeyCode::Char('e') => Some(Message::Format(FormatCommand::Code)),
                KeyCode::Char('k') => Some(Message::Format(FormatCommand::Link)),
                KeyCode::Char('p') => Some(Message::TogglePreview),
                KeyCode::Char('a') => Some(Message::EditorSelectAll),
                KeyCode::Char('q' | 'c') => Some(Message::Quit),
                KeyCode::PageUp => Some(Message::PrevTab),
                KeyCode::PageDown => Some(Message::NextTab),
                KeyCode::Left => motion(Motion::WordLeft),
                KeyCode::Right => motion(Motion::WordRight),
                KeyCode::Home => motion(Motion::BufferStart),
                KeyCode::End => motion(Motion::BufferEnd),
                _ => None,
            };
        }

        if alt {
            return match key.code {
                KeyCode::Char('s') => Some(Message::StartSaveAs),
                KeyCode::Char('i') => Some(Message::Format(FormatCommand::Italic)),
                KeyCode::Char(c @ '1'..='9') => {
                    Some(Message::SelectTab(c as usize - '1' as usize))
                }
                KeyCode::Left => Some(Message::PrevTab),
                KeyCode::Right => Some(Message::NextTab),
                KeyCode::Up => Some(Message::PreviewScrollUp(SCROLL_STEP)),
                KeyCode::Down => Some(Message::PreviewScrollDown(SCROLL_STEP)),
                _ => None,
            };
        }

        match key.code {
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Esc => Some(Message::EditorClearSelection),
            KeyCode::Char(c) => Some(Message::EditorInsertChar(c)),
            KeyCode::Tab => Some(Message::EditorInsertChar('\t')),
            KeyCode::Enter => Some(Message::EditorSplitLine),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Left => motion(Motion::Left),
            KeyCode::Right => motion(Motion::Right),
            KeyCode::Up => motion(Motion::Up),
            KeyCode::Down => motion(Motion::Down),
            KeyCode::Home => motion(Motion::LineStart),
            KeyCode::End => motion(Motion::LineEnd),
            KeyCode::PageUp => motion(Motion::PageUp),
            KeyCode::PageDown => motion(Motion::PageDown),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(&self, mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return matches!(mouse.kind, MouseEventKind::Down(_)).then_some(Message::HideHelp);
        }

        let layout = model.layout();
        let (col, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if point_in_rect(col, row, layout.toolbar) {
                    return crate::ui::toolbar_buttons(layout.toolbar, model.preview_visible)
                        .into_iter()
                        .find(|(rect, _)| point_in_rect(col, row, *rect))
                        .map(|(_, button)| message_for_button(button));
                }
                if point_in_rect(col, row, layout.tabs) {
                    return crate::ui::tab_hit_boxes(layout.tabs, &model.workspace)
                        .iter()
                        .position(|rect| point_in_rect(col, row, *rect))
                        .map(Message::SelectTab);
                }
                if point_in_rect(col, row, layout.editor) {
                    let (line, byte) = editor_position(model, layout.editor, col, row);
                    return Some(Message::EditorMoveTo(line, byte));
                }
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if layout.editor.height == 0 {
                    return None;
                }
                let max_row = layout.editor.y + layout.editor.height - 1;
                let row = row.clamp(layout.editor.y, max_row);
                let (line, byte) = editor_position(model, layout.editor, col, row);
                Some(Message::EditorDragTo(line, byte))
            }
            MouseEventKind::ScrollUp => {
                if layout.preview.is_some_and(|area| point_in_rect(col, row, area)) {
                    Some(Message::PreviewScrollUp(SCROLL_STEP))
                } else if point_in_rect(col, row, layout.editor) {
                    Some(Message::EditorScrollUp(SCROLL_STEP))
                } else {
                    None
                }
            }
            MouseEventKind::ScrollDown => {
                if layout.preview.is_some_and(|area| point_in_rect(col, row, area)) {
                    Some(Message::PreviewScrollDown(SCROLL_STEP))
                } else if point_in_rect(col, row, layout.editor) {
                    Some(Message::EditorScrollDown(SCROLL_STEP))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

const fn message_for_button(button: ToolbarButton) -> Message {
    match button {
        ToolbarButton::New => Message::NewTab,
        ToolbarButton::Open => Message::StartOpen,
        ToolbarButton::Save => Message::Save,
        ToolbarButton::Format(command) => Message::Format(command),
        ToolbarButton::Preview => Message::TogglePreview,
    }
}

/// Buffer (line, byte column) under a cell of the editor pane.
fn editor_position(model: &Model, editor: Rect, col: u16, row: u16) -> (usize, usize) {
    let tab = model.active_tab();
    let last_line = tab.buffer.line_count().saturating_sub(1);
    let line = tab.scroll_offset + usize::from(row.saturating_sub(editor.y));
    if line > last_line {
        return (last_line, tab.buffer.line_len(last_line));
    }
    let gutter = crate::ui::gutter_width(tab.buffer.line_count());
    let x = usize::from(col.saturating_sub(editor.x + gutter));
    let text = tab.buffer.line_at(line).unwrap_or_default();
    (line, byte_at_column(&text, tab.h_scroll + x))
}

fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
