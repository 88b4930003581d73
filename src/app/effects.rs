use std::path::{Path, PathBuf};

use crate::app::{App, Message, Model, ToastLevel};
use crate::config::save_settings;
use crate::workspace::files::{self, FileError};

impl App {
    /// Run the file I/O a message asks for, after `update` has applied the
    /// pure part of it.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::Save => {
                if let Some(path) = model.active_tab().path().map(Path::to_path_buf) {
                    save_active_tab(model, path);
                }
            }
            Message::SaveAsPath(input) => {
                if input.trim().is_empty() {
                    model.show_toast(ToastLevel::Warning, "No file name given");
                    return;
                }
                let path = files::with_default_extension(files::resolve_path(
                    input,
                    model.settings.last_folder.as_deref(),
                ));
                save_active_tab(model, path);
            }
            Message::OpenPath(input) => {
                if input.trim().is_empty() {
                    model.show_toast(ToastLevel::Warning, "No file name given");
                    return;
                }
                let path = files::resolve_path(input, model.settings.last_folder.as_deref());
                open_path(model, path);
            }
            _ => {}
        }
    }
}

/// Load a document into a tab, reporting failures as a toast.
pub(super) fn open_path(model: &mut Model, path: PathBuf) {
    let _scope = crate::perf::scope("app.open_path");
    let path = files::absolute_path(path);
    if model.workspace.find_by_path(&path).is_some() {
        model.workspace.open_document(path, "");
        model.preview_scroll = 0;
        model.refresh_preview();
        return;
    }

    match files::read_document(&path) {
        Ok(text) => {
            let name = files::display_name(&path);
            let supported = files::is_supported_document(&path);
            remember_folder(model, &path);
            model.workspace.open_document(path, &text);
            model.preview_scroll = 0;
            model.refresh_preview();
            model.ensure_cursor_visible();
            if supported {
                model.show_toast(ToastLevel::Info, format!("Opened: {name}"));
            } else {
                model.show_toast(
                    ToastLevel::Warning,
                    format!("Opened {name} as plain text (not a Markdown file)"),
                );
            }
        }
        Err(err) => report_file_error(model, "Open", &err),
    }
}

fn save_active_tab(model: &mut Model, path: PathBuf) {
    let path = files::absolute_path(path);
    if let Some(index) = model.workspace.find_by_path(&path)
        && index != model.workspace.active_index()
    {
        let name = files::display_name(&path);
        model.show_toast(
            ToastLevel::Warning,
            format!("{name} is already open in another tab"),
        );
        return;
    }
    let text = model.active_tab().buffer.text();
    match files::write_document(&path, &text) {
        Ok(()) => {
            remember_folder(model, &path);
            let tab = model.active_tab_mut();
            tab.buffer.mark_clean();
            if tab.path() != Some(path.as_path()) {
                tab.set_path(path);
            }
            let title = tab.title().to_string();
            model.show_toast(ToastLevel::Info, format!("Saved {title}"));
        }
        Err(err) => report_file_error(model, "Save", &err),
    }
}

fn report_file_error(model: &mut Model, action: &str, err: &FileError) {
    tracing::warn!(action, %err, "file operation failed");
    model.show_toast(ToastLevel::Error, format!("{action} failed: {err}"));
}

/// Record the document's folder as the last used one and persist it.
fn remember_folder(model: &mut Model, path: &Path) {
    let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) else {
        return;
    };
    let folder = std::path::absolute(parent).unwrap_or_else(|_| parent.to_path_buf());
    if model.settings.last_folder.as_deref() == Some(folder.as_path()) {
        return;
    }
    model.settings.last_folder = Some(folder);
    if let Some(settings_path) = &model.settings_path
        && let Err(err) = save_settings(settings_path, &model.settings)
    {
        tracing::warn!(path = %settings_path.display(), %err, "could not save settings");
    }
}
