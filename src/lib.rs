// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorBuffer)
    clippy::module_name_repetitions
)]

//! # Markpad
//!
//! A terminal Markdown editor with live preview.
//!
//! Markpad edits several Markdown documents in tabs with:
//! - Markdown highlighting in the editor pane
//! - A styled preview pane with syntax-colored code blocks
//! - Toolbar and keyboard formatting commands
//! - Open, save and save-as through a footer prompt
//!
//! ## Architecture
//!
//! Markpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`markdown`]: Highlight scanning and preview rendering
//! - [`editor`]: Text buffer, cursor and formatting commands
//! - [`workspace`]: Tabs and document file I/O
//! - [`ui`]: Terminal UI components
//! - [`syntax`]: Code block syntax highlighting
//! - [`theme`]: Colors per style tag

pub mod app;
pub mod config;
pub mod editor;
pub mod markdown;
pub mod perf;
pub mod syntax;
pub mod theme;
pub mod ui;
pub mod workspace;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::markdown::{Annotation, PreviewNode, highlight, render};
    pub use crate::workspace::Workspace;
}
