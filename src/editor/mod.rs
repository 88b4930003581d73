//! Text editing for one tab.
//!
//! Provides a rope-backed text buffer with cursor and selection management,
//! and the inline formatting commands that wrap or insert markup.

mod buffer;
mod format;

pub use buffer::{Cursor, Direction, EditorBuffer};
pub use format::FormatCommand;
