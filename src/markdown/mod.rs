//! Markdown highlighting and preview rendering.
//!
//! Two pure functions over the full text of one buffer:
//! - [`highlight`] styles the raw source with non-overlapping annotations
//! - [`render`] produces transformed, styled runs for the preview pane
//!
//! Both share the rule definitions in [`rules`] and keep no state between
//! calls. Callers replace their previous output wholesale.

mod highlighter;
mod preview;
pub mod rules;
mod types;

pub use highlighter::highlight;
pub use preview::render;
pub use types::{Annotation, PreviewNode, Span, StyleTag};
