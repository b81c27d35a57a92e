//! Renderers over the assembled metadata document.
//!
//! Both renderers are pure functions of the document: one produces the
//! structured JSON artifact, the other a Markdown rendering for humans.

pub mod json;
pub mod markdown;

pub use json::{parse_document, to_json};
pub use markdown::render_markdown;
