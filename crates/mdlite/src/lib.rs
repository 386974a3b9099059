//! # mdlite
//!
//! A small, line-oriented Markdown to HTML converter.
//!
//! It covers the constructs most documents use: ATX headings, paragraphs,
//! emphasis and strong emphasis, strikethrough, ordered and unordered lists,
//! blockquotes, fenced code blocks, code spans, links, images and thematic
//! breaks. It is not a CommonMark implementation, and its output is only
//! entity-escaped, not sanitized.
//!
//! ## Design
//!
//! Conversion happens in two layers:
//!
//! - **Block parser**: walks the document line by line and decides which block
//!   each line belongs to. Blockquotes are parsed by calling back into the
//!   block parser on the unwrapped lines.
//! - **Inline renderer**: turns the text of one heading, list item or
//!   paragraph into HTML by running an ordered table of regex rules over the
//!   escaped text.
//!
//! Both layers are pure functions of their input; nothing is kept between
//! calls.
//!
//! ## Example
//!
//! ```rust
//! let html = mdlite::parse("# Hello\n\nSome *emphasis* and `code`.");
//! assert_eq!(
//!     html,
//!     "<h1>Hello</h1><p>Some <em>emphasis</em> and <code>code</code>.</p>"
//! );
//! ```
//!
//! ## Example (custom rule)
//!
//! ```rust
//! use mdlite::{MarkdownService, Rule};
//!
//! let mut service = MarkdownService::new();
//! service.add_rule(
//!     "mark",
//!     Rule::from_pattern(r"==(.+?)==", |caps, _| format!("<mark>{}</mark>", &caps[1])).unwrap(),
//! );
//! assert_eq!(service.render_inline("==hi=="), "<mark>hi</mark>");
//! ```

mod block;
mod inline;
mod options;
mod rules;
mod service;
mod utilities;

use once_cell::sync::Lazy;

pub use inline::InlineContext;
pub use options::{LinkTarget, MarkdownOptions};
pub use rules::{ReplacementFn, Rule, Rules};
pub use service::MarkdownService;
pub use utilities::{collapse_whitespace, escape_html, normalize_document};

/// Error type for mdlite operations
#[derive(Debug, thiserror::Error)]
pub enum MarkdownError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

pub type Result<T> = std::result::Result<T, MarkdownError>;

static DEFAULT_SERVICE: Lazy<MarkdownService> = Lazy::new(MarkdownService::new);

/// Convert a Markdown document to HTML with default options.
///
/// Never fails: malformed Markdown degrades to literal text, and empty input
/// gives an empty string.
pub fn parse(document: &str) -> String {
    DEFAULT_SERVICE.parse(document)
}

/// Convert one span of inline Markdown to HTML with default options.
pub fn render_inline(text: &str) -> String {
    DEFAULT_SERVICE.render_inline(text)
}
