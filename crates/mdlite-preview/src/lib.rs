//! # mdlite-preview
//!
//! Loads a Markdown document from disk or over HTTP, falls back to a built-in
//! document when loading fails, and writes a static HTML page showing the
//! rendered document next to its source.

pub mod cli;
pub mod embedded;
pub mod loader;
pub mod preview;
pub mod telemetry;

pub use embedded::EMBEDDED_DOCUMENT;
pub use loader::{
    load_with_fallback, source_for, status_line, DocumentSource, FileSource, HttpSource,
    LoadError, LoadedDocument, Origin,
};
pub use preview::Preview;
