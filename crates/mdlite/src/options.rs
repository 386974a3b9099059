//! Configuration options for Markdown conversion

use crate::{MarkdownError, Result};

/// Where rendered links open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkTarget {
    /// Open in a new browsing context (`target="_blank" rel="noopener"`)
    #[default]
    Blank,
    /// Plain anchors without `target`/`rel`
    SameWindow,
}

/// Options for MarkdownService
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Number of spaces a tab expands to
    pub tab_width: usize,

    /// Link target behaviour
    pub link_target: LinkTarget,
}

impl MarkdownOptions {
    /// Check that the options describe a usable configuration.
    pub fn validate(&self) -> Result<()> {
        if self.tab_width == 0 {
            return Err(MarkdownError::InvalidOption(
                "tab_width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tab_width: 4,
            link_target: LinkTarget::Blank,
        }
    }
}
