//! MarkdownService - the main entry point for Markdown to HTML conversion.

use crate::block::parse_document;
use crate::inline::render_inline;
use crate::options::MarkdownOptions;
use crate::rules::{Rule, Rules};
use crate::Result;

/// The main service for converting Markdown to HTML
///
/// Holds options and the inline rule table; carries no per-document state, so
/// one service can be shared across threads and reused for any number of
/// documents.
pub struct MarkdownService {
    options: MarkdownOptions,
    rules: Rules,
}

impl MarkdownService {
    /// Create a new MarkdownService with default options
    pub fn new() -> Self {
        Self {
            options: MarkdownOptions::default(),
            rules: Rules::new(),
        }
    }

    /// Create a MarkdownService with custom options
    pub fn with_options(options: MarkdownOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Create a MarkdownService after validating `options`
    pub fn try_with_options(options: MarkdownOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::with_options(options))
    }

    /// Convert a Markdown document to HTML
    pub fn parse(&self, document: &str) -> String {
        parse_document(document, self)
    }

    /// Convert a single span of inline Markdown to HTML
    pub fn render_inline(&self, text: &str) -> String {
        render_inline(text, &self.rules, &self.options)
    }

    /// Add a custom inline rule, run after the built-in rules
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Remove a custom inline rule
    pub fn remove_rule(&mut self, key: &str) -> &mut Self {
        self.rules.remove(key);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut MarkdownOptions {
        &mut self.options
    }
}

impl Default for MarkdownService {
    fn default() -> Self {
        Self::new()
    }
}
