//! Rule system for inline Markdown to HTML conversion.

mod builtin;
mod rule;

pub use builtin::builtin_rules;
pub use rule::{ReplacementFn, Rule};

use indexmap::IndexMap;

/// Ordered collection of inline rules
pub struct Rules {
    /// Built-in rules (images, links, strong, emphasis, strikethrough)
    builtin_rules: Vec<Rule>,
    /// Custom rules added by the user (run after the built-ins, in insertion order)
    custom_rules: IndexMap<String, Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in rules
    pub fn new() -> Self {
        Self {
            builtin_rules: builtin_rules(),
            custom_rules: IndexMap::new(),
        }
    }

    /// Add a custom rule, replacing any rule previously added under `key`
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Remove a custom rule
    pub fn remove(&mut self, key: &str) -> Option<Rule> {
        self.custom_rules.shift_remove(key)
    }

    /// Iterate over every rule in application order
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.builtin_rules.iter().chain(self.custom_rules.values())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
