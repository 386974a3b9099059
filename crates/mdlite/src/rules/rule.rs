//! Rule type for inline Markdown substitution.

use regex::{Captures, Regex};

use crate::inline::InlineContext;
use crate::Result;

/// Type alias for replacement functions
pub type ReplacementFn =
    Box<dyn Fn(&Captures<'_>, &mut InlineContext<'_>) -> String + Send + Sync>;

/// A rule rewrites every match of its pattern in already-escaped inline text
pub struct Rule {
    /// Pattern the rule applies to
    pub pattern: Regex,
    /// Replacement function that generates HTML
    pub replacement: ReplacementFn,
}

impl Rule {
    /// Create a new rule from a compiled pattern
    pub fn new<F>(pattern: Regex, replacement: F) -> Self
    where
        F: Fn(&Captures<'_>, &mut InlineContext<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            pattern,
            replacement: Box::new(replacement),
        }
    }

    /// Compile `pattern` and create a rule from it
    pub fn from_pattern<F>(pattern: &str, replacement: F) -> Result<Self>
    where
        F: Fn(&Captures<'_>, &mut InlineContext<'_>) -> String + Send + Sync + 'static,
    {
        Ok(Self::new(Regex::new(pattern)?, replacement))
    }

    /// Apply this rule to every non-overlapping match in `text`
    pub fn apply(&self, text: &str, ctx: &mut InlineContext<'_>) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures<'_>| (self.replacement)(caps, ctx))
            .into_owned()
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}
