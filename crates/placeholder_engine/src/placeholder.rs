//! Placeholder tokens.
//!
//! A placeholder is written as two opening braces, an optional run of
//! whitespace, a name, an optional run of whitespace and two closing braces:
//! `{{name}}`, `{{ name }}` and `{{  name\t}}` all refer to `name`.

use std::ops::Range;

#[cfg(test)]
#[path = "placeholder_tests.rs"]
mod tests;

/// Regular expression matching a single placeholder; group 1 captures the name.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}";

/// A placeholder found in a string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The placeholder name with surrounding whitespace removed.
    pub name: String,

    /// Byte range of the whole `{{ ... }}` token in the scanned string.
    pub span: Range<usize>,
}

impl Placeholder {
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Canonical spelling of this placeholder, `{{ name }}`.
    pub fn canonical(&self) -> String {
        canonical(&self.name)
    }
}

/// Returns the canonical `{{ name }}` spelling for a placeholder name.
pub fn canonical(name: &str) -> String {
    format!("{{{{ {name} }}}}")
}
