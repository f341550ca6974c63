//! # Placeholder Renderer
//!
//! Walks a JSON document and substitutes `{{ name }}` placeholders found in
//! string leaves.
//!
//! ## Rules
//!
//! - Only string leaves are scanned. Numbers, booleans and nulls pass through,
//!   object keys are never rewritten and the nesting and key order of the
//!   document are preserved.
//! - A name is looked up in the supplied value sets in order; the first set
//!   containing it wins.
//! - Substitution is a single pass: text inserted for one placeholder is not
//!   scanned again, so values containing `{{ ... }}` survive verbatim.
//! - A placeholder without a value is left in the document in its canonical
//!   `{{ name }}` spelling and reported as missing.

use crate::placeholder::{canonical, Placeholder, PLACEHOLDER_PATTERN};
use crate::{Error, NameSet, ValueSet};
use regex::{Captures, Regex};
use serde_json::Value;
use tracing::debug;

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;

/// Names collected while rendering.
///
/// Both sets keep the order in which names were first discovered and hold
/// each name once, however many times it occurs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Placeholders that had a value and were substituted.
    pub replaced: NameSet,

    /// Placeholders that had no value and were left in canonical form.
    pub missing: NameSet,
}

impl RenderReport {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Output of [`PlaceholderRenderer::render`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    /// The rendered copy of the input document.
    pub document: Value,

    /// Replaced and missing placeholder names.
    pub report: RenderReport,
}

/// Substitutes placeholders in configuration documents.
///
/// The renderer is stateless apart from its compiled pattern and can be
/// shared freely between resolution calls.
#[derive(Debug, Clone)]
pub struct PlaceholderRenderer {
    pattern: Regex,
}

impl PlaceholderRenderer {
    /// Creates a renderer with the standard placeholder syntax.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if the placeholder pattern fails to
    /// compile.
    pub fn new() -> Result<Self, Error> {
        let pattern = Regex::new(PLACEHOLDER_PATTERN).map_err(|e| Error::InvalidPattern {
            reason: e.to_string(),
        })?;
        Ok(Self { pattern })
    }

    /// Lists the placeholders of a single string in order of appearance.
    pub fn placeholders(&self, text: &str) -> Vec<Placeholder> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let token = caps.get(0)?;
                let name = caps.get(1)?;
                Some(Placeholder::new(name.as_str(), token.range()))
            })
            .collect()
    }

    /// Renders a whole document against `value_sets`, tried in order.
    pub fn render(&self, document: &Value, value_sets: &[&ValueSet]) -> RenderResult {
        let mut report = RenderReport::new();
        let document = self.render_with(document, value_sets, &mut report);

        debug!(
            replaced = report.replaced.len(),
            missing = report.missing.len(),
            "Rendered placeholders"
        );

        RenderResult { document, report }
    }

    /// Renders `value`, accumulating names into an existing report.
    ///
    /// Use this to render selected parts of a document while keeping a single
    /// report for the whole pass.
    pub fn render_with(
        &self,
        value: &Value,
        value_sets: &[&ValueSet],
        report: &mut RenderReport,
    ) -> Value {
        match value {
            Value::String(text) => Value::String(self.render_str(text, value_sets, report)),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.render_with(item, value_sets, report))
                    .collect(),
            ),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, item)| (key.clone(), self.render_with(item, value_sets, report)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Renders a single string.
    pub fn render_str(
        &self,
        text: &str,
        value_sets: &[&ValueSet],
        report: &mut RenderReport,
    ) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                let name = &caps[1];
                match ValueSet::lookup(value_sets, name) {
                    Some(value) => {
                        report.replaced.insert(name);
                        value.to_string()
                    }
                    None => {
                        report.missing.insert(name);
                        canonical(name)
                    }
                }
            })
            .into_owned()
    }
}
