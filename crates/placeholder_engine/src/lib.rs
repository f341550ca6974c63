//! Placeholder engine for configuration documents.
//!
//! This crate scans semi-structured configuration documents (JSON values) for
//! `{{ name }}` placeholders and substitutes them with values taken from one or
//! more [`ValueSet`]s. Every render reports which placeholder names were
//! replaced and which were discovered without a matching value.
//!
//! The syntax is deliberately fixed and single level: a placeholder name is made
//! of ASCII letters, digits, `_`, `-` and `.`, optionally surrounded by
//! whitespace inside the braces. There are no sections, helpers or expressions.
//!
//! # Examples
//!
//! ```rust
//! use placeholder_engine::{PlaceholderRenderer, ValueSet};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), placeholder_engine::Error> {
//! let renderer = PlaceholderRenderer::new()?;
//! let values = ValueSet::from_iter([("env", "prod")]);
//!
//! let rendered = renderer.render(
//!     &json!({"url": "https://{{ env }}.example.com", "token": "{{secret}}"}),
//!     &[&values],
//! );
//!
//! assert_eq!(
//!     rendered.document,
//!     json!({"url": "https://prod.example.com", "token": "{{ secret }}"})
//! );
//! assert_eq!(rendered.report.replaced.to_vec(), vec!["env"]);
//! assert_eq!(rendered.report.missing.to_vec(), vec!["secret"]);
//! # Ok(())
//! # }
//! ```

mod errors;
pub use errors::Error;

pub mod placeholder;
pub use placeholder::Placeholder;

pub mod renderer;
pub use renderer::{PlaceholderRenderer, RenderReport, RenderResult};

pub mod value_set;
pub use value_set::{NameSet, ValueSet};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
