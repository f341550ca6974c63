use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Error types that can occur while preparing the placeholder engine.
///
/// Rendering itself never fails: unknown placeholders are reported through
/// [`crate::RenderReport::missing`] and it is up to the caller to decide whether
/// that is an error. The only failure is building the placeholder matcher.
///
/// # Examples
///
/// ```rust
/// use placeholder_engine::{Error, PlaceholderRenderer};
///
/// match PlaceholderRenderer::new() {
///     Ok(_renderer) => {}
///     Err(Error::InvalidPattern { reason }) => eprintln!("bad pattern: {reason}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The placeholder pattern could not be compiled.
    #[error("Invalid placeholder pattern: {reason}")]
    InvalidPattern {
        /// Message reported by the regex compiler
        reason: String,
    },
}
