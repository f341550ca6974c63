//! Resolution error types.
//!
//! Nearly every failure here is caused by the configuration a user wrote
//! (an unknown shared code row, a typo in a placeholder, a malformed values
//! row). Those errors carry the text shown to the user unchanged.

use std::fmt;
use thiserror::Error;
use tracing::warn;

/// The part of the system an error message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    SharedCode,
    VariableConfiguration,
    VariableValues,
    VaultVariables,
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Subsystem::SharedCode => "Shared code configuration",
            Subsystem::VariableConfiguration => "Variable configuration",
            Subsystem::VariableValues => "Variable values configuration",
            Subsystem::VaultVariables => "Vault variables",
        };
        f.write_str(name)
    }
}

/// Errors raised while resolving a configuration document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolverError {
    /// A configuration, row or variable list could not be fetched.
    #[error("{subsystem} cannot be read: {reason}")]
    Unreadable { subsystem: Subsystem, reason: String },

    /// Fetched or supplied data does not have the expected structure.
    #[error("{subsystem} is invalid: {reason}")]
    Invalid { subsystem: Subsystem, reason: String },

    #[error("Missing values for placeholders: {}", .names.join(", "))]
    MissingPlaceholders { names: Vec<String> },

    #[error("Only one of variable values ID and variable values data can be provided.")]
    ConflictingValueSources,

    #[error("No variable values provided for variables configuration \"{variables_id}\" and no default values are configured.")]
    NoVariableValues { variables_id: String },

    #[error("Configuration document is invalid: {reason}")]
    InvalidDocument { reason: String },

    #[error("Placeholder renderer failed: {0}")]
    Renderer(#[from] placeholder_engine::Error),
}

impl ResolverError {
    pub fn unreadable(subsystem: Subsystem, reason: impl fmt::Display) -> Self {
        Self::Unreadable {
            subsystem,
            reason: reason.to_string(),
        }
    }

    pub fn invalid(subsystem: Subsystem, reason: impl fmt::Display) -> Self {
        Self::Invalid {
            subsystem,
            reason: reason.to_string(),
        }
    }

    /// Maps a failed collaborator call to a user facing error.
    pub(crate) fn from_client(subsystem: Subsystem, error: storage_client::Error) -> Self {
        if !error.is_not_found() {
            warn!(subsystem = %subsystem, error = %error, "Collaborator request failed");
        }
        Self::unreadable(subsystem, error)
    }

    /// Whether the error was caused by user supplied configuration.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, ResolverError::Renderer(_))
    }
}

/// Result type alias for resolution operations.
pub type ResolverResult<T> = Result<T, ResolverError>;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
