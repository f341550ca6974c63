//! Error types for Storage API and Vault API operations.
//!
//! The messages of the not-found variants are surfaced to end users by the
//! resolver crate (for example `Shared code configuration cannot be read:
//! Configuration 123 not found`), so their wording is part of the contract.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while talking to the configuration store or vault.
///
/// ## Examples
///
/// ```rust,ignore
/// use storage_client::Error;
///
/// match store.get_configuration("keboola.shared-code", "123").await {
///     Ok(configuration) => println!("Loaded {} rows", configuration.rows.len()),
///     Err(Error::ConfigurationNotFound { id }) => eprintln!("No configuration {id}"),
///     Err(err) => eprintln!("Other error: {err}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested configuration does not exist (in the active branch).
    #[error("Configuration {id} not found")]
    ConfigurationNotFound {
        /// Identifier of the configuration that was requested
        id: String,
    },

    /// The requested configuration row does not exist.
    #[error("Row {id} not found")]
    RowNotFound {
        /// Identifier of the row that was requested
        id: String,
    },

    /// The project has no branch flagged as default.
    #[error("Default branch not found")]
    DefaultBranchNotFound,

    /// The API answered with a non-success status other than 404.
    #[error("API request failed with status {status}: {message}")]
    ApiError {
        /// HTTP status code returned by the API
        status: u16,
        /// Error message extracted from the response body
        message: String,
    },

    /// Transport level failure (connection, timeout, TLS, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected structure.
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A base URL from the settings could not be parsed or extended.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client settings are missing or malformed.
    #[error("Invalid client settings: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` for the not-found variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::ConfigurationNotFound { .. } | Error::RowNotFound { .. }
        )
    }
}
