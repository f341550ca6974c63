//! Crate for reading configurations from the Storage API and variables from the Vault API.
//!
//! The resolver crates only depend on the two traits defined here,
//! [`ConfigurationStore`] and [`VaultStore`]. This crate also ships the HTTP
//! implementations of both ([`StorageApiClient`], [`VaultApiClient`]), the
//! branch-aware [`ClientWrapper`] and the [`ClientSettings`] used to wire them.

use async_trait::async_trait;

pub mod client_wrapper;
pub use client_wrapper::ClientWrapper;

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{Configuration, ConfigurationRow, DevBranch, VaultVariable};

pub mod settings;
pub use settings::ClientSettings;

pub mod storage_api;
pub use storage_api::StorageApiClient;

pub mod vault_api;
pub use vault_api::VaultApiClient;

pub use secrecy::SecretString;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Read access to component configurations.
///
/// Implementations are bound to a single branch; use [`ClientWrapper`] to pick
/// the store of the active development branch.
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Fetches a configuration together with its rows.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigurationNotFound` if the configuration does not exist.
    async fn get_configuration(
        &self,
        component_id: &str,
        configuration_id: &str,
    ) -> Result<Configuration, Error>;

    /// Fetches a single configuration row.
    ///
    /// The default implementation loads the whole configuration and picks the
    /// row from it.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigurationNotFound` if the configuration does not
    /// exist and `Error::RowNotFound` if it has no such row.
    async fn get_configuration_row(
        &self,
        component_id: &str,
        configuration_id: &str,
        row_id: &str,
    ) -> Result<ConfigurationRow, Error> {
        let configuration = self
            .get_configuration(component_id, configuration_id)
            .await?;
        configuration
            .row(row_id)
            .cloned()
            .ok_or_else(|| Error::RowNotFound {
                id: row_id.to_string(),
            })
    }
}

/// Read access to branch scoped vault variables.
#[async_trait]
pub trait VaultStore: Send + Sync {
    /// Lists the variables visible from `branch_id`.
    ///
    /// The vault resolves scoping itself: a value defined for the branch
    /// replaces the unscoped value of the same key.
    async fn list_scoped_variables_for_branch(
        &self,
        branch_id: &str,
    ) -> Result<Vec<VaultVariable>, Error>;
}
