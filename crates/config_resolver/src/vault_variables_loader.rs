//! Variables stored in the vault.

use crate::errors::{ResolverError, ResolverResult, Subsystem};
use async_trait::async_trait;
use placeholder_engine::ValueSet;
use std::sync::Arc;
use storage_client::VaultStore;
use tracing::{debug, instrument};

#[cfg(test)]
#[path = "vault_variables_loader_tests.rs"]
mod tests;

/// Namespace under which vault variables are addressed in placeholders.
pub const VAULT_PREFIX: &str = "vault.";

/// Provides vault variables for a branch.
#[async_trait]
pub trait VaultVariablesSource: Send + Sync {
    /// Loads the variables visible from `branch_id`, keyed by their
    /// placeholder names.
    async fn load_variables(&self, branch_id: &str) -> ResolverResult<ValueSet>;
}

/// Loads vault variables and exposes them as `vault.<key>`.
///
/// Branch scoping is left to the vault: the returned list already has branch
/// values in place of unscoped ones and is used as is.
#[derive(Clone)]
pub struct VaultVariablesLoader {
    vault: Arc<dyn VaultStore>,
}

impl VaultVariablesLoader {
    pub fn new(vault: Arc<dyn VaultStore>) -> Self {
        Self { vault }
    }
}

#[async_trait]
impl VaultVariablesSource for VaultVariablesLoader {
    #[instrument(skip(self))]
    async fn load_variables(&self, branch_id: &str) -> ResolverResult<ValueSet> {
        let variables = self
            .vault
            .list_scoped_variables_for_branch(branch_id)
            .await
            .map_err(|e| ResolverError::from_client(Subsystem::VaultVariables, e))?;

        debug!(count = variables.len(), "Loaded vault variables");
        let values: ValueSet = variables
            .into_iter()
            .map(|variable| (variable.key, variable.value))
            .collect();

        Ok(values.prefixed(VAULT_PREFIX))
    }
}
