//! Mock collaborators shared by the unit tests.

use crate::configuration_variables_loader::{ConfigurationVariablesSource, VariableValuesSource};
use crate::errors::ResolverResult;
use crate::vault_variables_loader::VaultVariablesSource;
use async_trait::async_trait;
use placeholder_engine::ValueSet;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use storage_client::{
    ClientWrapper, Configuration, ConfigurationStore, Error as ClientError, VaultStore,
    VaultVariable,
};

/// In-memory configuration store keyed by component and configuration id.
///
/// Records every configuration and row request.
#[derive(Default)]
pub struct MockConfigurationStore {
    configurations: HashMap<(String, String), Configuration>,
    requests: Mutex<Vec<String>>,
}

impl MockConfigurationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a configuration from its JSON representation.
    pub fn with_configuration(mut self, component_id: &str, configuration: Value) -> Self {
        let configuration: Configuration =
            serde_json::from_value(configuration).expect("Invalid test configuration");
        self.configurations.insert(
            (component_id.to_string(), configuration.id.clone()),
            configuration,
        );
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfigurationStore for MockConfigurationStore {
    async fn get_configuration(
        &self,
        component_id: &str,
        configuration_id: &str,
    ) -> Result<Configuration, ClientError> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("{component_id}/{configuration_id}"));

        self.configurations
            .get(&(component_id.to_string(), configuration_id.to_string()))
            .cloned()
            .ok_or_else(|| ClientError::ConfigurationNotFound {
                id: configuration_id.to_string(),
            })
    }
}

/// Builds a wrapper over a single store acting as the main branch.
pub fn main_branch(store: Arc<MockConfigurationStore>) -> ClientWrapper {
    ClientWrapper::new("1001", store)
}

/// Vault returning a fixed list per branch, empty for unknown branches.
#[derive(Default)]
pub struct MockVaultStore {
    by_branch: HashMap<String, Vec<VaultVariable>>,
    fail_with: Option<u16>,
}

impl MockVaultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variables(mut self, branch_id: &str, variables: &[(&str, &str)]) -> Self {
        self.by_branch.insert(
            branch_id.to_string(),
            variables
                .iter()
                .map(|(key, value)| VaultVariable::new(*key, *value))
                .collect(),
        );
        self
    }

    pub fn failing(status: u16) -> Self {
        Self {
            by_branch: HashMap::new(),
            fail_with: Some(status),
        }
    }
}

#[async_trait]
impl VaultStore for MockVaultStore {
    async fn list_scoped_variables_for_branch(
        &self,
        branch_id: &str,
    ) -> Result<Vec<VaultVariable>, ClientError> {
        if let Some(status) = self.fail_with {
            return Err(ClientError::ApiError {
                status,
                message: "Vault unavailable".to_string(),
            });
        }
        Ok(self.by_branch.get(branch_id).cloned().unwrap_or_default())
    }
}

/// Configuration variables source returning a fixed value set.
pub struct StaticConfigurationVariables {
    values: ValueSet,
    calls: Mutex<Vec<(String, VariableValuesSource)>>,
}

impl StaticConfigurationVariables {
    pub fn new(values: &[(&str, &str)]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, VariableValuesSource)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfigurationVariablesSource for StaticConfigurationVariables {
    async fn load_variables(
        &self,
        variables_id: &str,
        source: &VariableValuesSource,
    ) -> ResolverResult<ValueSet> {
        self.calls
            .lock()
            .unwrap()
            .push((variables_id.to_string(), source.clone()));
        Ok(self.values.clone())
    }
}

/// Vault variables source returning a fixed value set, used as is.
pub struct StaticVaultVariables {
    values: ValueSet,
}

impl StaticVaultVariables {
    pub fn new(values: &[(&str, &str)]) -> Self {
        Self {
            values: values.iter().copied().collect(),
        }
    }
}

#[async_trait]
impl VaultVariablesSource for StaticVaultVariables {
    async fn load_variables(&self, _branch_id: &str) -> ResolverResult<ValueSet> {
        Ok(self.values.clone())
    }
}
