//! Variable values stored in `keboola.variables` configurations.
//!
//! A variables configuration declares the variable names; its rows hold sets
//! of values for them. Which row is used is decided by the caller (see
//! [`VariableValuesSource`]); the configuration may also name a default row.

use crate::errors::{ResolverError, ResolverResult, Subsystem};
use crate::schema::{validate_variable_values, validate_variables_definition};
use async_trait::async_trait;
use placeholder_engine::ValueSet;
use serde_json::Value;
use storage_client::ClientWrapper;
use tracing::{debug, info, instrument};

#[cfg(test)]
#[path = "configuration_variables_loader_tests.rs"]
mod tests;

/// Component holding variables configurations.
pub const VARIABLES_COMPONENT_ID: &str = "keboola.variables";

/// Where the values for a variables configuration come from.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableValuesSource {
    /// A row of the variables configuration.
    Row(String),
    /// Values supplied directly, shaped like a values row.
    Inline(Value),
    /// The row named by the configuration's `default_values_id`.
    Default,
}

/// Provides the values of a variables configuration.
#[async_trait]
pub trait ConfigurationVariablesSource: Send + Sync {
    /// Loads `name -> value` pairs for the configuration `variables_id`.
    async fn load_variables(
        &self,
        variables_id: &str,
        source: &VariableValuesSource,
    ) -> ResolverResult<ValueSet>;
}

/// Loads variable values through the Storage API.
#[derive(Debug, Clone)]
pub struct ConfigurationVariablesLoader {
    client: ClientWrapper,
}

impl ConfigurationVariablesLoader {
    pub fn new(client: ClientWrapper) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConfigurationVariablesSource for ConfigurationVariablesLoader {
    #[instrument(skip(self, source))]
    async fn load_variables(
        &self,
        variables_id: &str,
        source: &VariableValuesSource,
    ) -> ResolverResult<ValueSet> {
        let store = self.client.branch_client_if_available();

        debug!("Loading variables configuration");
        let configuration = store
            .get_configuration(VARIABLES_COMPONENT_ID, variables_id)
            .await
            .map_err(|e| ResolverError::from_client(Subsystem::VariableConfiguration, e))?;

        let definition = validate_variables_definition(&configuration.configuration)
            .map_err(|e| ResolverError::invalid(Subsystem::VariableConfiguration, e))?;

        let values_row_id = match source {
            VariableValuesSource::Inline(data) => {
                info!("Replacing variables using inline values.");
                return values_from(data);
            }
            VariableValuesSource::Row(row_id) => row_id.clone(),
            VariableValuesSource::Default => {
                definition
                    .default_values_id
                    .ok_or_else(|| ResolverError::NoVariableValues {
                        variables_id: variables_id.to_string(),
                    })?
            }
        };

        info!(
            "Replacing variables using values with ID: \"{}\".",
            values_row_id
        );
        let row = store
            .get_configuration_row(VARIABLES_COMPONENT_ID, variables_id, &values_row_id)
            .await
            .map_err(|e| ResolverError::from_client(Subsystem::VariableValues, e))?;

        values_from(&row.configuration)
    }
}

fn values_from(data: &Value) -> ResolverResult<ValueSet> {
    let values = validate_variable_values(data)
        .map_err(|e| ResolverError::invalid(Subsystem::VariableValues, e))?;
    Ok(values.values.into_iter().collect())
}
