//! Runs the whole resolution pipeline.

use crate::configuration_variables_loader::ConfigurationVariablesLoader;
use crate::document::ConfigurationDocument;
use crate::errors::ResolverResult;
use crate::shared_code_resolver::SharedCodeResolver;
use crate::vault_variables_loader::VaultVariablesLoader;
use crate::variables_resolver::VariablesResolver;
use serde_json::Value;
use std::sync::Arc;
use storage_client::{ClientWrapper, VaultStore};
use tracing::instrument;

#[cfg(test)]
#[path = "configuration_resolver_tests.rs"]
mod tests;

/// Output of [`ConfigurationResolver::resolve_configuration`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfiguration {
    pub configuration: Value,
}

/// Resolves shared code, then variables.
///
/// Shared code goes first so that snippets may contain variable
/// placeholders themselves.
///
/// # Examples
///
/// ```rust,no_run
/// use config_resolver::ConfigurationResolver;
/// use serde_json::json;
/// use std::sync::Arc;
/// use storage_client::{ClientSettings, ClientWrapper, VaultApiClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = ClientSettings::from_env()?;
/// let client = ClientWrapper::connect(&settings).await?;
/// let vault = Arc::new(VaultApiClient::from_settings(&settings)?);
///
/// let resolver = ConfigurationResolver::new(client, vault)?.with_variable_values_id("456");
/// let resolved = resolver
///     .resolve_configuration(&json!({
///         "variables_id": "123",
///         "parameters": {"host": "{{ host }}", "password": "{{ vault.password }}"}
///     }))
///     .await?;
/// println!("{}", resolved.configuration);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ConfigurationResolver {
    shared_code_resolver: SharedCodeResolver,
    variables_resolver: VariablesResolver,
    branch_id: String,
    variable_values_id: Option<String>,
    variable_values_data: Option<Value>,
}

impl ConfigurationResolver {
    /// Creates a resolver reading from the active branch of `client`.
    pub fn new(client: ClientWrapper, vault: Arc<dyn VaultStore>) -> ResolverResult<Self> {
        let branch_id = client.branch_id().to_string();
        let variables_resolver = VariablesResolver::new(
            Arc::new(ConfigurationVariablesLoader::new(client.clone())),
            Arc::new(VaultVariablesLoader::new(vault)),
        )?;

        Ok(Self::from_parts(
            SharedCodeResolver::new(client)?,
            variables_resolver,
            branch_id,
        ))
    }

    pub fn from_parts(
        shared_code_resolver: SharedCodeResolver,
        variables_resolver: VariablesResolver,
        branch_id: impl Into<String>,
    ) -> Self {
        Self {
            shared_code_resolver,
            variables_resolver,
            branch_id: branch_id.into(),
            variable_values_id: None,
            variable_values_data: None,
        }
    }

    /// Uses the given row of the variables configuration for values.
    pub fn with_variable_values_id(mut self, values_id: impl Into<String>) -> Self {
        self.variable_values_id = Some(values_id.into());
        self
    }

    /// Uses inline values shaped like a values row: `{"values": [{"name", "value"}]}`.
    pub fn with_variable_values_data(mut self, values_data: Value) -> Self {
        self.variable_values_data = Some(values_data);
        self
    }

    pub fn branch_id(&self) -> &str {
        &self.branch_id
    }

    /// Resolves a configuration document.
    ///
    /// Errors of either stage are returned as they are; no partial document
    /// is returned on failure.
    #[instrument(skip(self, configuration), fields(branch_id = %self.branch_id))]
    pub async fn resolve_configuration(
        &self,
        configuration: &Value,
    ) -> ResolverResult<ResolvedConfiguration> {
        let document = ConfigurationDocument::from_value(configuration.clone())?;

        let document = self
            .shared_code_resolver
            .resolve_shared_code(&document)
            .await?;
        let document = self
            .variables_resolver
            .resolve_variables(
                &document,
                &self.branch_id,
                self.variable_values_id.as_deref(),
                self.variable_values_data.as_ref(),
            )
            .await?;

        Ok(ResolvedConfiguration {
            configuration: document.into_value(),
        })
    }
}
