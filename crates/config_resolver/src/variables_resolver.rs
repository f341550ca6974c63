//! Substitutes variable placeholders in a whole configuration document.
//!
//! Values come from two sources: the variables configuration referenced by
//! the document's `variables_id` and the vault. Vault values are addressed as
//! `{{ vault.<key> }}`. Every placeholder must be resolved; otherwise the call
//! fails with a single error naming all missing placeholders.

use crate::configuration_variables_loader::{ConfigurationVariablesSource, VariableValuesSource};
use crate::document::ConfigurationDocument;
use crate::errors::{ResolverError, ResolverResult};
use crate::vault_variables_loader::VaultVariablesSource;
use placeholder_engine::{PlaceholderRenderer, ValueSet};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[cfg(test)]
#[path = "variables_resolver_tests.rs"]
mod tests;

#[derive(Clone)]
pub struct VariablesResolver {
    configuration_variables: Arc<dyn ConfigurationVariablesSource>,
    vault_variables: Arc<dyn VaultVariablesSource>,
    renderer: PlaceholderRenderer,
}

impl VariablesResolver {
    pub fn new(
        configuration_variables: Arc<dyn ConfigurationVariablesSource>,
        vault_variables: Arc<dyn VaultVariablesSource>,
    ) -> ResolverResult<Self> {
        Ok(Self {
            configuration_variables,
            vault_variables,
            renderer: PlaceholderRenderer::new()?,
        })
    }

    /// Resolves all variable placeholders of `document`.
    ///
    /// `values_id` and `values_data` select the values of the variables
    /// configuration; at most one of them may be given. Without either, the
    /// document's `variables_values_id` is used, then the configuration's
    /// default row.
    ///
    /// # Errors
    ///
    /// - `ResolverError::ConflictingValueSources` if both `values_id` and
    ///   `values_data` are given
    /// - `ResolverError::MissingPlaceholders` if any placeholder has no value
    /// - any error of the two loaders
    #[instrument(skip(self, document, values_data))]
    pub async fn resolve_variables(
        &self,
        document: &ConfigurationDocument,
        branch_id: &str,
        values_id: Option<&str>,
        values_data: Option<&Value>,
    ) -> ResolverResult<ConfigurationDocument> {
        let values_id = values_id.filter(|id| !id.is_empty());
        let values_data = values_data.filter(|data| !is_empty_data(data));
        if values_id.is_some() && values_data.is_some() {
            return Err(ResolverError::ConflictingValueSources);
        }

        let source = match (values_id, values_data) {
            (Some(id), _) => VariableValuesSource::Row(id.to_string()),
            (None, Some(data)) => VariableValuesSource::Inline(data.clone()),
            (None, None) => match document.variables_values_id()? {
                Some(id) => VariableValuesSource::Row(id),
                None => VariableValuesSource::Default,
            },
        };
        let variables_id = document.variables_id()?;

        let (vault_values, configuration_values) = futures::try_join!(
            self.vault_variables.load_variables(branch_id),
            async {
                match variables_id.as_deref() {
                    Some(id) => self.configuration_variables.load_variables(id, &source).await,
                    None => {
                        debug!("No variables configuration referenced");
                        Ok(ValueSet::new())
                    }
                }
            }
        )?;

        let rendered = self
            .renderer
            .render(&document.as_value(), &[&configuration_values, &vault_values]);
        let report = rendered.report;

        if !report.replaced.is_empty() {
            info!(
                "Replaced values for variables: {}",
                report.replaced.join(", ")
            );
        }

        if !report.missing.is_empty() {
            return Err(ResolverError::MissingPlaceholders {
                names: report.missing.to_vec(),
            });
        }

        ConfigurationDocument::from_value(rendered.document)
    }
}

/// Inline values given as `null`, `{}` or `[]` count as not given.
fn is_empty_data(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
