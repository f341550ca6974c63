//! Inlines shared code snippets into a configuration document.
//!
//! A shared code configuration (component `keboola.shared-code`) holds one
//! snippet per row. A document opts in with `shared_code_id` and lists the
//! rows it uses in `shared_code_row_ids`; each `{{ <row id> }}` placeholder in
//! the document's parameters is then replaced by the row's code.
//!
//! Only list and object values directly under `parameters` are rendered.
//! Scalars directly under `parameters` are left alone, as is everything
//! outside `parameters`. Placeholders without a matching row are not an
//! error; they are left for the variables pass.

use crate::document::ConfigurationDocument;
use crate::errors::{ResolverError, ResolverResult, Subsystem};
use crate::schema::validate_shared_code_row;
use futures::future::try_join_all;
use placeholder_engine::{PlaceholderRenderer, RenderReport, ValueSet};
use serde_json::Value;
use storage_client::ClientWrapper;
use tracing::{debug, info, instrument};

#[cfg(test)]
#[path = "shared_code_resolver_tests.rs"]
mod tests;

/// Component holding shared code configurations.
pub const SHARED_CODE_COMPONENT_ID: &str = "keboola.shared-code";

#[derive(Debug, Clone)]
pub struct SharedCodeResolver {
    client: ClientWrapper,
    renderer: PlaceholderRenderer,
}

impl SharedCodeResolver {
    pub fn new(client: ClientWrapper) -> ResolverResult<Self> {
        Ok(Self {
            client,
            renderer: PlaceholderRenderer::new()?,
        })
    }

    /// Replaces shared code placeholders in the parameters of `document`.
    ///
    /// Reads go to the active development branch when one is set.
    ///
    /// # Errors
    ///
    /// - `ResolverError::Unreadable` if the shared code configuration or one
    ///   of the rows does not exist
    /// - `ResolverError::Invalid` if a row does not match the row schema
    #[instrument(skip(self, document))]
    pub async fn resolve_shared_code(
        &self,
        document: &ConfigurationDocument,
    ) -> ResolverResult<ConfigurationDocument> {
        let Some(shared_code_id) = document.shared_code_id()? else {
            return Ok(document.clone());
        };
        let row_ids = document.shared_code_row_ids()?;
        if row_ids.is_empty() {
            return Ok(document.clone());
        }

        let values = self.load_snippets(&shared_code_id, &row_ids).await?;

        let mut report = RenderReport::new();
        let parameters = document
            .parameters()
            .map(|parameters| self.render_parameters(parameters, &values, &mut report));

        let resolved = match parameters {
            Some(parameters) => document.with_parameters(parameters),
            None => document.clone(),
        };

        if !report.replaced.is_empty() {
            info!(
                "Loaded shared code snippets with ids: \"{}\".",
                row_ids.join(", ")
            );
        }

        Ok(resolved.with_shared_code_row_ids(&row_ids))
    }

    /// Loads and validates the requested rows, keyed by row id.
    async fn load_snippets(
        &self,
        shared_code_id: &str,
        row_ids: &[String],
    ) -> ResolverResult<ValueSet> {
        let store = self.client.branch_client_if_available();

        debug!("Loading shared code configuration");
        store
            .get_configuration(SHARED_CODE_COMPONENT_ID, shared_code_id)
            .await
            .map_err(|e| ResolverError::from_client(Subsystem::SharedCode, e))?;

        let rows = try_join_all(row_ids.iter().map(|row_id| {
            store.get_configuration_row(SHARED_CODE_COMPONENT_ID, shared_code_id, row_id)
        }))
        .await
        .map_err(|e| ResolverError::from_client(Subsystem::SharedCode, e))?;

        let mut values = ValueSet::new();
        for (row_id, row) in row_ids.iter().zip(rows) {
            let row = validate_shared_code_row(&row.configuration)
                .map_err(|e| ResolverError::invalid(Subsystem::SharedCode, e))?;
            values.insert(row_id.as_str(), row.snippet());
        }

        debug!(rows = values.len(), "Loaded shared code rows");
        Ok(values)
    }

    fn render_parameters(
        &self,
        parameters: &Value,
        values: &ValueSet,
        report: &mut RenderReport,
    ) -> Value {
        let render_container = |value: &Value, report: &mut RenderReport| match value {
            Value::Array(_) | Value::Object(_) => {
                self.renderer.render_with(value, &[values], report)
            }
            scalar => scalar.clone(),
        };

        match parameters {
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), render_container(value, report)))
                    .collect(),
            ),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|value| render_container(value, report))
                    .collect(),
            ),
            scalar => scalar.clone(),
        }
    }
}
