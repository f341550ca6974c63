//! Storage API and Vault API mocking utilities for integration tests.
//!
//! A single WireMock server answers both APIs: Storage API paths live under
//! `/v2/storage`, vault paths under `/variables`.

use serde_json::{json, Value};
use storage_client::ClientSettings;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_TOKEN: &str = "1234-integration-token";

/// Storage/Vault API mock server builder.
pub struct KeboolaMockServer {
    server: MockServer,
}

impl KeboolaMockServer {
    /// Create a new mock server instance.
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the base URI for the mock server.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Client settings pointing both APIs at this server.
    pub fn settings(&self, branch_id: Option<&str>) -> ClientSettings {
        let settings = ClientSettings::new(self.uri(), TEST_TOKEN, self.uri());
        match branch_id {
            Some(branch_id) => settings.with_branch(branch_id),
            None => settings,
        }
    }

    /// Mock the branch list with `default_branch_id` as the default branch.
    pub async fn mock_dev_branches(&self, default_branch_id: &str, other_branch_ids: &[&str]) {
        let mut branches = vec![json!({
            "id": default_branch_id,
            "name": "Main",
            "isDefault": true
        })];
        branches.extend(other_branch_ids.iter().map(|id| {
            json!({"id": id, "name": format!("branch-{id}"), "isDefault": false})
        }));

        Mock::given(method("GET"))
            .and(path("/v2/storage/dev-branches"))
            .and(header("X-StorageApi-Token", TEST_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(branches)))
            .mount(&self.server)
            .await;
    }

    /// Mock a configuration and each of its rows.
    ///
    /// `branch_id` selects the development branch the configuration is
    /// served from; `None` serves it from the main branch.
    pub async fn mock_configuration(
        &self,
        branch_id: Option<&str>,
        component_id: &str,
        configuration: Value,
    ) {
        let configuration_id = id_of(&configuration);
        let base = format!(
            "{}/components/{component_id}/configs/{configuration_id}",
            storage_prefix(branch_id)
        );

        if let Some(rows) = configuration.get("rows").and_then(Value::as_array) {
            for row in rows {
                self.mock_json(&format!("{base}/rows/{}", id_of(row)), row.clone())
                    .await;
            }
        }
        self.mock_json(&base, configuration).await;
    }

    /// Mock a single row served without its parent listing it.
    pub async fn mock_configuration_row(
        &self,
        branch_id: Option<&str>,
        component_id: &str,
        configuration_id: &str,
        row: Value,
    ) {
        let row_path = format!(
            "{}/components/{component_id}/configs/{configuration_id}/rows/{}",
            storage_prefix(branch_id),
            id_of(&row)
        );
        self.mock_json(&row_path, row).await;
    }

    /// Mock the vault variables visible from `branch_id`.
    pub async fn mock_vault_variables(&self, branch_id: &str, variables: &[(&str, &str)]) {
        let body: Vec<Value> = variables
            .iter()
            .map(|(key, value)| {
                json!({"key": key, "value": value, "flags": [], "attributes": {}})
            })
            .collect();
        self.mock_json(
            &format!("/variables/scoped/branch/{branch_id}"),
            Value::Array(body),
        )
        .await;
    }

    /// Mock a server error for every request to `request_path`.
    pub async fn mock_server_error(&self, request_path: &str, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"error": message})))
            .mount(&self.server)
            .await;
    }

    async fn mock_json(&self, request_path: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(request_path))
            .and(header("X-StorageApi-Token", TEST_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

fn storage_prefix(branch_id: Option<&str>) -> String {
    match branch_id {
        Some(branch_id) => format!("/v2/storage/branch/{branch_id}"),
        None => "/v2/storage".to_string(),
    }
}

fn id_of(value: &Value) -> String {
    match value.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
