//! HTTP client for the Storage API configuration endpoints.

use crate::models::{Configuration, ConfigurationRow, DevBranch};
use crate::{ClientSettings, ConfigurationStore, Error};
use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

#[cfg(test)]
#[path = "storage_api_tests.rs"]
mod tests;

/// Header carrying the Storage API token, shared by the Vault API.
pub const STORAGE_API_TOKEN_HEADER: &str = "X-StorageApi-Token";

/// Storage API client bound to the main branch or to one development branch.
///
/// # Examples
///
/// ```rust,no_run
/// use storage_client::{ConfigurationStore, SecretString, StorageApiClient};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), storage_client::Error> {
/// let client = StorageApiClient::new(
///     "https://connection.keboola.com",
///     SecretString::from("my-token".to_string()),
///     Duration::from_secs(30),
/// )?;
///
/// let configuration = client
///     .get_configuration("keboola.shared-code", "123")
///     .await?;
/// println!("{} rows", configuration.rows.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StorageApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: SecretString,
    branch_id: Option<String>,
}

impl StorageApiClient {
    /// Creates a client for the main branch.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` for a malformed base URL and `Error::Http`
    /// if the HTTP client cannot be built.
    pub fn new(base_url: &str, token: SecretString, timeout: Duration) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            token,
            branch_id: None,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, Error> {
        Self::new(
            &settings.storage_api_url,
            SecretString::from(settings.storage_api_token.expose_secret().to_string()),
            settings.request_timeout(),
        )
    }

    /// Returns a client reading from the given development branch.
    pub fn for_branch(&self, branch_id: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: SecretString::from(self.token.expose_secret().to_string()),
            branch_id: Some(branch_id.into()),
        }
    }

    pub fn branch_id(&self) -> Option<&str> {
        self.branch_id.as_deref()
    }

    /// Lists the development branches of the project, including the default one.
    #[instrument(skip(self))]
    pub async fn list_dev_branches(&self) -> Result<Vec<DevBranch>, Error> {
        let url = endpoint(&self.base_url, &["v2", "storage", "dev-branches"])?;
        get_json(&self.http, url, &self.token, || Error::ApiError {
            status: StatusCode::NOT_FOUND.as_u16(),
            message: "Development branches endpoint not found".to_string(),
        })
        .await
    }

    fn configuration_url(
        &self,
        component_id: &str,
        configuration_id: &str,
        row_id: Option<&str>,
    ) -> Result<Url, Error> {
        let mut segments = vec!["v2", "storage"];
        if let Some(branch_id) = self.branch_id.as_deref() {
            segments.extend(["branch", branch_id]);
        }
        segments.extend(["components", component_id, "configs", configuration_id]);
        if let Some(row_id) = row_id {
            segments.extend(["rows", row_id]);
        }
        endpoint(&self.base_url, &segments)
    }
}

#[async_trait]
impl ConfigurationStore for StorageApiClient {
    #[instrument(skip(self))]
    async fn get_configuration(
        &self,
        component_id: &str,
        configuration_id: &str,
    ) -> Result<Configuration, Error> {
        let url = self.configuration_url(component_id, configuration_id, None)?;
        get_json(&self.http, url, &self.token, || Error::ConfigurationNotFound {
            id: configuration_id.to_string(),
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_configuration_row(
        &self,
        component_id: &str,
        configuration_id: &str,
        row_id: &str,
    ) -> Result<ConfigurationRow, Error> {
        let url = self.configuration_url(component_id, configuration_id, Some(row_id))?;
        get_json(&self.http, url, &self.token, || Error::RowNotFound {
            id: row_id.to_string(),
        })
        .await
    }
}

/// Appends path segments to a base URL, escaping each segment.
pub(crate) fn endpoint(base_url: &Url, segments: &[&str]) -> Result<Url, Error> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| Error::InvalidUrl(format!("{base_url} cannot be a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Sends an authenticated GET request and decodes the JSON response.
///
/// A 404 answer is turned into the error built by `not_found`.
pub(crate) async fn get_json<T, F>(
    http: &reqwest::Client,
    url: Url,
    token: &SecretString,
    not_found: F,
) -> Result<T, Error>
where
    T: DeserializeOwned,
    F: FnOnce() -> Error,
{
    debug!(url = %url, "Sending GET request");
    let response = http
        .get(url.clone())
        .header(STORAGE_API_TOKEN_HEADER, token.expose_secret())
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(not_found());
    }

    let body = response.text().await?;
    if !status.is_success() {
        warn!(url = %url, status = status.as_u16(), "API request failed");
        return Err(Error::ApiError {
            status: status.as_u16(),
            message: api_error_message(&body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Extracts a readable message from an API error body.
pub(crate) fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "message"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}
