//! HTTP client for the Vault API.

use crate::models::VaultVariable;
use crate::storage_api::{endpoint, get_json};
use crate::{ClientSettings, Error, VaultStore};
use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

#[cfg(test)]
#[path = "vault_api_tests.rs"]
mod tests;

/// Vault API client authenticated with a Storage API token.
#[derive(Debug)]
pub struct VaultApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: SecretString,
}

impl VaultApiClient {
    /// Creates a vault client.
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
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, Error> {
        Self::new(
            &settings.vault_api_url,
            SecretString::from(settings.storage_api_token.expose_secret().to_string()),
            settings.request_timeout(),
        )
    }
}

#[async_trait]
impl VaultStore for VaultApiClient {
    #[instrument(skip(self))]
    async fn list_scoped_variables_for_branch(
        &self,
        branch_id: &str,
    ) -> Result<Vec<VaultVariable>, Error> {
        let url = endpoint(
            &self.base_url,
            &["variables", "scoped", "branch", branch_id],
        )?;
        let variables: Vec<VaultVariable> = get_json(&self.http, url, &self.token, || {
            Error::ApiError {
                status: StatusCode::NOT_FOUND.as_u16(),
                message: format!("Vault variables for branch {branch_id} not found"),
            }
        })
        .await?;

        debug!(count = variables.len(), "Listed vault variables");
        Ok(variables)
    }
}
