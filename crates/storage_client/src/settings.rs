//! Client settings.
//!
//! Settings can be read from a TOML file:
//!
//! ```toml
//! storage_api_url = "https://connection.keboola.com"
//! storage_api_token = "123-456-secret"
//! vault_api_url = "https://vault.keboola.com"
//! branch_id = "1002"
//! request_timeout_secs = 60
//! ```
//!
//! or from the `KBC_URL`, `KBC_TOKEN`, `VAULT_API_URL`, `KBC_BRANCHID` and
//! `KBC_REQUEST_TIMEOUT_SECS` environment variables.

use crate::models::deserialize_optional_id;
use crate::Error;
use secrecy::SecretString;
use serde::Deserialize;
use std::{fs, path::Path, time::Duration};
use tracing::debug;

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_STORAGE_API_URL: &str = "KBC_URL";
pub const ENV_STORAGE_API_TOKEN: &str = "KBC_TOKEN";
pub const ENV_VAULT_API_URL: &str = "VAULT_API_URL";
pub const ENV_BRANCH_ID: &str = "KBC_BRANCHID";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "KBC_REQUEST_TIMEOUT_SECS";

/// Connection settings for the Storage API and the Vault API.
///
/// The token is kept in a [`SecretString`] and never shows up in `Debug` output.
#[derive(Debug)]
pub struct ClientSettings {
    pub storage_api_url: String,
    pub storage_api_token: SecretString,
    pub vault_api_url: String,
    /// Development branch to read from; `None` reads from the default branch.
    pub branch_id: Option<String>,
    pub request_timeout_secs: u64,
}

#[derive(Deserialize)]
struct SettingsFile {
    storage_api_url: String,
    storage_api_token: String,
    vault_api_url: String,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    branch_id: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl From<SettingsFile> for ClientSettings {
    fn from(file: SettingsFile) -> Self {
        Self {
            storage_api_url: file.storage_api_url,
            storage_api_token: SecretString::from(file.storage_api_token),
            vault_api_url: file.vault_api_url,
            branch_id: file.branch_id,
            request_timeout_secs: file.request_timeout_secs,
        }
    }
}

impl ClientSettings {
    pub fn new(
        storage_api_url: impl Into<String>,
        storage_api_token: impl Into<String>,
        vault_api_url: impl Into<String>,
    ) -> Self {
        Self {
            storage_api_url: storage_api_url.into(),
            storage_api_token: SecretString::from(storage_api_token.into()),
            vault_api_url: vault_api_url.into(),
            branch_id: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    pub fn with_branch(mut self, branch_id: impl Into<String>) -> Self {
        self.branch_id = Some(branch_id.into());
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read or
    /// does not contain valid settings.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading client settings from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Settings file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read settings file: {}", e)))?;

        let file: SettingsFile = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse settings file: {}", e)))?;

        Ok(file.into())
    }

    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the first required variable that is
    /// missing, or a malformed timeout.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| Error::Config(format!("Environment variable {key} is not set")))
        };

        let request_timeout_secs = match get(ENV_REQUEST_TIMEOUT_SECS) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "Environment variable {ENV_REQUEST_TIMEOUT_SECS} must be a number of seconds, got \"{raw}\""
                ))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            storage_api_url: require(ENV_STORAGE_API_URL)?,
            storage_api_token: SecretString::from(require(ENV_STORAGE_API_TOKEN)?),
            vault_api_url: require(ENV_VAULT_API_URL)?,
            branch_id: get(ENV_BRANCH_ID),
            request_timeout_secs,
        })
    }
}
