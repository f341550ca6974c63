//! Integration testing library for the configuration resolver.
//!
//! Provides a wiremock based stand-in for the Storage API and the Vault API
//! plus helpers for wiring a [`config_resolver::ConfigurationResolver`]
//! against it.

pub mod fixtures;
pub mod mock_keboola;

pub use mock_keboola::KeboolaMockServer;

use anyhow::Result;
use config_resolver::ConfigurationResolver;
use std::sync::Arc;
use storage_client::{ClientSettings, ClientWrapper, VaultApiClient};

/// Initialize logging for tests.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_test_writer()
        .try_init();
}

/// Connects the HTTP clients described by `settings` and builds a resolver.
pub async fn connect_resolver(settings: &ClientSettings) -> Result<ConfigurationResolver> {
    let client = ClientWrapper::connect(settings).await?;
    let vault = Arc::new(VaultApiClient::from_settings(settings)?);
    Ok(ConfigurationResolver::new(client, vault)?)
}
