//! Branch-aware access to the configuration store.
//!
//! A project always has a default (main) branch and may have development
//! branches. Reads must go to the active development branch when one is set
//! and to the main branch otherwise; vault lookups are scoped by the same
//! branch id.

use crate::{ClientSettings, ConfigurationStore, Error, StorageApiClient};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[cfg(test)]
#[path = "client_wrapper_tests.rs"]
mod tests;

#[derive(Clone)]
struct BranchClient {
    id: String,
    client: Arc<dyn ConfigurationStore>,
}

/// Holds the main branch client and, optionally, a development branch client.
///
/// # Examples
///
/// ```rust,ignore
/// use storage_client::ClientWrapper;
/// use std::sync::Arc;
///
/// let wrapper = ClientWrapper::new("1001", Arc::new(main_client))
///     .with_branch("1002", Arc::new(branch_client));
///
/// assert_eq!(wrapper.branch_id(), "1002");
/// let store = wrapper.branch_client_if_available();
/// ```
#[derive(Clone)]
pub struct ClientWrapper {
    default_branch_id: String,
    basic_client: Arc<dyn ConfigurationStore>,
    branch: Option<BranchClient>,
}

impl ClientWrapper {
    /// Creates a wrapper reading from the main branch.
    pub fn new(
        default_branch_id: impl Into<String>,
        basic_client: Arc<dyn ConfigurationStore>,
    ) -> Self {
        Self {
            default_branch_id: default_branch_id.into(),
            basic_client,
            branch: None,
        }
    }

    /// Activates a development branch.
    pub fn with_branch(
        mut self,
        branch_id: impl Into<String>,
        client: Arc<dyn ConfigurationStore>,
    ) -> Self {
        self.branch = Some(BranchClient {
            id: branch_id.into(),
            client,
        });
        self
    }

    /// Builds a wrapper over the Storage API described by `settings`.
    ///
    /// The default branch is discovered from the project's branch list. When
    /// `settings.branch_id` names another branch, a client for that branch is
    /// activated.
    ///
    /// # Errors
    ///
    /// Returns `Error::DefaultBranchNotFound` if no branch is flagged as
    /// default, or any error of the branch listing request.
    #[instrument(skip(settings), fields(branch_id = ?settings.branch_id))]
    pub async fn connect(settings: &ClientSettings) -> Result<Self, Error> {
        let basic_client = StorageApiClient::from_settings(settings)?;

        debug!("Listing development branches");
        let branches = basic_client.list_dev_branches().await?;
        let default_branch = branches
            .into_iter()
            .find(|branch| branch.is_default)
            .ok_or(Error::DefaultBranchNotFound)?;

        let branch_client = match settings.branch_id.as_deref() {
            Some(branch_id) if branch_id != default_branch.id => {
                info!(branch_id = branch_id, "Using development branch");
                Some((branch_id.to_string(), basic_client.for_branch(branch_id)))
            }
            _ => None,
        };

        let wrapper = ClientWrapper::new(default_branch.id, Arc::new(basic_client));
        Ok(match branch_client {
            Some((branch_id, client)) => wrapper.with_branch(branch_id, Arc::new(client)),
            None => wrapper,
        })
    }

    /// The client of the main branch.
    pub fn basic_client(&self) -> Arc<dyn ConfigurationStore> {
        Arc::clone(&self.basic_client)
    }

    /// The client of the active development branch, or the main branch client.
    pub fn branch_client_if_available(&self) -> Arc<dyn ConfigurationStore> {
        match &self.branch {
            Some(branch) => Arc::clone(&branch.client),
            None => self.basic_client(),
        }
    }

    pub fn has_branch(&self) -> bool {
        self.branch.is_some()
    }

    /// The active development branch id, or the default branch id.
    pub fn branch_id(&self) -> &str {
        match &self.branch {
            Some(branch) => &branch.id,
            None => &self.default_branch_id,
        }
    }

    pub fn default_branch_id(&self) -> &str {
        &self.default_branch_id
    }
}

impl fmt::Debug for ClientWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientWrapper")
            .field("default_branch_id", &self.default_branch_id)
            .field("branch_id", &self.branch.as_ref().map(|b| b.id.as_str()))
            .finish()
    }
}
