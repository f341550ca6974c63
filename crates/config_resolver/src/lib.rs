//! Resolution of configuration variables and shared code.
//!
//! A job configuration may reference shared code snippets (`{{ rowId }}`),
//! stored variables (`{{ name }}`) and vault variables (`{{ vault.name }}`).
//! [`ConfigurationResolver`] turns such a document into a fully resolved one:
//!
//! 1. [`SharedCodeResolver`] inlines the snippets listed in
//!    `shared_code_row_ids` into the list and object values of `parameters`.
//! 2. [`VariablesResolver`] substitutes variables anywhere in the document and
//!    fails if any placeholder is left without a value.
//!
//! Configurations are read through the `storage_client` traits, so any store
//! implementation (HTTP, in-memory) can back the resolver.

pub mod configuration_resolver;
pub mod configuration_variables_loader;
pub mod document;
pub mod errors;
pub mod schema;
pub mod shared_code_resolver;
pub mod variables_resolver;
pub mod vault_variables_loader;

#[cfg(test)]
mod test_support;

pub use configuration_resolver::{ConfigurationResolver, ResolvedConfiguration};
pub use configuration_variables_loader::{
    ConfigurationVariablesLoader, ConfigurationVariablesSource, VariableValuesSource,
    VARIABLES_COMPONENT_ID,
};
pub use document::ConfigurationDocument;
pub use errors::{ResolverError, ResolverResult, Subsystem};
pub use schema::SchemaError;
pub use shared_code_resolver::{SharedCodeResolver, SHARED_CODE_COMPONENT_ID};
pub use variables_resolver::VariablesResolver;
pub use vault_variables_loader::{VaultVariablesLoader, VaultVariablesSource, VAULT_PREFIX};
